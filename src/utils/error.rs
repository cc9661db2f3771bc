use thiserror::Error;

#[derive(Error, Debug)]
pub enum KazuError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid birth date '{input}': {reason}")]
    InvalidBirthDate { input: String, reason: String },

    #[error("Invalid name for '{field}': {reason}")]
    InvalidName { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl KazuError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            KazuError::InvalidBirthDate { .. } | KazuError::InvalidName { .. } => {
                ErrorCategory::Input
            }
            KazuError::ConfigValidationError { .. }
            | KazuError::InvalidConfigValueError { .. }
            | KazuError::MissingConfigError { .. } => ErrorCategory::Configuration,
            KazuError::IoError(_) | KazuError::SerializationError(_) | KazuError::CsvError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息（日文介面）
    pub fn user_friendly_message(&self) -> String {
        match self {
            KazuError::InvalidBirthDate { .. } => {
                "生年月日は YYYY/MM/DD 形式で、存在する日付（1900〜2100年）を入力してください".to_string()
            }
            KazuError::InvalidName { field, .. } => {
                format!("{} はローマ字（A-Z）で入力してください", field)
            }
            KazuError::MissingConfigError { field } => format!("{} が入力されていません", field),
            KazuError::ConfigValidationError { .. } | KazuError::InvalidConfigValueError { .. } => {
                format!("設定ファイルに問題があります: {}", self)
            }
            KazuError::IoError(_) | KazuError::SerializationError(_) | KazuError::CsvError(_) => {
                format!("結果を出力できませんでした: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the name and birth date arguments (e.g. --birth-date 1990/05/15)",
            ErrorCategory::Configuration => "Check the TOML file: [person] needs last_name, first_name and birth_date",
            ErrorCategory::Output => "Check that the output path is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, KazuError>;
