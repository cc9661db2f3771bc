use crate::core::cycle::DEFAULT_CYCLE_LENGTH;
use crate::core::profile::DEFAULT_MAX_COMPANIONS;
use crate::core::render::OutputFormat;
use crate::domain::model::{CompanionInput, ProfileRequest};
use crate::domain::ports::ProfileSource;
use crate::utils::error::{KazuError, Result};
use crate::utils::validation::{
    normalize_birth_date_input, normalize_name_input, parse_birth_date, validate_name,
    validate_range, Validate,
};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

pub const MAX_CYCLE_LENGTH: usize = 100;
pub const MIN_START_YEAR: i32 = 1;
pub const MAX_START_YEAR: i32 = 9999;

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub person: PersonConfig,
    pub cycle: Option<CycleConfig>,
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub companions: Vec<CompanionInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonConfig {
    pub last_name: String,
    pub first_name: String,
    pub maiden_last_name: Option<String>,
    pub birth_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CycleConfig {
    pub start_year: Option<i32>,
    pub length: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
    pub max_companions: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KazuError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| KazuError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BIRTH_DATE})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_name("person.last_name", &self.person.last_name)?;
        validate_name("person.first_name", &self.person.first_name)?;
        parse_birth_date(&normalize_birth_date_input(&self.person.birth_date))?;

        if let Some(length) = self.cycle.as_ref().and_then(|c| c.length) {
            validate_range("cycle.length", length, 1, MAX_CYCLE_LENGTH)?;
        }
        if let Some(start) = self.start_year() {
            validate_range("cycle.start_year", start, MIN_START_YEAR, MAX_START_YEAR)?;
        }

        Ok(())
    }

    pub fn start_year(&self) -> Option<i32> {
        self.cycle.as_ref().and_then(|c| c.start_year)
    }

    pub fn cycle_length(&self) -> usize {
        self.cycle
            .as_ref()
            .and_then(|c| c.length)
            .unwrap_or(DEFAULT_CYCLE_LENGTH)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn max_companions(&self) -> usize {
        self.output
            .as_ref()
            .and_then(|o| o.max_companions)
            .unwrap_or(DEFAULT_MAX_COMPANIONS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl ProfileSource for TomlConfig {
    fn profile_request(&self) -> Result<ProfileRequest> {
        self.validate()?;

        let maiden_last_name = self
            .person
            .maiden_last_name
            .as_deref()
            .map(normalize_name_input)
            .filter(|name| !name.is_empty());

        Ok(ProfileRequest {
            last_name: normalize_name_input(&self.person.last_name),
            first_name: normalize_name_input(&self.person.first_name),
            maiden_last_name,
            birth_date: parse_birth_date(&normalize_birth_date_input(&self.person.birth_date))?,
            start_year: self.start_year(),
            cycle_length: self.cycle_length(),
            companions: self.companions.clone(),
            max_companions: self.max_companions(),
        })
    }
}
