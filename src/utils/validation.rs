use crate::domain::model::BirthDate;
use crate::utils::error::{KazuError, Result};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static BIRTH_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4})[/-](\d{1,2})[/-](\d{1,2})\s*$").expect("birth date pattern is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 吸收全形/半形差異並去掉頭尾空白
pub fn normalize_text(value: &str) -> String {
    value.nfkc().collect::<String>().trim().to_string()
}

/// 姓名輸入：NFKC、壓縮連續空白、大寫
pub fn normalize_name_input(value: &str) -> String {
    let text = normalize_text(value);
    WHITESPACE_RUN.replace_all(&text, " ").to_uppercase()
}

/// 生日輸入：NFKC，分隔符號統一成 '/'
pub fn normalize_birth_date_input(value: &str) -> String {
    normalize_text(value).replace(['.', '-'], "/")
}

/// 解析 YYYY/MM/DD 或 YYYY-MM-DD，並確認是 1900〜2100 年的實際日期
pub fn parse_birth_date(input: &str) -> Result<BirthDate> {
    let invalid = |reason: &str| KazuError::InvalidBirthDate {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    if input.trim().is_empty() {
        return Err(invalid("birth date is empty"));
    }

    let caps = BIRTH_DATE_PATTERN
        .captures(input)
        .ok_or_else(|| invalid("expected YYYY/MM/DD"))?;

    let year: i32 = caps[1].parse().map_err(|_| invalid("year is not a number"))?;
    let month: u32 = caps[2].parse().map_err(|_| invalid("month is not a number"))?;
    let day: u32 = caps[3].parse().map_err(|_| invalid("day is not a number"))?;

    BirthDate::new(year, month, day).map_err(|e| match e {
        KazuError::InvalidBirthDate { reason, .. } => invalid(&reason),
        other => other,
    })
}

/// 姓名必填，且正規化後至少要有一個 A-Z 字母
pub fn validate_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if crate::core::primitives::normalize(value)
        .chars()
        .all(|c| c == ' ')
    {
        return Err(KazuError::InvalidName {
            field: field_name.to_string(),
            reason: "no latin letters (A-Z) after normalization".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| KazuError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(KazuError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(KazuError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
