use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::model::{ConstituentNumbers, Profile};
use crate::utils::error::{KazuError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub const VALID: [&'static str; 3] = ["json", "csv", "tsv"];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = KazuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            other => Err(KazuError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!("Unsupported format. Valid formats: {}", Self::VALID.join(", ")),
            }),
        }
    }
}

pub fn render_profile(profile: &Profile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(profile)?),
        OutputFormat::Csv => render_delimited(profile, b','),
        OutputFormat::Tsv => render_delimited(profile, b'\t'),
    }
}

/// 一列一個值：section, key, value, meaning
fn render_delimited(profile: &Profile, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["section", "key", "value", "meaning"])?;
    write_numbers(&mut writer, "numbers", &profile.numbers)?;
    if let Some(maiden) = &profile.numbers_maiden {
        write_numbers(&mut writer, "numbers_maiden", maiden)?;
    }
    for record in &profile.nine_year_cycle {
        writer.write_record([
            "nine_year_cycle",
            record.year.to_string().as_str(),
            record.personal_year.as_str(),
            record.meaning.as_str(),
        ])?;
    }
    for companion in &profile.companions {
        if let Some(numbers) = &companion.numbers {
            write_numbers(&mut writer, &format!("companion:{}", companion.name_display), numbers)?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| KazuError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| KazuError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn write_numbers(
    writer: &mut csv::Writer<Vec<u8>>,
    section: &str,
    numbers: &ConstituentNumbers,
) -> Result<()> {
    for (label, value) in numbers.to_string_map() {
        writer.write_record([section, label, value.as_str(), ""])?;
    }
    Ok(())
}
