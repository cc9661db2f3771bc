use crate::core::cycle::DEFAULT_CYCLE_LENGTH;
use crate::core::profile::DEFAULT_MAX_COMPANIONS;
use crate::core::render::OutputFormat;
use crate::domain::model::ProfileRequest;
use crate::domain::ports::ProfileSource;
use crate::utils::error::Result;
use crate::utils::validation::{
    normalize_birth_date_input, normalize_name_input, parse_birth_date, validate_name,
    validate_range, validate_required_field, Validate,
};
use clap::Parser;

use super::toml_config::{MAX_CYCLE_LENGTH, MAX_START_YEAR, MIN_START_YEAR};

#[derive(Debug, Clone, Parser)]
#[command(name = "kazu")]
#[command(about = "Numerology constituent numbers and nine-year cycle calculator")]
pub struct CliConfig {
    /// Last name in romaji
    #[arg(long)]
    pub last_name: Option<String>,

    /// First name in romaji
    #[arg(long)]
    pub first_name: Option<String>,

    /// Maiden last name; computed as a second set when it differs
    #[arg(long)]
    pub maiden_last_name: Option<String>,

    /// Birth date, YYYY/MM/DD or YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,

    /// First year of the cycle window (default: this year - 3, 7 years)
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Number of years when --start-year is given
    #[arg(long, default_value_t = DEFAULT_CYCLE_LENGTH)]
    pub length: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to TOML configuration file (replaces the person arguments)
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_name("last_name", validate_required_field("last_name", &self.last_name)?)?;
        validate_name("first_name", validate_required_field("first_name", &self.first_name)?)?;
        let birth_date = validate_required_field("birth_date", &self.birth_date)?;
        parse_birth_date(&normalize_birth_date_input(birth_date))?;
        validate_range("length", self.length, 1, MAX_CYCLE_LENGTH)?;
        if let Some(start) = self.start_year {
            validate_range("start_year", start, MIN_START_YEAR, MAX_START_YEAR)?;
        }
        Ok(())
    }
}

impl ProfileSource for CliConfig {
    fn profile_request(&self) -> Result<ProfileRequest> {
        self.validate()?;

        let name = |value: &Option<String>| {
            value.as_deref().map(normalize_name_input).unwrap_or_default()
        };
        let birth_date = self.birth_date.as_deref().unwrap_or_default();

        Ok(ProfileRequest {
            last_name: name(&self.last_name),
            first_name: name(&self.first_name),
            maiden_last_name: Some(name(&self.maiden_last_name)).filter(|m| !m.is_empty()),
            birth_date: parse_birth_date(&normalize_birth_date_input(birth_date))?,
            start_year: self.start_year,
            cycle_length: self.length,
            companions: Vec::new(),
            max_companions: DEFAULT_MAX_COMPANIONS,
        })
    }
}
