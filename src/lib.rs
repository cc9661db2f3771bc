pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::OutputSink;
pub use config::toml_config::TomlConfig;
pub use crate::core::constituent::compute_all;
pub use crate::core::cycle::{
    compute_nine_year_cycle, compute_nine_year_cycle_now, compute_nine_year_cycle_raw,
    DEFAULT_CYCLE_LENGTH,
};
pub use crate::core::profile::{build_profile, compute_companions};
pub use crate::core::render::{render_profile, OutputFormat};
pub use domain::model::{
    BirthDate, ConstituentNumbers, Label, PersonalYearRecord, Profile, ProfileRequest, Reducible,
};
pub use domain::ports::{FixedDate, ProfileSource, SystemClock, TodayProvider};
pub use utils::error::{KazuError, Result};
