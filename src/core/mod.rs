pub mod constituent;
pub mod cycle;
pub mod primitives;
pub mod profile;
pub mod render;

pub use crate::domain::model::{ConstituentNumbers, PersonalYearRecord, Profile, Reducible};
pub use crate::domain::ports::{ProfileSource, TodayProvider};
pub use crate::utils::error::Result;
