use chrono::NaiveDate;

use crate::domain::model::ProfileRequest;
use crate::utils::error::Result;

/// 「今天」的來源。9 年週期的預設視窗依賴它，測試時換成固定日期。
pub trait TodayProvider: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 讀取本機時鐘
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TodayProvider for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDate(pub NaiveDate);

impl TodayProvider for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// 能產生計算請求的設定來源（命令列、TOML 檔）
pub trait ProfileSource {
    fn profile_request(&self) -> Result<ProfileRequest>;
}
