use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::Index;

use crate::utils::error::{KazuError, Result};

pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MAX_BIRTH_YEAR: i32 = 2100;

/// 縮約前後的數值。`Empty` 代表「沒有定義的值」（例如影数的空白情況），
/// 只有在明確呼叫 `or_zero()` 的加法步驟才會被當成 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reducible {
    Value(u64),
    #[default]
    Empty,
}

impl Reducible {
    pub fn or_zero(self) -> u64 {
        match self {
            Reducible::Value(n) => n,
            Reducible::Empty => 0,
        }
    }

    pub fn value(self) -> Option<u64> {
        match self {
            Reducible::Value(n) => Some(n),
            Reducible::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Reducible::Empty)
    }
}

impl From<Option<u64>> for Reducible {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Reducible::Empty, Reducible::Value)
    }
}

impl fmt::Display for Reducible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reducible::Value(n) => write!(f, "{}", n),
            Reducible::Empty => Ok(()),
        }
    }
}

impl Serialize for Reducible {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 已驗證的生日（西曆，1900〜2100 年）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct BirthDate {
    year: i32,
    month: u32,
    day: u32,
}

impl BirthDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        let input = format!("{:04}/{:02}/{:02}", year, month, day);
        if !(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year) {
            return Err(KazuError::InvalidBirthDate {
                input,
                reason: format!("year must be between {} and {}", MIN_BIRTH_YEAR, MAX_BIRTH_YEAR),
            });
        }
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(KazuError::InvalidBirthDate {
                input,
                reason: "not a calendar date".to_string(),
            });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl TryFrom<NaiveDate> for BirthDate {
    type Error = KazuError;

    fn try_from(date: NaiveDate) -> Result<Self> {
        BirthDate::new(date.year(), date.month(), date.day())
    }
}

impl From<BirthDate> for NaiveDate {
    fn from(date: BirthDate) -> Self {
        // BirthDate::new 已確認是合法日期
        NaiveDate::from_ymd_opt(date.year, date.month, date.day).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// 十二個構成数的標籤，順序即輸出順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    BirthI,
    BirthII,
    Shadow,
    Lineage,
    Ego,
    Social,
    Mission,
    Soul,
    Appearance,
    Stage,
    Hidden,
    Core,
}

impl Label {
    pub const ALL: [Label; 12] = [
        Label::BirthI,
        Label::BirthII,
        Label::Shadow,
        Label::Lineage,
        Label::Ego,
        Label::Social,
        Label::Mission,
        Label::Soul,
        Label::Appearance,
        Label::Stage,
        Label::Hidden,
        Label::Core,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::BirthI => "誕生数Ⅰ",
            Label::BirthII => "誕生数Ⅱ",
            Label::Shadow => "影数",
            Label::Lineage => "家系数",
            Label::Ego => "自我数",
            Label::Social => "社会数",
            Label::Mission => "使命数",
            Label::Soul => "魂数",
            Label::Appearance => "外見数",
            Label::Stage => "演技数",
            Label::Hidden => "隠数",
            Label::Core => "核数",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一個人的全部構成数。建立後不可變。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituentNumbers {
    values: [Reducible; 12],
}

impl ConstituentNumbers {
    pub(crate) fn from_values(values: [Reducible; 12]) -> Self {
        Self { values }
    }

    pub fn get(&self, label: Label) -> Reducible {
        self.values[label.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, Reducible)> + '_ {
        Label::ALL.iter().map(move |&label| (label, self.get(label)))
    }

    /// 依標籤順序輸出（標籤, 字串值），空值為 ""
    pub fn to_string_map(&self) -> Vec<(&'static str, String)> {
        self.iter()
            .map(|(label, value)| (label.as_str(), value.to_string()))
            .collect()
    }

    pub fn is_fully_populated(&self) -> bool {
        self.values.iter().all(|v| !v.is_empty())
    }
}

impl Index<Label> for ConstituentNumbers {
    type Output = Reducible;

    fn index(&self, label: Label) -> &Self::Output {
        &self.values[label.index()]
    }
}

impl Serialize for ConstituentNumbers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (label, value) in self.iter() {
            map.serialize_entry(label.as_str(), &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalYearRecord {
    pub year: i32,
    pub personal_year: String,
    pub meaning: String,
}

/// 組裝個人檔案所需的輸入（已正規化、已驗證）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRequest {
    pub last_name: String,
    pub first_name: String,
    pub maiden_last_name: Option<String>,
    pub birth_date: BirthDate,
    pub start_year: Option<i32>,
    pub cycle_length: usize,
    pub companions: Vec<CompanionInput>,
    pub max_companions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub name_display: String,
    pub birth_date: String,
    pub numbers: ConstituentNumbers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maiden_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbers_maiden: Option<ConstituentNumbers>,
    pub nine_year_cycle: Vec<PersonalYearRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companions: Vec<Companion>,
}

/// 關係鑑定中「其他人」的原始輸入
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanionInput {
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub birth_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Companion {
    pub last_name: String,
    pub first_name: String,
    pub birth_date: String,
    pub name_display: String,
    /// 生日無法解析時為 None
    pub numbers: Option<ConstituentNumbers>,
}
