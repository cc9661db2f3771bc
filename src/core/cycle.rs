// 9 年週期（パーソナルイヤー）。這裡的縮約和構成数不同：11 → 2、22 → 4，結果一定是 1〜9。

use chrono::Datelike;

use crate::core::constituent::birth_number_i;
use crate::domain::model::{PersonalYearRecord, Reducible};
use crate::domain::ports::{SystemClock, TodayProvider};

/// 呼叫端指定起始年時的預設長度
pub const DEFAULT_CYCLE_LENGTH: usize = 9;
/// 不指定起始年時：今年前後各 3 年
pub const DEFAULT_WINDOW_LENGTH: usize = 7;
pub const DEFAULT_WINDOW_YEARS_BEFORE: i32 = 3;

const MAX_CYCLE_ITERATIONS: usize = 20;

/// 縮約到 1〜9。0 以下視為 1。
pub fn reduce_to_one_digit(n: i64) -> u8 {
    if n <= 0 {
        return 1;
    }
    let mut x = n.unsigned_abs();
    for _ in 0..MAX_CYCLE_ITERATIONS {
        match x {
            1..=9 => return x as u8,
            11 => return 2,
            22 => return 4,
            _ => x = crate::core::primitives::digit_sum(x),
        }
    }
    if (1..=9).contains(&x) {
        x as u8
    } else {
        1
    }
}

/// 西曆年的桁和，連續的 "11"、"22" 當成一個項。例：2011 → 2+0+11，2022 → 2+0+22
pub fn year_digit_sum(year: i32) -> u8 {
    let digits: Vec<u8> = year
        .to_string()
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let mut terms: Vec<i64> = Vec::with_capacity(digits.len());
    let mut i = 0;
    while i < digits.len() {
        if let Some(pair) = digits.get(i..i + 2) {
            if pair == [1, 1] || pair == [2, 2] {
                terms.push(i64::from(pair[0]) * 11);
                i += 2;
                continue;
            }
        }
        terms.push(i64::from(digits[i]));
        i += 1;
    }

    reduce_to_one_digit(terms.iter().sum())
}

/// 誕生数Ⅰ換成週期用的一位數；空值為 1
pub fn birth_i_for_cycle(birth_i: Reducible) -> u8 {
    match birth_i {
        Reducible::Value(11) => 2,
        Reducible::Value(22) => 4,
        Reducible::Value(n) => reduce_to_one_digit(i64::try_from(n).unwrap_or(0)),
        Reducible::Empty => 1,
    }
}

pub fn personal_year(year: i32, birth_i_digit: u8) -> u8 {
    reduce_to_one_digit(i64::from(year_digit_sum(year)) + i64::from(birth_i_digit))
}

pub fn year_meaning(personal_year: u8) -> &'static str {
    match personal_year {
        1 => "はじまり",
        2 => "バランス",
        3 => "行動",
        4 => "安定",
        5 => "変化",
        6 => "調和",
        7 => "思考",
        8 => "成果",
        9 => "総括",
        _ => "",
    }
}

/// 決定要計算的年份範圍。沒有起始年時固定為「今年 − 3」起 7 年，忽略 `length`。
pub fn cycle_window(
    length: usize,
    start_year: Option<i32>,
    today: &dyn TodayProvider,
) -> (i32, usize) {
    match start_year {
        Some(start) => (start, length),
        None => (
            today.today().year() - DEFAULT_WINDOW_YEARS_BEFORE,
            DEFAULT_WINDOW_LENGTH,
        ),
    }
}

/// 以固定的起始年與長度計算，不讀時鐘。超出 i32 的年份就停在那裡。
pub fn cycle_for_window(
    year: i32,
    month: u32,
    day: u32,
    start_year: i32,
    length: usize,
) -> Vec<PersonalYearRecord> {
    let birth_digit = birth_i_for_cycle(birth_number_i(year, month, day));

    (0..length)
        .map_while(|offset| {
            i32::try_from(offset)
                .ok()
                .and_then(|offset| start_year.checked_add(offset))
        })
        .map(|target_year| {
            let number = personal_year(target_year, birth_digit);
            PersonalYearRecord {
                year: target_year,
                personal_year: number.to_string(),
                meaning: year_meaning(number).to_string(),
            }
        })
        .collect()
}

pub fn compute_nine_year_cycle(
    year: i32,
    month: u32,
    day: u32,
    length: usize,
    start_year: Option<i32>,
    today: &dyn TodayProvider,
) -> Vec<PersonalYearRecord> {
    let (start, effective_length) = cycle_window(length, start_year, today);
    tracing::debug!(
        start_year = start,
        length = effective_length,
        pinned = start_year.is_some(),
        "computing nine-year cycle"
    );
    cycle_for_window(year, month, day, start, effective_length)
}

/// 以本機時鐘決定視窗的預設呼叫（今年前後各 3 年）
pub fn compute_nine_year_cycle_now(year: i32, month: u32, day: u32) -> Vec<PersonalYearRecord> {
    compute_nine_year_cycle(year, month, day, DEFAULT_CYCLE_LENGTH, None, &SystemClock)
}

/// 生日欄位還是字串時的入口。任何一欄無法轉成整數就回傳空的序列。
pub fn compute_nine_year_cycle_raw(
    year: &str,
    month: &str,
    day: &str,
    length: usize,
    start_year: Option<i32>,
    today: &dyn TodayProvider,
) -> Vec<PersonalYearRecord> {
    let parsed = (
        year.trim().parse::<i32>(),
        month.trim().parse::<u32>(),
        day.trim().parse::<u32>(),
    );
    match parsed {
        (Ok(y), Ok(m), Ok(d)) => compute_nine_year_cycle(y, m, d, length, start_year, today),
        _ => {
            tracing::warn!(year, month, day, "birth date fields are not integers, no cycle");
            Vec::new()
        }
    }
}
