// 字母與數字的基本運算：正規化、字母對應數、桁和縮約。

use unicode_normalization::UnicodeNormalization;

use crate::domain::model::Reducible;

/// 縮約時保留的主數
pub const MASTER_NUMBERS: [u64; 2] = [11, 22];

const MAX_REDUCE_ITERATIONS: usize = 10;

/// NFKC（全形/半形、相容字元）→ 大寫 → 只留下 `[A-Z ]`。
/// 不壓縮中間空白，只去掉頭尾。
pub fn normalize(text: &str) -> String {
    let upper = text.nfkc().collect::<String>().to_uppercase();
    let kept: String = upper
        .chars()
        .filter(|c| c.is_ascii_uppercase() || *c == ' ')
        .collect();
    kept.trim().to_string()
}

/// A=1 … I=9, J=1 … R=9, S=1 … Z=8；其他字元為 0
pub fn letter_value(ch: char) -> u64 {
    if ch.is_ascii_uppercase() {
        u64::from((ch as u8 - b'A') % 9 + 1)
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterClass {
    All,
    Vowel,
    Consonant,
}

impl LetterClass {
    pub fn matches(self, ch: char) -> bool {
        let vowel = matches!(ch, 'A' | 'E' | 'I' | 'O' | 'U');
        match self {
            LetterClass::All => true,
            LetterClass::Vowel => vowel,
            LetterClass::Consonant => ch.is_ascii_alphabetic() && !vowel,
        }
    }
}

pub fn sum_letters(name: &str, class: LetterClass) -> u64 {
    normalize(name)
        .chars()
        .filter(|c| *c != ' ' && class.matches(*c))
        .map(letter_value)
        .sum()
}

/// 正規化後姓名的第一個字母（沒有則 None）
pub fn first_letter(name: &str) -> Option<char> {
    normalize(name).chars().find(|c| *c != ' ')
}

pub fn digit_sum(n: u64) -> u64 {
    let mut rest = n;
    let mut total = 0;
    while rest > 0 {
        total += rest % 10;
        rest /= 10;
    }
    total
}

pub fn is_master(n: u64) -> bool {
    MASTER_NUMBERS.contains(&n)
}

/// 桁和縮約。11 與 22 在任何一步出現都立即停止。
pub fn reduce(n: u64) -> Reducible {
    reduce_within(n, MAX_REDUCE_ITERATIONS)
}

/// 先去掉非數字字元再縮約；沒有數字則為空值
pub fn reduce_text(raw: &str) -> Reducible {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Reducible::Empty;
    }
    match digits.parse::<u64>() {
        Ok(n) => reduce(n),
        // 超出 u64 的數字不可能是個位數或主數，直接算第一輪桁和
        Err(_) => {
            let first_pass = digits.bytes().map(|b| u64::from(b - b'0')).sum();
            reduce_within(first_pass, MAX_REDUCE_ITERATIONS - 1)
        }
    }
}

/// 已經是 Reducible 的值再縮約一次，空值保持空值
pub fn reduce_value(value: Reducible) -> Reducible {
    match value {
        Reducible::Value(n) => reduce(n),
        Reducible::Empty => Reducible::Empty,
    }
}

fn reduce_within(n: u64, iterations: usize) -> Reducible {
    let mut x = n;
    if is_master(x) {
        return Reducible::Value(x);
    }
    for _ in 0..iterations {
        if x < 10 {
            return Reducible::Value(x);
        }
        x = digit_sum(x);
        if is_master(x) {
            return Reducible::Value(x);
        }
    }
    tracing::trace!(input = n, last = x, "reduction stopped at iteration limit");
    Reducible::Value(x)
}
