// 構成数：由姓名（羅馬字）與生日算出的十二個數。
// 加法步驟一律先把空值視為 0 再相加，然後以 reduce 縮約（保留 11/22）。

use crate::core::primitives::{first_letter, letter_value, reduce, sum_letters, LetterClass};
use crate::domain::model::{BirthDate, ConstituentNumbers, Label, Reducible};

/// 誕生数Ⅰ：年、月、日的十進位數字全部相加後縮約
pub fn birth_number_i(year: i32, month: u32, day: u32) -> Reducible {
    let digits = format!("{}{}{}", year, month, day);
    let total: u64 = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(u64::from)
        .sum();
    reduce(total)
}

/// 誕生数Ⅱ
pub fn birth_number_ii(day: u32) -> Reducible {
    reduce(u64::from(day))
}

/// 影数。9 只和 2/22 有對應（固定為 2），和其他數配對時為空值。
pub fn shadow_number(birth_i: Reducible, birth_ii: Reducible) -> Reducible {
    let a = birth_i.or_zero();
    let b = birth_ii.or_zero();
    let resonant = |n: u64| n == 2 || n == 22;

    if (a == 9 && !resonant(b)) || (b == 9 && !resonant(a)) {
        return Reducible::Empty;
    }
    if a == 9 || b == 9 {
        return Reducible::Value(2);
    }
    reduce(a + b)
}

/// 家系数
pub fn lineage_number(last_name: &str) -> Reducible {
    reduce(sum_letters(last_name, LetterClass::All))
}

/// 自我数
pub fn ego_number(first_name: &str) -> Reducible {
    reduce(sum_letters(first_name, LetterClass::All))
}

/// 社会数
pub fn social_number(lineage: Reducible, ego: Reducible) -> Reducible {
    reduce(lineage.or_zero() + ego.or_zero())
}

/// 魂数：母音
pub fn soul_number(last_name: &str, first_name: &str) -> Reducible {
    reduce(sum_letters(last_name, LetterClass::Vowel) + sum_letters(first_name, LetterClass::Vowel))
}

/// 外見数：子音
pub fn appearance_number(last_name: &str, first_name: &str) -> Reducible {
    reduce(
        sum_letters(last_name, LetterClass::Consonant)
            + sum_letters(first_name, LetterClass::Consonant),
    )
}

pub fn mission_number(birth_i: Reducible, social: Reducible) -> Reducible {
    reduce(birth_i.or_zero() + social.or_zero())
}

/// 演技数：11 月直接用 11，其他月份先縮約
pub fn stage_number(appearance: Reducible, month: u32) -> Reducible {
    let month_term = if month == 11 {
        11
    } else {
        reduce(u64::from(month)).or_zero()
    };
    reduce(appearance.or_zero() + month_term)
}

/// 隠数：姓與名第一個字母的數相加
pub fn hidden_number(last_name: &str, first_name: &str) -> Reducible {
    let head = |name: &str| first_letter(name).map_or(0, letter_value);
    reduce(head(last_name) + head(first_name))
}

pub fn core_number(birth_i: Reducible, soul: Reducible) -> Reducible {
    reduce(birth_i.or_zero() + soul.or_zero())
}

/// 計算全部十二個構成数
pub fn compute_all(
    last_name: &str,
    first_name: &str,
    year: i32,
    month: u32,
    day: u32,
) -> ConstituentNumbers {
    let birth_i = birth_number_i(year, month, day);
    let birth_ii = birth_number_ii(day);
    let lineage = lineage_number(last_name);
    let ego = ego_number(first_name);
    let social = social_number(lineage, ego);
    let mission = mission_number(birth_i, social);
    let soul = soul_number(last_name, first_name);
    let appearance = appearance_number(last_name, first_name);
    let stage = stage_number(appearance, month);
    let hidden = hidden_number(last_name, first_name);
    let core = core_number(birth_i, soul);
    let shadow = shadow_number(birth_i, birth_ii);

    let mut values = [Reducible::Empty; 12];
    for (label, value) in [
        (Label::BirthI, birth_i),
        (Label::BirthII, birth_ii),
        (Label::Shadow, shadow),
        (Label::Lineage, lineage),
        (Label::Ego, ego),
        (Label::Social, social),
        (Label::Mission, mission),
        (Label::Soul, soul),
        (Label::Appearance, appearance),
        (Label::Stage, stage),
        (Label::Hidden, hidden),
        (Label::Core, core),
    ] {
        values[label as usize] = value;
    }

    let numbers = ConstituentNumbers::from_values(values);
    tracing::debug!(
        last_name,
        first_name,
        year,
        month,
        day,
        birth_i = %birth_i,
        core = %core,
        "computed constituent numbers"
    );
    numbers
}

pub fn compute_for_date(last_name: &str, first_name: &str, date: &BirthDate) -> ConstituentNumbers {
    compute_all(last_name, first_name, date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u64) -> Reducible {
        Reducible::Value(n)
    }

    #[test]
    fn test_birth_numbers() {
        assert_eq!(birth_number_i(1990, 5, 15), v(3));
        // 1+9+8+5+1+2+2+9 = 37 → 10 → 1
        assert_eq!(birth_number_i(1985, 12, 29), v(1));
        // 2+0+0+0+2+2 = 6
        assert_eq!(birth_number_i(2000, 2, 2), v(6));
        // 1+9+7+0+1+1 = 19 → 10 → 1 (中途沒有經過主數)
        assert_eq!(birth_number_i(1970, 1, 1), v(1));
        // 1+9+9+1+1+1 = 22
        assert_eq!(birth_number_i(1991, 1, 1), v(22));
        assert_eq!(birth_number_ii(29), v(11));
        assert_eq!(birth_number_ii(22), v(22));
        assert_eq!(birth_number_ii(15), v(6));
    }

    #[test]
    fn test_shadow_number_rules() {
        assert_eq!(shadow_number(v(9), v(2)), v(2));
        assert_eq!(shadow_number(v(9), v(22)), v(2));
        assert_eq!(shadow_number(v(2), v(9)), v(2));
        assert_eq!(shadow_number(v(22), v(9)), v(2));
        assert_eq!(shadow_number(v(9), v(5)), Reducible::Empty);
        assert_eq!(shadow_number(v(5), v(9)), Reducible::Empty);
        assert_eq!(shadow_number(v(9), v(9)), Reducible::Empty);
        assert_eq!(shadow_number(v(3), v(6)), v(9));
        assert_eq!(shadow_number(v(11), v(11)), v(22));
        assert_eq!(shadow_number(v(4), v(7)), v(11));
        assert_eq!(shadow_number(Reducible::Empty, v(5)), v(5));
        // 空值視為 0，與 9 配對仍為空
        assert_eq!(shadow_number(Reducible::Empty, v(9)), Reducible::Empty);
    }

    #[test]
    fn test_stage_number_november_keeps_eleven() {
        // 9 + 11 = 20 → 2；若先把 11 縮成 2 則會是 11
        assert_eq!(stage_number(v(9), 11), v(2));
        assert_eq!(stage_number(v(2), 11), v(4));
        assert_eq!(stage_number(v(2), 12), v(5));
        assert_eq!(stage_number(v(8), 3), v(11));
        assert_eq!(stage_number(Reducible::Empty, 10), v(1));
    }

    #[test]
    fn test_name_numbers() {
        // YAMADA: Y7 A1 M4 A1 D4 A1 = 18 → 9
        assert_eq!(lineage_number("YAMADA"), v(9));
        // TARO: 18 → 9
        assert_eq!(ego_number("TARO"), v(9));
        assert_eq!(social_number(v(9), v(9)), v(9));
        // 母音: A×3 = 3, A1 O6 = 7 → 10 → 1
        assert_eq!(soul_number("YAMADA", "TARO"), v(1));
        // 子音: Y7 M4 D4 = 15, T2 R9 = 11 → 26 → 8
        assert_eq!(appearance_number("YAMADA", "TARO"), v(8));
        // Y7 + T2 = 9
        assert_eq!(hidden_number("YAMADA", "TARO"), v(9));
        assert_eq!(hidden_number("", ""), v(0));
    }

    #[test]
    fn test_compute_all_yamada_taro() {
        let numbers = compute_all("YAMADA", "TARO", 1990, 5, 15);

        assert!(numbers.is_fully_populated());
        assert_eq!(numbers[Label::BirthI], v(3));
        assert_eq!(numbers[Label::BirthII], v(6));
        assert_eq!(numbers[Label::Shadow], v(9));
        assert_eq!(numbers[Label::Lineage], v(9));
        assert_eq!(numbers[Label::Ego], v(9));
        assert_eq!(numbers[Label::Social], v(9));
        // 3 + 9 = 12 → 3
        assert_eq!(numbers[Label::Mission], v(3));
        assert_eq!(numbers[Label::Soul], v(1));
        assert_eq!(numbers[Label::Appearance], v(8));
        // 8 + 5 = 13 → 4
        assert_eq!(numbers[Label::Stage], v(4));
        assert_eq!(numbers[Label::Hidden], v(9));
        assert_eq!(numbers[Label::Core], v(4));
    }

    #[test]
    fn test_compute_all_is_deterministic() {
        let first = compute_all("Suzuki", "Hanako", 1975, 11, 29);
        let second = compute_all("Suzuki", "Hanako", 1975, 11, 29);
        assert_eq!(first, second);
        assert_eq!(first.to_string_map(), second.to_string_map());
    }

    #[test]
    fn test_compute_all_blank_shadow() {
        // 2+0+0+0+7+1+8 = 18 → 9，日 18 → 9
        let numbers = compute_all("YAMADA", "TARO", 2000, 7, 18);
        assert_eq!(numbers[Label::BirthI], v(9));
        assert_eq!(numbers[Label::BirthII], v(9));
        assert_eq!(numbers[Label::Shadow], Reducible::Empty);
        assert_eq!(numbers.to_string_map()[2], ("影数", String::new()));
    }
}
