use crate::core::constituent::{compute_all, compute_for_date};
use crate::core::cycle::compute_nine_year_cycle;
use crate::domain::model::{Companion, CompanionInput, Profile, ProfileRequest};
use crate::domain::ports::TodayProvider;
use crate::utils::validation::{normalize_birth_date_input, normalize_name_input, parse_birth_date};

/// 關係鑑定最多可附帶的人數
pub const DEFAULT_MAX_COMPANIONS: usize = 10;

/// 組裝一份個人檔案：構成数、（舊姓的）構成数、9 年週期、同行者
pub fn build_profile(request: &ProfileRequest, today: &dyn TodayProvider) -> Profile {
    let date = &request.birth_date;
    let numbers = compute_for_date(&request.last_name, &request.first_name, date);

    // 舊姓有填且正規化後和現在的姓不同時才多算一組
    let maiden_last_name = request
        .maiden_last_name
        .as_deref()
        .map(normalize_name_input)
        .filter(|maiden| {
            !maiden.is_empty() && *maiden != normalize_name_input(&request.last_name)
        });
    let numbers_maiden = maiden_last_name
        .as_deref()
        .map(|maiden| compute_for_date(maiden, &request.first_name, date));

    let nine_year_cycle = compute_nine_year_cycle(
        date.year(),
        date.month(),
        date.day(),
        request.cycle_length,
        request.start_year,
        today,
    );

    let companions = compute_companions(&request.companions, request.max_companions);

    tracing::debug!(
        name = %format!("{} {}", request.last_name, request.first_name),
        maiden = numbers_maiden.is_some(),
        cycle_years = nine_year_cycle.len(),
        companions = companions.len(),
        "profile assembled"
    );

    Profile {
        name_display: format!("{} {}", request.last_name, request.first_name),
        birth_date: date.to_string(),
        numbers,
        maiden_last_name,
        numbers_maiden,
        nine_year_cycle,
        companions,
    }
}

/// 關係鑑定用：其他人的構成数。兩個名字都空白的略過，生日無法解析的不算數但保留，最多 `max` 人。
pub fn compute_companions(entries: &[CompanionInput], max: usize) -> Vec<Companion> {
    entries
        .iter()
        .filter_map(|entry| {
            let last_name = normalize_name_input(&entry.last_name);
            let first_name = normalize_name_input(&entry.first_name);
            if last_name.is_empty() && first_name.is_empty() {
                return None;
            }

            let birth_date = normalize_birth_date_input(&entry.birth_date);
            let numbers = match parse_birth_date(&birth_date) {
                Ok(date) => Some(compute_all(
                    &last_name,
                    &first_name,
                    date.year(),
                    date.month(),
                    date.day(),
                )),
                Err(e) => {
                    tracing::warn!("Skipping numbers for companion: {}", e);
                    None
                }
            };

            let name_display = format!("{} {}", last_name, first_name).trim().to_string();

            Some(Companion {
                last_name,
                first_name,
                birth_date,
                name_display,
                numbers,
            })
        })
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BirthDate, Label, Reducible};
    use crate::domain::ports::FixedDate;
    use chrono::NaiveDate;

    fn request(maiden: Option<&str>) -> ProfileRequest {
        ProfileRequest {
            last_name: "YAMADA".to_string(),
            first_name: "TARO".to_string(),
            maiden_last_name: maiden.map(str::to_string),
            birth_date: BirthDate::new(1990, 5, 15).unwrap(),
            start_year: None,
            cycle_length: 9,
            companions: Vec::new(),
            max_companions: DEFAULT_MAX_COMPANIONS,
        }
    }

    fn today() -> FixedDate {
        FixedDate(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn test_profile_without_maiden_name() {
        let profile = build_profile(&request(None), &today());

        assert_eq!(profile.name_display, "YAMADA TARO");
        assert_eq!(profile.birth_date, "1990/05/15");
        assert_eq!(profile.numbers[Label::BirthI], Reducible::Value(3));
        assert!(profile.numbers_maiden.is_none());
        assert!(profile.companions.is_empty());
        assert_eq!(profile.nine_year_cycle.len(), 7);
        assert_eq!(profile.nine_year_cycle[0].year, 2023);
    }

    #[test]
    fn test_profile_with_distinct_maiden_name() {
        let profile = build_profile(&request(Some("SATO")), &today());

        let maiden = profile.numbers_maiden.expect("maiden numbers");
        // S1 A1 T2 O6 = 10 → 1
        assert_eq!(maiden[Label::Lineage], Reducible::Value(1));
        assert_eq!(maiden[Label::BirthI], profile.numbers[Label::BirthI]);
        assert_eq!(profile.maiden_last_name.as_deref(), Some("SATO"));
    }

    #[test]
    fn test_profile_ignores_same_or_blank_maiden_name() {
        assert!(build_profile(&request(Some("YAMADA")), &today())
            .numbers_maiden
            .is_none());
        assert!(build_profile(&request(Some("  ")), &today())
            .numbers_maiden
            .is_none());
    }

    #[test]
    fn test_maiden_name_compared_after_normalization() {
        let profile = build_profile(&request(Some(" yamada ")), &today());
        assert!(profile.numbers_maiden.is_none());
        assert!(profile.maiden_last_name.is_none());

        let profile = build_profile(&request(Some("ｓａｔｏ")), &today());
        assert_eq!(profile.maiden_last_name.as_deref(), Some("SATO"));
        assert!(profile.numbers_maiden.is_some());
    }

    #[test]
    fn test_profile_with_pinned_cycle() {
        let mut req = request(None);
        req.start_year = Some(2022);
        req.cycle_length = 9;
        let profile = build_profile(&req, &today());
        assert_eq!(profile.nine_year_cycle.len(), 9);
        assert_eq!(profile.nine_year_cycle[8].year, 2030);
    }

    #[test]
    fn test_companions() {
        let entries = vec![
            CompanionInput {
                last_name: "suzuki".to_string(),
                first_name: "hanako".to_string(),
                birth_date: "1985-12-29".to_string(),
            },
            CompanionInput::default(),
            CompanionInput {
                last_name: "tanaka".to_string(),
                first_name: String::new(),
                birth_date: "not a date".to_string(),
            },
            CompanionInput {
                last_name: "ito".to_string(),
                first_name: "ken".to_string(),
                birth_date: "2000/01/01".to_string(),
            },
        ];

        let companions = compute_companions(&entries, 2);
        assert_eq!(companions.len(), 2);
        assert_eq!(companions[0].name_display, "SUZUKI HANAKO");
        assert_eq!(companions[0].birth_date, "1985/12/29");
        assert!(companions[0].numbers.is_some());
        assert_eq!(companions[1].name_display, "TANAKA");
        assert!(companions[1].numbers.is_none());
    }

    #[test]
    fn test_profile_carries_companions() {
        let mut req = request(None);
        req.companions = vec![CompanionInput {
            last_name: "sato".to_string(),
            first_name: "jiro".to_string(),
            birth_date: "1988/11/02".to_string(),
        }];
        let profile = build_profile(&req, &today());
        assert_eq!(profile.companions.len(), 1);
        assert_eq!(profile.companions[0].name_display, "SATO JIRO");
    }
}
