use anyhow::Result;
use chrono::NaiveDate;
use kazu_engine::{
    build_profile, render_profile, FixedDate, OutputFormat, OutputSink, ProfileSource, TomlConfig,
};
use tempfile::TempDir;

fn today() -> FixedDate {
    FixedDate(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
}

/// TOML 設定 → 個人檔案 → JSON 檔
#[test]
fn test_toml_profile_to_json_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap();
    let normalized_path = temp_path.replace('\\', "/");

    let config_content = format!(
        r#"
[person]
last_name = "Yamada"
first_name = "Taro"
maiden_last_name = "Sato"
birth_date = "1990-05-15"

[cycle]
start_year = 2022
length = 7

[output]
format = "json"
path = "{}/out/profile.json"
"#,
        normalized_path
    );

    let config_path = format!("{}/profile.toml", temp_path);
    std::fs::write(&config_path, config_content)?;

    let config = TomlConfig::from_file(&config_path)?;
    let request = config.profile_request()?;
    let profile = build_profile(&request, &today());
    let rendered = render_profile(&profile, config.output_format())?;

    OutputSink::new(config.output_path()).write(&rendered)?;

    let written = std::fs::read_to_string(temp_dir.path().join("out/profile.json"))?;
    let value: serde_json::Value = serde_json::from_str(&written)?;

    assert_eq!(value["name_display"], "YAMADA TARO");
    assert_eq!(value["birth_date"], "1990/05/15");
    assert_eq!(value["numbers"]["誕生数Ⅰ"], "3");
    assert_eq!(value["maiden_last_name"], "SATO");
    assert_eq!(value["numbers_maiden"]["家系数"], "1");
    assert_eq!(value["nine_year_cycle"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["nine_year_cycle"][6]["year"], 2028);

    Ok(())
}

/// 關係鑑定：最多人數與無效生日
#[test]
fn test_toml_companions_limit() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[person]
last_name = "YAMADA"
first_name = "TARO"
birth_date = "1990/05/15"

[output]
format = "tsv"
max_companions = 2

[[companions]]
last_name = "suzuki"
first_name = "hanako"
birth_date = "1985/12/29"

[[companions]]
last_name = ""
first_name = ""

[[companions]]
last_name = "tanaka"
birth_date = "1985/13/40"

[[companions]]
last_name = "ito"
first_name = "ken"
birth_date = "2000/01/01"
"#,
    )?;

    let profile = build_profile(&config.profile_request()?, &today());
    assert_eq!(profile.companions.len(), 2);
    assert!(profile.companions[1].numbers.is_none());

    let tsv = render_profile(&profile, OutputFormat::Tsv)?;
    assert!(tsv.contains("companion:SUZUKI HANAKO\t誕生数Ⅰ\t1\t"));
    assert!(!tsv.contains("companion:TANAKA"));

    Ok(())
}

#[test]
fn test_invalid_birth_date_is_rejected() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[person]
last_name = "YAMADA"
first_name = "TARO"
birth_date = "1899/12/31"
"#,
    )?;

    let err = config.profile_request().unwrap_err();
    assert!(err.user_friendly_message().contains("1900〜2100"));
    Ok(())
}
