use anyhow::Context;
use clap::Parser;
use kazu_engine::utils::error::ErrorSeverity;
use kazu_engine::utils::logger;
use kazu_engine::{
    build_profile, render_profile, CliConfig, KazuError, OutputFormat, OutputSink, ProfileSource,
    SystemClock, TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting kazu");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 有設定檔時以設定檔為準，命令列只覆蓋輸出相關設定
    let (request, format, output_path) = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let toml = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            let format = if config.format != OutputFormat::default() {
                config.format
            } else {
                toml.output_format()
            };
            let output_path = config
                .output
                .clone()
                .or_else(|| toml.output_path().map(str::to_string));
            (toml.profile_request(), format, output_path)
        }
        None => (config.profile_request(), config.format, config.output.clone()),
    };

    let request = match request {
        Ok(request) => request,
        Err(e) => exit_with(&e),
    };
    tracing::info!("✅ Input validated: {} {} {}", request.last_name, request.first_name, request.birth_date);

    let profile = build_profile(&request, &SystemClock);
    let rendered = render_profile(&profile, format).context("failed to render profile")?;

    OutputSink::new(output_path.as_ref())
        .write(&rendered)
        .context("failed to write output")?;

    tracing::info!("✅ Calculation completed ({} format)", format);
    Ok(())
}

fn exit_with(e: &KazuError) -> ! {
    tracing::error!(
        "❌ Input rejected: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
