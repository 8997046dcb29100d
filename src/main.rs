use clap::Parser;
use ecocharge::utils::error::ErrorSeverity;
use ecocharge::utils::{logger, validation::Validate};
use ecocharge::{CartTransformEngine, CartTransformInput, CliConfig, EcoFeeError, NO_CHANGES};
use std::io::{Read, Write};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Eco fee transform failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &CliConfig) -> Result<(), EcoFeeError> {
    let raw = match &config.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // 輸入格式錯誤時不阻擋結帳，直接輸出「無變更」
    let result = match serde_json::from_str::<CartTransformInput>(&raw) {
        Ok(input) => CartTransformEngine::new().run(&input),
        Err(e) => {
            tracing::warn!("Unreadable cart transform input, applying no fees: {}", e);
            std::borrow::Cow::Borrowed(&NO_CHANGES)
        }
    };

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    match &config.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("📁 Result saved to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
        }
    }

    tracing::info!("✅ {} line update(s) emitted", result.operations.len());
    Ok(())
}
