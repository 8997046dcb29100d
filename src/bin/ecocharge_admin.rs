use clap::{Parser, Subcommand};
use ecocharge::core::jurisdiction::JurisdictionCode;
use ecocharge::core::schedule;
use ecocharge::domain::ports::AdminConfigProvider;
use ecocharge::utils::error::{EcoFeeError, ErrorSeverity};
use ecocharge::utils::{logger, validation::Validate};
use ecocharge::{AdminToml, GraphqlAdminClient, SettingsService};

#[derive(Parser)]
#[command(name = "ecocharge-admin")]
#[command(about = "Manage the EcoCharge jurisdiction setting and cart transform")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "ecocharge.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show what would happen without calling the admin API
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the saved jurisdiction and cart transform status
    Show,
    /// Save the store compliance province (AB, BC or SK)
    Save { province: String },
    /// Activate the cart transform (no-op when already active)
    Activate,
    /// Infer a province from the store's first location
    Bootstrap,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match AdminToml::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No admin API calls will be made");
        perform_dry_run(&config, &args.command);
        return Ok(());
    }

    let client = GraphqlAdminClient::from_config(&config)?;
    let service = SettingsService::new(client, config);

    if let Err(e) = execute(&service, &args.command).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4, // 輸入錯誤
            ErrorSeverity::Medium => 2, // 重試錯誤
            ErrorSeverity::High => 1, // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn execute(
    service: &SettingsService<GraphqlAdminClient, AdminToml>,
    command: &Command,
) -> Result<(), EcoFeeError> {
    match command {
        Command::Show => {
            let snapshot = service.snapshot().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Save { province } => {
            let code = service.save_jurisdiction(province).await?;
            println!("✅ Province compliance was updated to {}", code);
        }
        Command::Activate => {
            let provisioned = service.activate().await?;
            if provisioned.was_created() {
                println!("✅ EcoCharge was enabled successfully.");
            } else {
                println!("✅ EcoCharge is already enabled.");
            }
            println!("Cart Transform ID: {}", provisioned.id());
        }
        Command::Bootstrap => {
            let report = service.bootstrap().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn perform_dry_run(config: &AdminToml, command: &Command) {
    println!("🔍 Dry Run Analysis:");
    println!("  Endpoint: {}", config.endpoint());
    println!("  Function: {} ({})", config.function_title(), config.function_api_type());
    println!(
        "  Metafield: {}.{}",
        config.metafield_namespace(),
        config.metafield_key()
    );
    println!("  Block on failure: {}", config.block_on_failure());

    match command {
        Command::Show => println!("  Would read the saved province and transform status"),
        Command::Save { province } => {
            match province.trim().parse::<JurisdictionCode>() {
                Ok(code) if code.is_enabled() => {
                    println!(
                        "  Would save {} ({})",
                        code,
                        schedule::lookup(code).label
                    );
                }
                _ => println!("  ⚠️ '{}' would be rejected: Invalid province selected.", province),
            }
        }
        Command::Activate => {
            println!("  Would look up an existing cart transform and create one only if missing")
        }
        Command::Bootstrap => println!("  Would read the first location address"),
    }
}
