use clap::Parser;
use sol_balance_check::core::batcher::batch_count;
use sol_balance_check::core::loader::parse_address_list;
use sol_balance_check::core::ConfigProvider;
use sol_balance_check::utils::{logger, validation::Validate};
use sol_balance_check::{BalancePipeline, EtlEngine, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "sol-balance-toml")]
#[command(about = "Balance checker driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "balance-check.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show the batch plan without querying the RPC endpoint
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no RPC requests will be sent");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    let storage = LocalStorage::new(".".to_string());
    let pipeline = BalancePipeline::new(storage, config)?;
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    if let Err(e) = engine.run().await {
        tracing::error!(
            "❌ Balance check failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  RPC: {} ({})", config.rpc_endpoint(), config.commitment());
    if let Some(timeout) = config.request_timeout() {
        println!("  Request timeout: {:?}", timeout);
    }
    println!("  Input: {}", config.input_file());
    println!(
        "  Batching: {} per batch, {}ms between batches",
        config.batch_size(),
        config.batch_delay().as_millis()
    );
    println!("  Output: {}", config.output_path());
    println!("  Write failures: {}", config.write_failures());
    println!();
}

fn perform_dry_run(config: &TomlConfig) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(config.input_file())?;
    let addresses = parse_address_list(&content);
    let batches = batch_count(addresses.len(), config.batch_size());
    let throttle_time = config.batch_delay() * batches.saturating_sub(1) as u32;

    println!("🔍 Dry Run Analysis:");
    println!("  Addresses: {}", addresses.len());
    println!("  Batches: {}", batches);
    println!("  Total throttle time: {:?}", throttle_time);
    println!();
    println!("✅ Dry run analysis complete.");

    Ok(())
}
