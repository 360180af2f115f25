mod config;
mod logging;
mod server;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use reservaplus::{build_store, static_catalog};
use reservaplus_onboarding::{HttpOnboardingResources, estimate_progress, needs_onboarding};

use crate::config::{AppConfig, CliOverrides};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// ReservaPlus Server - booking backend for plans, registrations and accounts
#[derive(Parser)]
#[command(name = "reservaplus-server")]
#[command(about = "ReservaPlus Server - booking backend for plans, registrations and accounts")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use the in-memory store instead of the configured backend
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
    /// Write the built-in plan catalog into the configured store
    SeedPlans,
    /// Estimate the onboarding step of an account from its API resources
    OnboardingProgress {
        /// Bearer token of the account to probe
        #[arg(long)]
        token: Option<String>,

        /// API base URL (overrides `onboarding.api_base_url`)
        #[arg(long)]
        base_url: Option<String>,

        /// Only report whether onboarding is still required
        #[arg(long)]
        needs_onboarding: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.to_string_lossy());
    }

    // 1) defaults -> 2) YAML (if provided) -> 3) env (RESERVAPLUS__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        mock: cli.mock,
        verbose: cli.verbose,
    });

    logging::init(&config.logging)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => server::run(config).await,
        Commands::Check => check_config(&config),
        Commands::SeedPlans => seed_plans(&config).await,
        Commands::OnboardingProgress {
            token,
            base_url,
            needs_onboarding,
        } => onboarding_progress(config, token, base_url, needs_onboarding).await,
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    reservaplus::TokenVerifier::from_config(&config.auth)?;
    println!("Configuration is valid");
    println!("{}", config.to_json()?);
    Ok(())
}

async fn seed_plans(config: &AppConfig) -> Result<()> {
    let module_cfg = config.module_config();
    let store = build_store(&module_cfg.store).await?;
    let service = server::build_service(store, &module_cfg);
    let written = service.seed_plans(&static_catalog()).await?;
    tracing::info!(written, "plan catalog seeded");
    println!("Seeded {written} plans");
    Ok(())
}

async fn onboarding_progress(
    mut config: AppConfig,
    token: Option<String>,
    base_url: Option<String>,
    only_needs: bool,
) -> Result<()> {
    if let Some(url) = base_url {
        config.onboarding.api_base_url = url;
    }
    let resources = HttpOnboardingResources::new(&config.onboarding, token)?;
    if only_needs {
        println!("{}", needs_onboarding(&resources).await);
    } else {
        let progress = estimate_progress(&resources).await;
        println!("{}", serde_json::to_string(&progress)?);
    }
    Ok(())
}
