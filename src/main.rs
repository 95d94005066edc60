//! search-rank CLI - reports where a site ranks on a search results page.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use search_rank::{AppSettings, RankChecker, SearchRequest};

/// search-rank - find a site's position in search engine results
#[derive(Parser)]
#[command(name = "search-rank")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file
    #[arg(short, long, global = true, env = "SEARCH_RANK_CONFIG", default_value = "appsettings.json")]
    config: PathBuf,

    /// Provider to use instead of the configured `SelectedHttpClient`
    #[arg(short, long, global = true, env = "SEARCH_RANK_PROVIDER")]
    provider: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and report the rank(s) of a site
    Check(CheckArgs),

    /// List configured search providers
    Providers,
}

#[derive(Parser)]
struct CheckArgs {
    /// Search keywords
    terms: String,

    /// Absolute URL of the site to look for
    url: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Rank string only
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut settings = AppSettings::from_file(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;
    if let Some(provider) = cli.provider {
        settings = settings.with_selected_provider(provider);
    }

    match cli.command {
        Commands::Check(args) => run_check(&settings, args).await,
        Commands::Providers => list_providers(&settings),
    }
}

fn list_providers(settings: &AppSettings) -> Result<()> {
    let selected = settings.selected_provider().ok();
    let providers = settings.providers();

    if providers.is_empty() {
        println!("No search providers configured.");
        return Ok(());
    }

    println!("Configured search providers:\n");
    for provider in providers {
        let marker = if selected == Some(provider.id.as_str()) { "*" } else { " " };
        println!(
            "  {} {:<16} {}",
            marker,
            provider.id,
            provider.base_address.as_deref().unwrap_or("(no base address)")
        );
        if provider.search_engine_name.is_some() {
            println!("      name: {}", provider.display_name());
        }
        if let Some(limit) = provider.result_limit() {
            println!("      max results: {}", limit);
        }
    }
    println!();
    println!("Usage: search-rank check \"keywords\" https://www.example.com -p <provider>");
    Ok(())
}

async fn run_check(settings: &AppSettings, args: CheckArgs) -> Result<()> {
    let request = SearchRequest::new(&args.terms, &args.url)?;
    let checker = RankChecker::from_settings(settings)?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let report = checker.check_cancellable(&request, &cancel).await?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nRank of {} for \"{}\" on {} ({}ms):\n",
                report.url, report.terms, report.provider, report.duration_ms
            );
            if report.found() {
                println!("  Positions: {}", report.rank_string());
            } else {
                println!("  Not found (0)");
            }
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Compact => {
            println!("{}", report.rank_string());
        }
    }

    Ok(())
}
