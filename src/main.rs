use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use storm_risk_dashboard::api::HttpFeedClient;
use storm_risk_dashboard::export::{build_export, write_artifact};
use storm_risk_dashboard::loader::load_dashboard_data;
use storm_risk_dashboard::models::{Config, DashboardData};
use storm_risk_dashboard::storm::{closest_to_track, StormCategory};
use storm_risk_dashboard::styling::RiskClass;
use storm_risk_dashboard::ui;

#[derive(Parser)]
#[command(author, version, about = "Storm risk dashboard for Bangladesh sub-districts", long_about = None)]
struct Cli {
    /// Override DASHBOARD_BASE_URL
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal dashboard (default)
    Dashboard,
    /// Load the feeds and write the sub-district CSV export
    Export {
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Print summary statistics and risk distribution
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            // Keep log lines off the alternate screen
            init_logging("storm_risk_dashboard=error")?;
            ui::run_app(&config).await?;
        }
        Commands::Export { output_dir } => {
            init_logging(&config.log_filter)?;
            let data = load(&config).await?;
            let artifact = build_export(&data)?;
            let dir = output_dir.unwrap_or_else(|| config.export_dir.clone());
            let path = write_artifact(&artifact, &dir)?;
            println!("✅ Exported {} sub-districts to {}", artifact.row_count, path.display());
        }
        Commands::Summary => {
            init_logging(&config.log_filter)?;
            let data = load(&config).await?;
            print_summary(&data);
        }
    }

    Ok(())
}

fn init_logging(filter: &str) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_new(filter).context("Invalid LOG_FILTER")?)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")
}

async fn load(config: &Config) -> Result<DashboardData> {
    info!("📋 Loading feeds from {}", config.base_url);
    let client = HttpFeedClient::new(config)?;
    match load_dashboard_data(&client).await {
        Ok(data) => Ok(data),
        Err(failure) => {
            error!("Error loading data: {}", failure);
            eprintln!("❌ {}", failure.user_message());
            std::process::exit(1);
        }
    }
}

fn print_summary(data: &DashboardData) {
    let s = &data.summary;
    println!();
    println!("📊 SUMMARY STATISTICS");
    println!("=====================");
    println!("Sub-districts:           {}", s.total_districts);
    println!("High-risk sub-districts: {}", s.high_risk_districts);
    println!("Health facilities:       {}", s.total_health_facilities);
    println!("Education facilities:    {}", s.total_education_facilities);

    println!();
    println!("Storm risk score distribution:");
    for class in RiskClass::ALL.iter().rev() {
        let count = data.districts.iter().filter(|d| d.risk_class == *class).count();
        println!("  {} {:<10} {:>6}", class.score(), class.label(), count);
    }

    if let Some(peak) = data
        .storm_track
        .iter()
        .filter_map(|p| p.max_sustained_wind)
        .fold(None, |max: Option<f64>, w| Some(max.map_or(w, |m| m.max(w))))
    {
        println!();
        println!("Storm track: {} points, peak wind {:.0} mph ({})",
                 data.storm_track.len(), peak, StormCategory::classify(peak).label());
    }

    let closest = closest_to_track(&data.districts, 5);
    if !closest.is_empty() {
        println!();
        println!("Top {} closest sub-districts to storm track:", closest.len());
        for district in closest {
            println!(
                "  {:<24} {:>8.1} km  {}",
                district.names.sub_district,
                district.distance_to_storm_km.unwrap_or_default(),
                district.distance_class_label().unwrap_or_default()
            );
        }
    }
}
