mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use consensus::ConsensusAnalyzer;
use database::{PostRepository, SqlitePostStore};
use extractor::{extract_review_scores, extract_venue_info, MENU_MAIN_KEY};
use matjip_core::{AppConfig, CoreError, ErrorReporter, ExtractedVenueInfo, Post, ReviewScore};
use report_service::{build_report, VenueReport, VenueReportService};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct Extraction {
    info: ExtractedVenueInfo,
    reviews: Vec<ReviewScore>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "Starting matjip");

    if let Err(e) = run(&cli, &config).await {
        ErrorReporter::new().report_error(&e);
        return Err(e.into());
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig, CoreError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    }
    .apply_env_overrides();
    if let Some(url) = &cli.database_url {
        config.database_url = Some(url.clone());
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: &Cli, config: &AppConfig) -> Result<(), CoreError> {
    match &cli.command {
        Commands::Extract { input } => {
            let content = read_input(input)?;
            let extraction = Extraction {
                info: extract_venue_info(&content),
                reviews: extract_review_scores(&content),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&extraction)?);
            } else {
                print_extraction(&extraction);
            }
        }
        Commands::Analyze { input, venue } => {
            let posts = read_posts(input)?;
            let analyzer = ConsensusAnalyzer::new(config.analysis.clone());
            let report = build_report(venue, &posts, &analyzer);
            print_report(&report, cli.json)?;
        }
        Commands::Import { venue, input } => {
            let posts = read_posts(input)?;
            let store = open_store(config).await?;
            let service = VenueReportService::new(&store, config.analysis.clone());
            let summary = service.import_posts(venue, &posts).await;
            store.close().await;
            let summary = summary?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "stored {} posts for {} ({} already stored)",
                    summary.stored, venue, summary.skipped
                );
            }
        }
        Commands::Report { venue } => {
            let store = open_store(config).await?;
            let service = VenueReportService::new(&store, config.analysis.clone());
            let report = service.report_for_venue(venue).await;
            store.close().await;
            print_report(&report?, cli.json)?;
        }
        Commands::Venues => {
            let store = open_store(config).await?;
            let venues = store.venues().await;
            store.close().await;
            let venues = venues?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&venues)?);
            } else {
                for venue in venues {
                    println!("{}", venue);
                }
            }
        }
    }
    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<SqlitePostStore, CoreError> {
    let url = config.require_database_url()?;
    let mut store = SqlitePostStore::new(url.to_string());
    store.connect().await?;
    store.run_migrations().await?;
    Ok(store)
}

fn read_input(path: &Path) -> Result<String, CoreError> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn read_posts(path: &Path) -> Result<Vec<Post>, CoreError> {
    let raw = read_input(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_extraction(extraction: &Extraction) {
    let info = &extraction.info;
    println!("name: {}", info.name);
    let fields = [
        ("address", &info.address),
        ("phone", &info.phone),
        ("hours", &info.hours),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }
    if let Some(menu) = &info.menu {
        for (item, price) in menu {
            if item == MENU_MAIN_KEY {
                println!("menu: {}", price);
            } else {
                println!("menu price: {} {}", item, price);
            }
        }
    }
    for review in &extraction.reviews {
        println!("{}: {}", review.category, review.score);
    }
}

fn print_report(venue: &VenueReport, json: bool) -> Result<(), CoreError> {
    if json {
        println!("{}", serde_json::to_string_pretty(venue)?);
        return Ok(());
    }

    let report = &venue.report;
    println!("venue: {} ({})", venue.venue, venue.info.name);
    println!("posts: {}", report.post_count);
    println!("overall score: {:.2}", report.overall_score);
    let sections = [
        ("DO", &report.do_points),
        ("DONT", &report.dont_points),
        ("warnings", &report.warnings),
    ];
    for (title, points) in sections {
        println!("{}:", title);
        for point in points {
            println!("  - {}", point);
        }
    }
    for summary in &report.category_summaries {
        println!(
            "{}: {:.1} over {} reviews ({:?})",
            summary.category, summary.average, summary.count, summary.band
        );
    }
    Ok(())
}
