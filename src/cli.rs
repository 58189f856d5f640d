use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "matjip", version, about = "Venue post extraction and consensus reports")]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "SQLite url, overrides the configuration")]
    pub database_url: Option<String>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract venue fields and scores from one post body ("-" reads stdin)
    Extract { input: PathBuf },
    /// Analyze a JSON array of posts as one batch
    Analyze {
        input: PathBuf,
        #[arg(long, default_value = "batch")]
        venue: String,
    },
    /// Store a JSON array of posts under a venue
    Import {
        #[arg(long)]
        venue: String,
        input: PathBuf,
    },
    /// Build the consensus report for a stored venue
    Report {
        #[arg(long)]
        venue: String,
    },
    /// List stored venues
    Venues,
}
