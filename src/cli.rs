use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "countries-to-sqlite")]
#[command(version, about = "Scrape country reference data into a SQLite lookup table")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every source and load all phases into a fresh database
    Build {
        /// Directory for intermediate JSON artifacts
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Output SQLite database path
        #[arg(long, default_value = "countries.db")]
        db: PathBuf,

        /// Admin-0 countries GeoJSON file (sovereignty source)
        #[arg(long, default_value = "ne_10m_admin_0_countries.json")]
        geojson: PathBuf,
    },

    /// Scrape sources into intermediate artifacts without touching the database
    Fetch {
        /// Source to fetch (default: all)
        #[arg(short, long)]
        source: Option<Source>,

        /// Directory for intermediate JSON artifacts
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Load phases from existing artifacts into the database
    Load {
        /// Phase to run (default: all, in order)
        #[arg(short, long)]
        phase: Option<Phase>,

        /// Directory holding intermediate JSON artifacts
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// SQLite database path
        #[arg(long, default_value = "countries.db")]
        db: PathBuf,

        /// Admin-0 countries GeoJSON file (sovereignty source)
        #[arg(long, default_value = "ne_10m_admin_0_countries.json")]
        geojson: PathBuf,
    },

    /// Compute map-label anchor points from country polygons
    Labels {
        /// Input admin-0 countries GeoJSON
        input: PathBuf,

        /// Output labels GeoJSON
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Codes,
    Population,
    Area,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Schema,
    Codes,
    Population,
    Area,
    Sovereignty,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
