pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "glossgraph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build a sense relation graph and generate definition prompts for undefined senses", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to the user config directory)
    #[arg(short, long, global = true, env = "GLOSSGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a configuration file pointing at the dataset files
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long, default_value = "false")]
        force: bool,

        /// Directory containing the dataset (storage/ and relacje-jednostek/)
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },

    /// Ingest the relation files and export the deduplicated graph
    Build {
        /// Export format
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the definition prompt for one sense
    Prompt {
        /// Canonical sense identifier
        sense: String,
    },

    /// Generate prompts for every undefined sense as JSON Lines
    Prompts {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only senses with at least this many relations
        #[arg(long, default_value = "0")]
        min_degree: usize,

        /// Include undefined senses from the mapping that have no relations
        #[arg(long, default_value = "false")]
        all_senses: bool,

        /// Stop after this many prompts
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show graph statistics and definition coverage
    Stats,

    /// List ordered sense pairs carrying all of the given relation types
    Edges {
        /// Relation type (repeat to require several)
        #[arg(short = 't', long = "type", required = true)]
        types: Vec<String>,
    },

    /// Show the relations of one sense in both directions
    Neighbors {
        /// Canonical sense identifier
        sense: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}
