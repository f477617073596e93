//! CLI module for Satsang.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Satsang - Multilingual Spiritual Guidance
///
/// A question-answering service grounded in Sai Baba's teachings,
/// supporting English, Hindi, Telugu, and Kannada. The name "Satsang"
/// is the Sanskrit word for a gathering in search of truth.
#[derive(Parser, Debug)]
#[command(name = "satsang")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a question from the command line
    Ask {
        /// The question to ask
        question: String,

        /// Answer language (en, hi, te, kn); detected from the question if omitted
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Load the teaching corpus, embed it, and rebuild the index
    Ingest {
        /// Folder containing .txt teaching files (defaults to configured folder)
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
