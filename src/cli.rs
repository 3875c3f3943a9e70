use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "webmfix")]
#[command(author, version, about = "Repair missing or zero durations in WebM recordings")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the correct duration into a WebM recording
    Fix {
        /// Recording to fix
        #[arg(required = true)]
        input: PathBuf,

        /// Real length of the recording in milliseconds
        #[arg(short, long, allow_negative_numbers = true)]
        duration_ms: f64,

        /// Output file (defaults to the input name with the configured suffix)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// MIME type of the exported recording
        #[arg(long)]
        mime_type: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the element tree of a WebM file
    Inspect {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
