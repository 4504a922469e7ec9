use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate-config")]
#[command(about = "Generate scenario configuration for the commuting concept model")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML configuration file (default: generate-config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a full scenario under <output>/scenario/<ID>/
    Scenario {
        /// Scenario id; also offsets the random seed
        id: u64,
        /// Output root (overrides output.dir)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite an existing scenario directory
        #[arg(long)]
        force: bool,
    },
    /// Write only behaviours.json under the output root
    Behaviours {
        /// Output root (overrides output.dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the container build recipe
    Dockerfile {
        /// Directory to write Dockerfile and .dockerignore into; prints to stdout when absent
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}
