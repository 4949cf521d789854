use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod global;

pub use commands::{Commands, RunArgs, SchemaArgs};
pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `sheetsync` binary.
#[derive(Debug, Parser)]
#[command(
    name = "sheetsync",
    version,
    about = "Download a Google Sheet and save it as JSON"
)]
pub struct Cli {
    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, merged above the project config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory to write output files to; overrides `output.dir`
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}
