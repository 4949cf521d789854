use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use sheetsync_config::OutputMode;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Download the sheet and write the configured output (the default).
    Run(RunArgs),
    /// Write flat records (`sheet_backup.json`).
    Records(InputArgs),
    /// Write the structured timetable and its legend.
    Timetable(InputArgs),
    /// Commit and push the output files already on disk.
    Publish,
    /// Print a JSON Schema, or list the registered names.
    Schema(SchemaArgs),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    Records,
    Timetable,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Records => Self::Records,
            ModeArg::Timetable => Self::Timetable,
        }
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct InputArgs {
    /// Read an exported file instead of downloading the sheet
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct RunArgs {
    /// Output mode; overrides `output.mode`
    #[arg(short, long)]
    pub mode: Option<ModeArg>,

    #[command(flatten)]
    pub source: InputArgs,

    /// Commit the written files even if publishing is disabled in config
    #[arg(long, conflicts_with = "no_publish")]
    pub publish: bool,

    /// Never commit, whatever the config says
    #[arg(long)]
    pub no_publish: bool,
}

impl RunArgs {
    /// Explicit publish choice from the flags, `None` to follow config.
    #[must_use]
    pub const fn publish_override(&self) -> Option<bool> {
        if self.publish {
            Some(true)
        } else if self.no_publish {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. `timetable`; lists all names when omitted
    pub name: Option<String>,
}

impl Commands {
    /// The run arguments equivalent to this command, if it runs the pipeline.
    #[must_use]
    pub fn into_run_args(self) -> Option<RunArgs> {
        match self {
            Self::Run(args) => Some(args),
            Self::Records(source) => Some(RunArgs {
                mode: Some(ModeArg::Records),
                source,
                ..RunArgs::default()
            }),
            Self::Timetable(source) => Some(RunArgs {
                mode: Some(ModeArg::Timetable),
                source,
                ..RunArgs::default()
            }),
            Self::Publish | Self::Schema(_) => None,
        }
    }
}
