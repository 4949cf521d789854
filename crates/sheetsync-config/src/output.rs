//! Output files and run mode.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which document a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// CSV export -> flat list of row records.
    #[default]
    Records,
    /// XLSX export -> sheet/room/slot timetable.
    Timetable,
}

impl OutputMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Records => "records",
            Self::Timetable => "timetable",
        }
    }
}

fn default_dir() -> String {
    String::from(".")
}

fn default_records_file() -> String {
    String::from("sheet_backup.json")
}

fn default_timetable_file() -> String {
    String::from("timetable.json")
}

fn default_legend_file() -> String {
    String::from("timetable_legend.json")
}

fn default_error_file() -> String {
    String::from("sheet_error.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory the JSON files are written to.
    #[serde(default = "default_dir")]
    pub dir: String,

    #[serde(default)]
    pub mode: OutputMode,

    #[serde(default = "default_records_file")]
    pub records_file: String,

    #[serde(default = "default_timetable_file")]
    pub timetable_file: String,

    #[serde(default = "default_legend_file")]
    pub legend_file: String,

    /// Written instead of the regular output when a run fails.
    #[serde(default = "default_error_file")]
    pub error_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            mode: OutputMode::default(),
            records_file: default_records_file(),
            timetable_file: default_timetable_file(),
            legend_file: default_legend_file(),
            error_file: default_error_file(),
        }
    }
}

impl OutputConfig {
    #[must_use]
    pub fn dir(&self) -> &Path {
        Path::new(&self.dir)
    }

    #[must_use]
    pub fn records_path(&self) -> PathBuf {
        self.dir().join(&self.records_file)
    }

    #[must_use]
    pub fn timetable_path(&self) -> PathBuf {
        self.dir().join(&self.timetable_file)
    }

    #[must_use]
    pub fn legend_path(&self) -> PathBuf {
        self.dir().join(&self.legend_file)
    }

    #[must_use]
    pub fn error_path(&self) -> PathBuf {
        self.dir().join(&self.error_file)
    }

    /// Files a run in `mode` writes on success.
    #[must_use]
    pub fn paths_for(&self, mode: OutputMode) -> Vec<PathBuf> {
        match mode {
            OutputMode::Records => vec![self.records_path()],
            OutputMode::Timetable => vec![self.timetable_path(), self.legend_path()],
        }
    }
}
