//! The export pipeline: fetch -> parse -> transform -> write -> publish.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use sheetsync_config::{OutputMode, SyncConfig, TimetableConfig};
use sheetsync_core::{RecordsDocument, format_timestamp};
use sheetsync_core::responses::{PublishSummary, RunSummary};
use sheetsync_fetch::{ExportFormat, SheetClient, read_local, sheet_export_url};
use sheetsync_parse::{parse_csv, parse_xlsx};
use sheetsync_transform::{TimetableOptions, extract_timetable, to_records};

use crate::bootstrap;
use crate::cli::{GlobalFlags, RunArgs};
use crate::commands::publish::publish_files;
use crate::output::output;
use crate::write;

/// Handle `sheetsync [run|records|timetable]`. Any failure is recorded in the
/// error file before it is returned.
pub async fn handle(args: &RunArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = match bootstrap::load_config(flags) {
        Ok(config) => config,
        Err(error) => {
            write::report_failure(&bootstrap::fallback_output(flags).error_path(), &error);
            return Err(error);
        }
    };

    match execute(&config, args, Utc::now()).await {
        Ok(summary) => output(&summary, flags.format),
        Err(error) => {
            write::report_failure(&config.output.error_path(), &error);
            Err(error)
        }
    }
}

pub async fn execute(
    config: &SyncConfig,
    args: &RunArgs,
    at: DateTime<Utc>,
) -> anyhow::Result<RunSummary> {
    let mode = args.mode.map_or(config.output.mode, OutputMode::from);
    let format = match mode {
        OutputMode::Records => ExportFormat::Csv,
        OutputMode::Timetable => ExportFormat::Xlsx,
    };
    let (source, bytes) = load_source(config, args.source.input.as_deref(), format).await?;

    let mut summary = RunSummary {
        mode: mode.as_str().to_string(),
        source,
        last_updated: format_timestamp(at),
        rows: 0,
        sheets: 0,
        rooms: 0,
        entries: 0,
        files: Vec::new(),
        publish: PublishSummary::Skipped {
            reason: "publishing disabled".into(),
        },
    };

    let files = match mode {
        OutputMode::Records => {
            let table = parse_csv(&bytes).context("failed to read CSV export")?;
            let records = to_records(&table);
            tracing::info!(rows = records.len(), "loaded {} rows", records.len());
            summary.rows = count(records.len());

            let path = config.output.records_path();
            write::write_json(&path, &RecordsDocument::new(records, at))?;
            vec![path]
        }
        OutputMode::Timetable => {
            let workbook = parse_xlsx(&bytes).context("failed to read XLSX export")?;
            let extracted = extract_timetable(&workbook, &timetable_options(&config.timetable)?);
            summary.sheets = count(workbook.sheets.len());
            summary.rooms = count(extracted.room_count());
            summary.entries = count(extracted.entry_count());

            let timetable_path = config.output.timetable_path();
            let legend_path = config.output.legend_path();
            write::write_json(&timetable_path, &extracted.timetable)?;
            write::write_json(&legend_path, &extracted.legend)?;
            vec![timetable_path, legend_path]
        }
    };
    write::remove_stale(&config.output.error_path())?;
    summary.files = files.iter().map(|p| p.display().to_string()).collect();

    if args.publish_override().unwrap_or(config.publish.enabled) {
        summary.publish = publish_files(config, &files)?;
    }
    Ok(summary)
}

async fn load_source(
    config: &SyncConfig,
    input: Option<&Path>,
    format: ExportFormat,
) -> anyhow::Result<(String, Vec<u8>)> {
    if let Some(path) = input {
        let bytes = read_local(path)?;
        return Ok((path.display().to_string(), bytes));
    }

    let url = sheet_export_url(&config.sheet, format);
    let client = SheetClient::new(&config.fetch)?;
    let bytes = client
        .download(&url, format)
        .await
        .with_context(|| format!("failed to download {url}"))?;
    Ok((url, bytes))
}

fn timetable_options(config: &TimetableConfig) -> anyhow::Result<TimetableOptions> {
    let min_slot_columns = usize::try_from(config.min_slot_columns)?;
    Ok(TimetableOptions::new(min_slot_columns, &config.ignore_fills)?)
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sheetsync_schema::SchemaRegistry;

    use super::*;
    use crate::cli::commands::{InputArgs, ModeArg};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn config_in(dir: &Path) -> SyncConfig {
        let mut config = SyncConfig::default();
        config.output.dir = dir.to_string_lossy().into_owned();
        config
    }

    fn local(input: PathBuf, mode: Option<ModeArg>) -> RunArgs {
        RunArgs {
            mode,
            source: InputArgs { input: Some(input) },
            ..RunArgs::default()
        }
    }

    fn git(dir: &Path, args: &[&str]) -> String {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("git should run");
        assert!(output.status.success(), "git {} failed", args.join(" "));
        String::from_utf8_lossy(&output.stdout).trim().to_owned()
    }

    #[tokio::test]
    async fn records_run_writes_document_and_clears_error_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("export.csv");
        fs::write(&input, "Course,Seats\nCS101,30\nMA201,\n").unwrap();
        let config = config_in(dir.path());
        fs::write(config.output.error_path(), "{}").unwrap();

        let summary = execute(&config, &local(input.clone(), None), fixed_time())
            .await
            .unwrap();

        assert_eq!(summary.mode, "records");
        assert_eq!(summary.source, input.display().to_string());
        assert_eq!(summary.rows, 2);
        assert_eq!(
            summary.files,
            vec![config.output.records_path().display().to_string()]
        );
        assert!(matches!(summary.publish, PublishSummary::Skipped { .. }));
        assert!(!config.output.error_path().exists());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.output.records_path()).unwrap())
                .unwrap();
        assert_eq!(
            written,
            json!({
                "last_updated": "2025-03-14 09:26:53 UTC",
                "data": [
                    {"Course": "CS101", "Seats": 30},
                    {"Course": "MA201", "Seats": null}
                ]
            })
        );
        let registry = SchemaRegistry::new();
        assert!(registry.validate("records_document", &written).is_ok());
        assert!(
            registry
                .validate("run_summary", &serde_json::to_value(&summary).unwrap())
                .is_ok()
        );
    }

    #[tokio::test]
    async fn timetable_mode_rejects_csv_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("export.csv");
        fs::write(&input, "a,b\n1,2\n").unwrap();
        let config = config_in(dir.path());

        let error = execute(&config, &local(input, Some(ModeArg::Timetable)), fixed_time())
            .await
            .unwrap_err();
        assert!(format!("{error:#}").starts_with("failed to read XLSX export"));
        assert!(!config.output.timetable_path().exists());
    }

    #[tokio::test]
    async fn missing_input_fails_before_writing() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_in(dir.path());

        let result = execute(&config, &local(dir.path().join("nope.csv"), None), fixed_time()).await;
        assert!(result.is_err());
        assert!(!config.output.records_path().exists());
    }

    #[tokio::test]
    async fn publish_flag_commits_output() {
        let dir = tempfile::TempDir::new().unwrap();
        git(dir.path(), &["init", "--initial-branch=main"]);
        git(dir.path(), &["config", "user.email", "test@sheetsync.dev"]);
        git(dir.path(), &["config", "user.name", "Sheetsync Test"]);
        git(dir.path(), &["config", "commit.gpgsign", "false"]);
        fs::write(dir.path().join("README.md"), "# data\n").unwrap();
        git(dir.path(), &["add", "README.md"]);
        git(dir.path(), &["commit", "-m", "initial commit"]);

        let input = dir.path().join("export.csv");
        fs::write(&input, "a\n1\n").unwrap();
        let mut config = config_in(dir.path());
        config.publish.push = false;
        let args = RunArgs {
            publish: true,
            ..local(input, None)
        };

        let summary = execute(&config, &args, fixed_time()).await.unwrap();
        let head = git(dir.path(), &["rev-parse", "HEAD"]);
        assert_eq!(
            summary.publish,
            PublishSummary::Committed {
                commit: head,
                pushed: false
            }
        );
        assert_eq!(
            git(dir.path(), &["show", "--name-only", "--format=", "HEAD"]),
            "sheet_backup.json"
        );
    }

    #[test]
    fn timetable_options_follow_config() {
        let config = TimetableConfig {
            min_slot_columns: 3,
            ignore_fills: vec!["#ffffff".into()],
        };
        let options = timetable_options(&config).unwrap();
        assert_eq!(options.min_slot_columns, 3);
        assert_eq!(options.ignore_fills, vec!["#FFFFFF"]);
    }
}
