//! Output files on disk.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use sheetsync_core::ErrorDocument;

/// Write `value` as JSON indented by four spaces, replacing `path`
/// atomically through a temporary file in the same directory.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let mut serializer =
            Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        writer.flush()?;
    }
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote {}", path.display());
    Ok(())
}

/// Delete an error file left over from an earlier failed run.
pub fn remove_stale(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed stale error file");
            Ok(())
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => {
            Err(error).with_context(|| format!("failed to remove {}", path.display()))
        }
    }
}

/// Log a failed run and record it in the error file. A failure to write the
/// error file is only logged.
pub fn report_failure(path: &Path, error: &anyhow::Error) {
    tracing::error!(error = %format!("{error:#}"), "sheetsync run failed");
    let doc = ErrorDocument::new(format!("{error:#}"), Utc::now());
    if let Err(write_error) = write_json(path, &doc) {
        tracing::error!(
            path = %path.display(),
            error = %format!("{write_error:#}"),
            "failed to write error file"
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn writes_four_space_indent_and_utf8() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sheet_backup.json");
        write_json(&path, &json!({"data": [{"Raum": "Süd"}]})).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "{\n    \"data\": [\n        {\n            \"Raum\": \"Süd\"\n        }\n    ]\n}"
        );
    }

    #[test]
    fn replaces_existing_file_and_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("timetable.json");
        write_json(&path, &json!({"a": 1})).unwrap();
        write_json(&path, &json!({"b": 2})).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, json!({"b": 2}));
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn remove_stale_ignores_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sheet_error.json");
        remove_stale(&path).unwrap();

        fs::write(&path, "{}").unwrap();
        remove_stale(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn report_failure_writes_error_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sheet_error.json");
        let error = anyhow::anyhow!("HTTP 404").context("failed to download sheet");
        report_failure(&path, &error);

        let doc: ErrorDocument = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc.status, "error");
        assert_eq!(doc.message, "failed to download sheet: HTTP 404");
    }
}
