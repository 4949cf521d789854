//! Serde roundtrip and JsonSchema validation tests for the output documents.

use chrono::{TimeZone, Utc};
use schemars::schema_for;
use serde_json::json;
use sheetsync_core::responses::{PublishSummary, RunSummary};
use sheetsync_core::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_entry() -> ClassEntry {
    let mut entry = ClassEntry::new(
        "Chemistry\nLab B",
        "D5",
        CellStyle {
            fill: Some("#FFD966".into()),
            font_color: Some("#000000".into()),
            bold: true,
            italic: false,
        },
    );
    entry.span = 2;
    entry.legend = Some("Science".into());
    entry
}

fn sample_timetable() -> Timetable {
    let mut second = sample_entry();
    second.continuation = true;

    let mut room = RoomSchedule::new();
    room.insert("10:00-11:00", vec![sample_entry()]);
    room.insert("11:00-12:00", vec![second]);
    room.insert("08:00-09:00", Vec::new());

    let mut sheet = SheetSchedule::new();
    sheet.insert("Lab 2", room);
    sheet.insert("Hall A", RoomSchedule::new());

    let mut timetable = Timetable::new();
    timetable.insert("Tuesday", sheet);
    timetable
}

roundtrip_and_validate!(
    records_document_roundtrip,
    RecordsDocument,
    RecordsDocument::new(
        vec![
            json!({"Name": "Zoë", "Score": 9.5, "Active": true, "Notes": null})
                .as_object()
                .cloned()
                .unwrap(),
        ],
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
    )
);

roundtrip_and_validate!(
    error_document_roundtrip,
    ErrorDocument,
    ErrorDocument::new(
        "HTTP error: connection refused",
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
    )
);

roundtrip_and_validate!(class_entry_roundtrip, ClassEntry, sample_entry());

roundtrip_and_validate!(timetable_roundtrip, Timetable, sample_timetable());

roundtrip_and_validate!(legend_document_roundtrip, LegendDocument, {
    let mut doc = LegendDocument::new();
    doc.insert(
        "Tuesday",
        vec![LegendGroup {
            color: "#FFD966".into(),
            label: "Science".into(),
            legend_cell: "H2".into(),
            entries: vec!["D5".into()],
        }],
    );
    doc
});

roundtrip_and_validate!(
    run_summary_roundtrip,
    RunSummary,
    RunSummary {
        mode: "records".into(),
        source: "https://docs.google.com/spreadsheets/d/abc/export?format=csv".into(),
        last_updated: "2025-01-02 03:04:05 UTC".into(),
        rows: 12,
        sheets: 0,
        rooms: 0,
        entries: 0,
        files: vec!["sheet_backup.json".into()],
        publish: PublishSummary::Committed {
            commit: "3f2a9c1".into(),
            pushed: false,
        },
    }
);

#[test]
fn timetable_roundtrip_keeps_room_order() {
    let json = serde_json::to_string(&sample_timetable()).unwrap();
    let recovered: Timetable = serde_json::from_str(&json).unwrap();
    let rooms: Vec<&str> = recovered.get("Tuesday").unwrap().keys().collect();
    assert_eq!(rooms, vec!["Lab 2", "Hall A"]);
}
