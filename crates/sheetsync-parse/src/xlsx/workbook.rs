//! `xl/workbook.xml` and its relationships: which sheets exist, in which
//! order, and where their parts live.

use std::collections::HashMap;

use super::xml::{XmlEvent, attr, for_each_event};
use crate::error::ParseError;

pub(crate) const PART: &str = "xl/workbook.xml";
pub(crate) const RELS_PART: &str = "xl/_rels/workbook.xml.rels";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SheetEntry {
    pub name: String,
    /// Relationship id (`r:id`) pointing at the worksheet part.
    pub rel_id: String,
}

pub(crate) fn parse_sheet_list(xml: &[u8]) -> Result<Vec<SheetEntry>, ParseError> {
    let mut sheets = Vec::new();
    for_each_event(PART, xml, |event| {
        if let XmlEvent::Start(tag) = event
            && tag.local_name().as_ref() == b"sheet"
        {
            // `r:id` and `sheetId` differ in local name, so "id" is unambiguous
            match (attr(tag, b"name"), attr(tag, b"id")) {
                (Some(name), Some(rel_id)) => sheets.push(SheetEntry { name, rel_id }),
                _ => return Err(ParseError::xml(PART, "sheet without name or r:id")),
            }
        }
        Ok(())
    })?;
    Ok(sheets)
}

/// Relationship id -> part path inside the archive.
pub(crate) fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, ParseError> {
    let mut targets = HashMap::new();
    for_each_event(RELS_PART, xml, |event| {
        if let XmlEvent::Start(tag) = event
            && tag.local_name().as_ref() == b"Relationship"
            && let (Some(id), Some(target)) = (attr(tag, b"Id"), attr(tag, b"Target"))
        {
            targets.insert(id, resolve_target(&target));
        }
        Ok(())
    })?;
    Ok(targets)
}

/// Targets are relative to `xl/` unless absolute.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut parts: Vec<&str> = vec!["xl"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn lists_sheets_in_order() {
        let xml = br#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
  xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Monday" sheetId="1" r:id="rId3"/>
    <sheet name="Tue &amp; Wed" sheetId="2" r:id="rId4"/>
  </sheets>
</workbook>"#;
        let sheets = parse_sheet_list(xml).unwrap();
        assert_eq!(
            sheets,
            vec![
                SheetEntry { name: "Monday".into(), rel_id: "rId3".into() },
                SheetEntry { name: "Tue & Wed".into(), rel_id: "rId4".into() },
            ]
        );
    }

    #[test]
    fn sheet_without_rel_id_is_rejected() {
        let xml = br#"<workbook><sheets><sheet name="A" sheetId="1"/></sheets></workbook>"#;
        assert!(matches!(parse_sheet_list(xml), Err(ParseError::Xml { .. })));
    }

    #[test]
    fn relationships_resolve_to_archive_paths() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;
        let rels = parse_relationships(xml).unwrap();
        assert_eq!(rels["rId3"], "xl/worksheets/sheet1.xml");
        assert_eq!(rels["rId1"], "xl/styles.xml");
    }

    #[rstest]
    #[case("worksheets/sheet1.xml", "xl/worksheets/sheet1.xml")]
    #[case("/xl/worksheets/sheet2.xml", "xl/worksheets/sheet2.xml")]
    #[case("./worksheets/../worksheets/sheet3.xml", "xl/worksheets/sheet3.xml")]
    fn resolve_target_cases(#[case] target: &str, #[case] expected: &str) {
        assert_eq!(resolve_target(target), expected);
    }
}
