//! `xl/sharedStrings.xml`

use super::xml::{XmlEvent, for_each_event};
use crate::error::ParseError;

pub(crate) const PART: &str = "xl/sharedStrings.xml";

/// Parse the shared string table. Rich-text runs are concatenated; phonetic
/// hints (`rPh`) are dropped.
pub(crate) fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, ParseError> {
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_item = false;
    let mut in_text = false;
    let mut phonetic_depth = 0usize;

    for_each_event(PART, xml, |event| {
        match event {
            XmlEvent::Start(tag) => match tag.local_name().as_ref() {
                b"si" => {
                    in_item = true;
                    current.clear();
                }
                b"t" => in_text = in_item,
                b"rPh" => phonetic_depth += 1,
                _ => {}
            },
            XmlEvent::End(b"si") => {
                strings.push(std::mem::take(&mut current));
                in_item = false;
            }
            XmlEvent::End(b"t") => in_text = false,
            XmlEvent::End(b"rPh") => phonetic_depth = phonetic_depth.saturating_sub(1),
            XmlEvent::Text(text) if in_text && phonetic_depth == 0 => current.push_str(text),
            _ => {}
        }
        Ok(())
    })?;

    tracing::debug!(count = strings.len(), "parsed shared strings");
    Ok(strings)
}
