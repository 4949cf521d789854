//! Thin event layer over quick-xml shared by the workbook part readers.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ParseError;

pub(crate) enum XmlEvent<'a> {
    /// Opening tag. Self-closing tags produce `Start` then `End`.
    Start(&'a BytesStart<'a>),
    /// Local name of a closing tag.
    End(&'a [u8]),
    /// Text content with entities resolved.
    Text(&'a str),
}

/// Stream the events of one XML part into `handle`.
pub(crate) fn for_each_event<F>(part: &str, xml: &[u8], mut handle: F) -> Result<(), ParseError>
where
    F: FnMut(XmlEvent<'_>) -> Result<(), ParseError>,
{
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => handle(XmlEvent::Start(e))?,
            Ok(Event::Empty(ref e)) => {
                handle(XmlEvent::Start(e))?;
                handle(XmlEvent::End(e.local_name().as_ref()))?;
            }
            Ok(Event::End(ref e)) => handle(XmlEvent::End(e.local_name().as_ref()))?,
            Ok(Event::Text(ref t)) => {
                let text = unescape(&String::from_utf8_lossy(t));
                handle(XmlEvent::Text(&text))?;
            }
            Ok(Event::CData(ref t)) => handle(XmlEvent::Text(&String::from_utf8_lossy(t)))?,
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(text) = resolve_entity(&String::from_utf8_lossy(r)) {
                    handle(XmlEvent::Text(&text))?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::xml(part, e)),
            Ok(_) => {}
        }
        buf.clear();
    }
    Ok(())
}

/// Value of the attribute with the given local name (prefix ignored).
pub(crate) fn attr(tag: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    tag.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .map(|a| unescape(&String::from_utf8_lossy(&a.value)))
}

pub(crate) fn attr_usize(tag: &BytesStart<'_>, name: &[u8]) -> Option<usize> {
    attr(tag, name).and_then(|v| v.trim().parse().ok())
}

/// Boolean attribute: absent means `default`, `0`/`false` mean false.
pub(crate) fn attr_flag(tag: &BytesStart<'_>, name: &[u8], default: bool) -> bool {
    attr(tag, name).map_or(default, |v| !matches!(v.trim(), "0" | "false"))
}

fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            return char::from_u32(code).map(String::from);
        }
    };
    Some(resolved.to_string())
}

/// Resolve `&name;` references; unknown references are kept verbatim.
pub(crate) fn unescape(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|semi| Some((semi, resolve_entity(&tail[1..semi])?))) {
            Some((semi, text)) => {
                out.push_str(&text);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
