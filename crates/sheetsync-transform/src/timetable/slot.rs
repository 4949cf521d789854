//! Time slot header recognition.

use std::fmt;

use chrono::NaiveTime;

/// A time slot header: a start time and an optional end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
}

impl TimeSlot {
    /// `HH:MM` or `HH:MM-HH:MM`, 24-hour clock.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.format("%H:%M"))?;
        if let Some(end) = self.end {
            write!(f, "-{}", end.format("%H:%M"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy)]
struct Clock {
    hour: u32,
    minute: u32,
    meridiem: Option<Meridiem>,
}

impl Clock {
    fn to_time(self, meridiem: Option<Meridiem>) -> Option<NaiveTime> {
        let hour = match meridiem {
            None => self.hour,
            Some(_) if self.hour == 0 || self.hour > 12 => return None,
            Some(Meridiem::Am) => self.hour % 12,
            Some(Meridiem::Pm) => self.hour % 12 + 12,
        };
        NaiveTime::from_hms_opt(hour, self.minute, 0)
    }
}

/// Recognise a time slot header such as `8:00`, `08.30`, `9am`,
/// `1:00 - 2:00 PM` or `13:00 to 14:30`.
///
/// The whole text must be a time or a range of two times; anything else
/// (room names, class text) returns `None`.
#[must_use]
pub fn parse_time_slot(text: &str) -> Option<TimeSlot> {
    let normalised = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace(" to ", "-");
    if normalised.is_empty() {
        return None;
    }

    let mut parts = normalised.split('-');
    let first = parse_clock(parts.next()?)?;
    let second = match parts.next() {
        Some(part) => Some(parse_clock(part)?),
        None => None,
    };
    if parts.next().is_some() {
        return None;
    }

    let Some(second) = second else {
        return Some(TimeSlot {
            start: first.to_time(first.meridiem)?,
            end: None,
        });
    };

    let end = second.to_time(second.meridiem)?;
    let start = match (first.meridiem, second.meridiem) {
        // "1:00-2:00 pm": the start shares the end's meridiem unless that
        // would put it after the end ("11:00-1:00 pm")
        (None, Some(m)) if first.hour <= 12 && first.hour > 0 => match first.to_time(Some(m)) {
            Some(shared) if shared <= end => shared,
            _ => first.to_time(None)?,
        },
        (m, _) => first.to_time(m)?,
    };
    Some(TimeSlot {
        start,
        end: Some(end),
    })
}

fn parse_clock(raw: &str) -> Option<Clock> {
    let raw = raw.trim();
    let (digits, meridiem) = split_meridiem(raw);
    let digits = digits.trim_end();

    let (hour, minute) = match digits.split_once([':', '.']) {
        Some((h, m)) => {
            if m.len() != 2 {
                return None;
            }
            (parse_number(h, 2)?, parse_number(m, 2)?)
        }
        // a bare hour only counts with am/pm: "9am"
        None if meridiem.is_some() => (parse_number(digits, 2)?, 0),
        None => return None,
    };
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(Clock {
        hour,
        minute,
        meridiem,
    })
}

fn split_meridiem(raw: &str) -> (&str, Option<Meridiem>) {
    for (suffix, meridiem) in [
        ("a.m.", Meridiem::Am),
        ("p.m.", Meridiem::Pm),
        ("am", Meridiem::Am),
        ("pm", Meridiem::Pm),
    ] {
        if let Some(rest) = raw.strip_suffix(suffix) {
            return (rest, Some(meridiem));
        }
    }
    (raw, None)
}

fn parse_number(digits: &str, max_len: usize) -> Option<u32> {
    if digits.is_empty() || digits.len() > max_len || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("8:00", "08:00")]
    #[case("08:30", "08:30")]
    #[case("9.15", "09:15")]
    #[case(" 13:45 ", "13:45")]
    #[case("9am", "09:00")]
    #[case("12 pm", "12:00")]
    #[case("12:30am", "00:30")]
    #[case("1:15 p.m.", "13:15")]
    #[case("8:00-9:00", "08:00-09:00")]
    #[case("8:00 - 9:00", "08:00-09:00")]
    #[case("8:00\u{2013}9:00", "08:00-09:00")]
    #[case("8:00 \u{2014} 9:30", "08:00-09:30")]
    #[case("13:00 to 14:30", "13:00-14:30")]
    #[case("13:00\nto\n14:30", "13:00-14:30")]
    #[case("1:00-2:00 PM", "13:00-14:00")]
    #[case("11:00-1:00 pm", "11:00-13:00")]
    #[case("10:00 am - 12:00 pm", "10:00-12:00")]
    #[case("8:00\n-\n9:00", "08:00-09:00")]
    fn recognises_slots(#[case] text: &str, #[case] label: &str) {
        assert_eq!(parse_time_slot(text).map(|s| s.label()).as_deref(), Some(label));
    }

    #[rstest]
    #[case("")]
    #[case("Room")]
    #[case("Lab 8:00")]
    #[case("9")]
    #[case("24:00")]
    #[case("10:60")]
    #[case("10:5")]
    #[case("13pm")]
    #[case("8:00-9:00-10:00")]
    #[case("8:00-")]
    #[case("0.5")]
    fn rejects_non_slots(#[case] text: &str) {
        assert_eq!(parse_time_slot(text), None);
    }

    #[test]
    fn single_time_has_no_end() {
        let slot = parse_time_slot("14:00").unwrap();
        assert_eq!(slot.end, None);
        assert_eq!(slot.start, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
    }
}
