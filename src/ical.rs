use chrono::{DateTime, Utc};

use crate::models::EventRecord;

pub const PRODUCT_ID: &str = "-//ICS Generator//JP";
pub const UID_DOMAIN: &str = "@ics-generator";

const LINE_ENDING: &str = "\r\n";
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
// f64 carries ~52 bits, about 11 base-36 digits.
const MAX_FRACTION_DIGITS: usize = 11;

#[derive(Clone, Default)]
pub struct ICalExporter;

impl ICalExporter {
    pub fn new() -> Self {
        Self
    }

    /// Builds the document for `event` stamped with the current time and a fresh UID.
    pub fn generate(&self, event: &EventRecord) -> String {
        let now = Utc::now();
        let uid = generate_uid(now, rand::random::<f64>());
        self.render(event, &uid, now)
    }

    pub fn render(&self, event: &EventRecord, uid: &str, dtstamp: DateTime<Utc>) -> String {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{PRODUCT_ID}"),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{uid}"),
            format!("DTSTAMP:{}", format_timestamp(dtstamp)),
            format!("SUMMARY:{}", escape_text(&event.summary)),
            format!("DTSTART;VALUE=DATE:{}", format_date(&event.dtstart)),
            format!("DTEND;VALUE=DATE:{}", format_date(&event.dtend)),
        ];

        if let Some(location) = &event.location {
            lines.push(format!("LOCATION:{}", escape_text(location)));
        }
        if let Some(description) = &event.description {
            lines.push(format!("DESCRIPTION:{}", escape_text(description)));
        }
        if let Some(url) = &event.url {
            lines.push(format!("URL:{url}"));
        }

        lines.push("STATUS:CONFIRMED".to_string());
        lines.push("SEQUENCE:0".to_string());
        lines.push("END:VEVENT".to_string());
        lines.push("END:VCALENDAR".to_string());

        lines.join(LINE_ENDING)
    }
}

/// Escapes TEXT values. Backslashes go first so the escapes added afterwards stay single.
pub fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('\n', "\\n")
}

/// `2024-12-25` -> `20241225`. The date itself is not checked.
pub fn format_date(value: &str) -> String {
    value.replace('-', "")
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn generate_uid(now: DateTime<Utc>, fraction: f64) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    format!(
        "{}{}{UID_DOMAIN}",
        to_base36(millis),
        fraction_to_base36(fraction)
    )
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Digits after the radix point of `fraction` written in base 36.
fn fraction_to_base36(fraction: f64) -> String {
    let mut rest = fraction.fract().abs();
    let mut digits = String::with_capacity(MAX_FRACTION_DIGITS);
    while rest > 0.0 && digits.len() < MAX_FRACTION_DIGITS {
        rest *= 36.0;
        let digit = rest.trunc() as usize;
        digits.push(char::from(BASE36_DIGITS[digit.min(35)]));
        rest = rest.fract();
    }
    if digits.is_empty() {
        digits.push('0');
    }
    digits
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;

    use super::*;

    fn record() -> EventRecord {
        EventRecord {
            summary: "accommodation reservation".to_string(),
            dtstart: "2024-01-10".to_string(),
            dtend: "2024-01-12".to_string(),
            location: None,
            description: None,
            url: None,
        }
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 9, 3, 7).unwrap()
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("a,b;c"), "a\\,b\\;c");
        assert_eq!(escape_text("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_text("a\\,b"), "a\\\\\\,b");
    }

    #[test]
    fn test_escape_text_leaves_carriage_return() {
        // Form textareas submit CRLF; only the LF is escaped.
        assert_eq!(escape_text("x\r\ny"), "x\r\\ny");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-12-25"), "20241225");
        assert_eq!(format_date("2024-02-30"), "20240230");
        assert_eq!(format_date("20240101"), "20240101");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(stamp()), "20240105T090307Z");
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(fraction_to_base36(0.5), "i");
        assert_eq!(fraction_to_base36(0.0), "0");
    }

    #[test]
    fn test_generate_uid_shape() {
        let uid = generate_uid(stamp(), 0.25);
        let millis = stamp().timestamp_millis() as u64;
        assert_eq!(uid, format!("{}9{UID_DOMAIN}", to_base36(millis)));
    }

    #[test]
    fn test_generate_uid_no_collisions() {
        let now = Utc::now();
        let uids: HashSet<String> = (0..10_000)
            .map(|_| generate_uid(now, rand::random::<f64>()))
            .collect();
        assert_eq!(uids.len(), 10_000);
    }

    #[test]
    fn test_render_minimal() {
        let body = ICalExporter::new().render(&record(), "abc@ics-generator", stamp());
        let expected = [
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "PRODID:-//ICS Generator//JP",
            "CALSCALE:GREGORIAN",
            "METHOD:PUBLISH",
            "BEGIN:VEVENT",
            "UID:abc@ics-generator",
            "DTSTAMP:20240105T090307Z",
            "SUMMARY:accommodation reservation",
            "DTSTART;VALUE=DATE:20240110",
            "DTEND;VALUE=DATE:20240112",
            "STATUS:CONFIRMED",
            "SEQUENCE:0",
            "END:VEVENT",
            "END:VCALENDAR",
        ]
        .join("\r\n");
        assert_eq!(body, expected);
    }

    #[test]
    fn test_render_optional_fields() {
        let event = EventRecord {
            summary: "Trip; day 1".to_string(),
            location: Some("Tokyo, Japan".to_string()),
            description: Some("Check-in 15:00\nBreakfast".to_string()),
            url: Some("https://example.com/?a=1,2;3".to_string()),
            ..record()
        };
        let body = ICalExporter::new().render(&event, "uid", stamp());
        let lines: Vec<&str> = body.split("\r\n").collect();

        assert!(lines.contains(&"SUMMARY:Trip\\; day 1"));
        assert!(lines.contains(&"LOCATION:Tokyo\\, Japan"));
        assert!(lines.contains(&"DESCRIPTION:Check-in 15:00\\nBreakfast"));
        assert!(lines.contains(&"URL:https://example.com/?a=1,2;3"));

        let location = lines.iter().position(|l| l.starts_with("LOCATION:")).unwrap();
        let description = lines.iter().position(|l| l.starts_with("DESCRIPTION:")).unwrap();
        let url = lines.iter().position(|l| l.starts_with("URL:")).unwrap();
        let status = lines.iter().position(|l| *l == "STATUS:CONFIRMED").unwrap();
        assert!(location < description && description < url && url < status);
    }

    #[test]
    fn test_generate_uses_fresh_uid() {
        let exporter = ICalExporter::new();
        let uid_line = |body: String| {
            body.split("\r\n")
                .find(|l| l.starts_with("UID:"))
                .map(str::to_string)
                .unwrap()
        };
        let first = uid_line(exporter.generate(&record()));
        let second = uid_line(exporter.generate(&record()));
        assert_ne!(first, second);
        assert!(first.ends_with(UID_DOMAIN));
    }

    #[test]
    fn test_generate_parses_as_icalendar() {
        use icalendar::{Calendar, CalendarComponent, Component};

        let event = EventRecord {
            location: Some("Tokyo Hotel".to_string()),
            ..record()
        };
        let body = ICalExporter::new().generate(&event);
        let calendar: Calendar = format!("{body}\r\n").parse().unwrap();
        let events: Vec<_> = calendar
            .components
            .iter()
            .filter_map(|c| match c {
                CalendarComponent::Event(e) => Some(e),
                _ => None,
            })
            .collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].property_value("LOCATION"), Some("Tokyo Hotel"));
    }
}
