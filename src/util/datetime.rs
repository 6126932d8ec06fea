//! Timestamp parsing and es-ES display formatting.
//!
//! DESIGN
//! ======
//! The backend emits timestamps in several shapes: RFC 3339, naive ISO from
//! form input, bare dates, and Flask's RFC 2822 rendering. Values that carry
//! an offset are converted to the local offset; naive values are taken to be
//! local already. Calendar comparisons use only the resulting date.

use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// A parsed timestamp, with or without a known offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Zoned(OffsetDateTime),
    Naive(PrimitiveDateTime),
}

impl Timestamp {
    /// Wall-clock time in the local offset.
    #[must_use]
    pub fn to_local(self, offset: UtcOffset) -> PrimitiveDateTime {
        match self {
            Self::Zoned(at) => {
                let local = at.to_offset(offset);
                PrimitiveDateTime::new(local.date(), local.time())
            }
            Self::Naive(at) => at,
        }
    }

    #[must_use]
    pub fn local_date(self, offset: UtcOffset) -> Date {
        self.to_local(offset).date()
    }
}

/// Parse any timestamp shape the backend is known to emit.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(Timestamp::Zoned(at));
    }
    if let Some(at) = parse_rfc2822(raw) {
        return Some(Timestamp::Zoned(at));
    }

    let naive_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    ];
    for format in naive_formats {
        if let Ok(at) = PrimitiveDateTime::parse(raw, format) {
            return Some(Timestamp::Naive(at));
        }
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| Timestamp::Naive(date.midnight()))
}

/// Flask renders datetimes as `Wed, 15 Jan 2025 10:30:00 GMT`.
fn parse_rfc2822(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc2822) {
        return Some(at);
    }
    let numeric = raw.strip_suffix(" GMT").or_else(|| raw.strip_suffix(" UTC"))?;
    OffsetDateTime::parse(&format!("{numeric} +0000"), &Rfc2822).ok()
}

/// Whether a datetime-local form value (`YYYY-MM-DDTHH:MM`) is well formed.
#[must_use]
pub fn is_datetime_local(raw: &str) -> bool {
    let formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ];
    formats.into_iter().any(|format| PrimitiveDateTime::parse(raw.trim(), format).is_ok())
}

/// Local offset of this process, falling back to UTC when the platform
/// cannot determine it.
///
/// On Unix this must run before any other thread is spawned.
#[must_use]
pub fn local_offset() -> UtcOffset {
    match UtcOffset::current_local_offset() {
        Ok(offset) => offset,
        Err(error) => {
            tracing::warn!(%error, "local offset unavailable, using UTC");
            UtcOffset::UTC
        }
    }
}

/// Today's calendar date in `offset`.
#[must_use]
pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

/// `d/m/yyyy`, the es-ES short date.
#[must_use]
pub fn format_es_date(date: Date) -> String {
    format!("{}/{}/{}", date.day(), u8::from(date.month()), date.year())
}

/// `d/m/yyyy, hh:mm:ss`, the es-ES date and time.
#[must_use]
pub fn format_es_datetime(at: PrimitiveDateTime) -> String {
    format!("{}, {:02}:{:02}:{:02}", format_es_date(at.date()), at.hour(), at.minute(), at.second())
}

/// Render a raw timestamp for display, or echo it back when unparseable.
#[must_use]
pub fn display_datetime(raw: &str, offset: UtcOffset) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |at| format_es_datetime(at.to_local(offset)))
}

/// Render a raw timestamp's date for display, or echo it back when unparseable.
#[must_use]
pub fn display_date(raw: &str, offset: UtcOffset) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |at| format_es_date(at.local_date(offset)))
}

#[cfg(test)]
#[path = "datetime_test.rs"]
mod datetime_test;
