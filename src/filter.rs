//! Time-window filtering of message records.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{OstError, Result};
use crate::model::record::MessageRecord;

/// Which timestamp field of a record the window is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Received,
    Sent,
}

impl FilterMode {
    /// The timestamp the mode selects from a record.
    pub fn select<'a>(&self, record: &'a MessageRecord) -> Option<&'a str> {
        match self {
            FilterMode::Received => record.received_time.as_deref(),
            FilterMode::Sent => record.sent_time.as_deref(),
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "received" => Ok(FilterMode::Received),
            "sent" => Ok(FilterMode::Sent),
            other => Err(format!(
                "unknown mode '{other}', expected 'received' or 'sent'"
            )),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Received => write!(f, "received"),
            FilterMode::Sent => write!(f, "sent"),
        }
    }
}

/// A half-open time window `[start, end)`; either bound may be absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeWindow {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl TimeWindow {
    /// Build a window, rejecting `end < start` up front — before any
    /// mailbox is touched.
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                return Err(OstError::InvalidWindow { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// Whether an instant falls inside the window. The start bound is
    /// inclusive, the end bound exclusive.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start.map_or(true, |s| t >= s) && self.end.map_or(true, |e| t < e)
    }
}

/// Parse a canonical instant, tolerating a trailing `Z` suffix and
/// bare dates (which mean midnight).
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.strip_suffix('Z').unwrap_or(s);
    if let Ok(dt) = NaiveDateTime::from_str(s) {
        return Some(dt);
    }
    NaiveDate::from_str(s)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Keep only the records whose selected timestamp exists, parses, and
/// falls inside the window. Missing or unparsable timestamps exclude a
/// record; they are never an error.
pub fn filter_records<I>(
    records: I,
    window: TimeWindow,
    mode: FilterMode,
) -> impl Iterator<Item = MessageRecord>
where
    I: Iterator<Item = MessageRecord>,
{
    records.filter(move |record| {
        let Some(raw) = mode.select(record) else {
            return false;
        };
        let Some(t) = parse_instant(raw) else {
            return false;
        };
        window.contains(t)
    })
}
