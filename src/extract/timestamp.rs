//! Timestamp normalization.
//!
//! Converts the heterogeneous timestamp representations reported by the
//! collaborator into one canonical textual form: ISO 8601 without a
//! timezone suffix, in UTC.

use chrono::{DateTime, Utc};

use crate::pff::PffTime;

/// Normalize a raw collaborator timestamp into its canonical ISO 8601 form.
///
/// Returns `None` for an absent or unset value, and for any epoch that
/// cannot be represented as an instant. Normalization never fails loudly:
/// an unconvertible value is simply "no timestamp".
pub fn normalize(raw: Option<PffTime>) -> Option<String> {
    let raw = raw.filter(|t| !t.is_unset())?;
    match raw {
        PffTime::Epoch(secs) => {
            if !secs.is_finite() {
                return None;
            }
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9).round() as u32;
            let dt = DateTime::<Utc>::from_timestamp(whole as i64, nanos.min(999_999_999))?;
            Some(format_naive(dt.naive_utc()))
        }
        PffTime::DateTime(dt) => Some(format_naive(dt)),
    }
}

/// `%.f` prints nothing when the sub-second part is zero, matching the
/// canonical form used throughout the pipeline.
fn format_naive(dt: chrono::NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_absent_is_none() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn test_epoch_zero_is_none() {
        // Epoch zero means "unset", not 1970-01-01.
        assert_eq!(normalize(Some(PffTime::Epoch(0.0))), None);
    }

    #[test]
    fn test_epoch_seconds() {
        let iso = normalize(Some(PffTime::Epoch(1_704_067_200.0))).unwrap();
        assert_eq!(iso, "2024-01-01T00:00:00");
    }

    #[test]
    fn test_epoch_fractional_seconds() {
        let iso = normalize(Some(PffTime::Epoch(1_704_067_200.5))).unwrap();
        assert_eq!(iso, "2024-01-01T00:00:00.500");
    }

    #[test]
    fn test_native_datetime_passthrough() {
        let dt =
            NaiveDateTime::parse_from_str("2024-01-31T23:59:59", "%Y-%m-%dT%H:%M:%S").unwrap();
        let iso = normalize(Some(PffTime::DateTime(dt))).unwrap();
        assert_eq!(iso, "2024-01-31T23:59:59");
    }

    #[test]
    fn test_non_finite_epoch_is_none() {
        assert_eq!(normalize(Some(PffTime::Epoch(f64::NAN))), None);
        assert_eq!(normalize(Some(PffTime::Epoch(f64::INFINITY))), None);
    }

    #[test]
    fn test_idempotent_through_reparse() {
        let iso = normalize(Some(PffTime::Epoch(1_706_745_599.0))).unwrap();
        let reparsed: NaiveDateTime = iso.parse().unwrap();
        let again = normalize(Some(PffTime::DateTime(reparsed))).unwrap();
        assert_eq!(iso, again);
    }
}
