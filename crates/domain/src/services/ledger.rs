//! Attendance status resolution.
//!
//! A (student, class) pair moves through `NoRecord -> GeoRecorded ->
//! ManualRecorded`. Once a staff override exists it is terminal for status
//! purposes: later geo submissions are still stored idempotently but never
//! alter the resolved value. These functions are total; there is no status
//! lookup that can fail.

use chrono::{DateTime, Utc};

use crate::models::attendance::AttendanceStatus;

/// Resolves the authoritative status for a pair.
///
/// Staff wins over geo; a geo record alone means Present; no record at all
/// means Absent.
pub fn resolve_status(manual: Option<AttendanceStatus>, has_geo: bool) -> AttendanceStatus {
    match manual {
        Some(status) => status,
        None if has_geo => AttendanceStatus::Present,
        None => AttendanceStatus::Absent,
    }
}

/// Like [`resolve_status`], but distinguishes "never evaluated" from
/// "evaluated absent": returns `None` when neither record kind exists.
/// Used by the per-student view, where unevaluated classes report null.
pub fn resolve_recorded(
    manual: Option<AttendanceStatus>,
    has_geo: bool,
) -> Option<AttendanceStatus> {
    if manual.is_none() && !has_geo {
        None
    } else {
        Some(resolve_status(manual, has_geo))
    }
}

/// Earliest creation time across the pair's records, the original
/// `min_creation_time` semantics of the history views.
pub fn first_recorded_at(
    geo_at: Option<DateTime<Utc>>,
    manual_at: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match (geo_at, manual_at) {
        (Some(g), Some(m)) => Some(g.min(m)),
        (Some(g), None) => Some(g),
        (None, Some(m)) => Some(m),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_no_record_resolves_absent() {
        assert_eq!(resolve_status(None, false), AttendanceStatus::Absent);
    }

    #[test]
    fn test_geo_record_resolves_present() {
        assert_eq!(resolve_status(None, true), AttendanceStatus::Present);
    }

    #[test]
    fn test_manual_overrides_geo() {
        // Staff marked Absent even though a geo record exists
        assert_eq!(
            resolve_status(Some(AttendanceStatus::Absent), true),
            AttendanceStatus::Absent
        );
        assert_eq!(
            resolve_status(Some(AttendanceStatus::Late), true),
            AttendanceStatus::Late
        );
    }

    #[test]
    fn test_manual_alone_wins() {
        assert_eq!(
            resolve_status(Some(AttendanceStatus::ExcusedAbsent), false),
            AttendanceStatus::ExcusedAbsent
        );
    }

    #[test]
    fn test_resolve_recorded_none_when_never_evaluated() {
        assert_eq!(resolve_recorded(None, false), None);
    }

    #[test]
    fn test_resolve_recorded_follows_resolution_otherwise() {
        assert_eq!(
            resolve_recorded(None, true),
            Some(AttendanceStatus::Present)
        );
        assert_eq!(
            resolve_recorded(Some(AttendanceStatus::Absent), true),
            Some(AttendanceStatus::Absent)
        );
    }

    #[test]
    fn test_first_recorded_at_picks_minimum() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 4, 9, 5, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap();

        assert_eq!(first_recorded_at(Some(earlier), Some(later)), Some(earlier));
        assert_eq!(first_recorded_at(Some(later), Some(earlier)), Some(earlier));
        assert_eq!(first_recorded_at(Some(earlier), None), Some(earlier));
        assert_eq!(first_recorded_at(None, Some(later)), Some(later));
        assert_eq!(first_recorded_at(None, None), None);
    }
}
