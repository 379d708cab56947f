//! Schedule selection.
//!
//! The repository supplies the classes whose schedule envelope contains a
//! given instant; this module applies the deterministic tie-break when more
//! than one window overlaps. Current time is always an explicit parameter of
//! the query, never an ambient clock.

use crate::models::subject_class::SubjectClass;

/// Selects the current class from a set of overlapping candidates.
///
/// Tie-break: earliest `attendance_start_time`, then lowest id. Returns
/// `None` when no class is active, which callers must treat as "attendance
/// not currently collectible", not an error.
pub fn select_current(candidates: &[SubjectClass]) -> Option<&SubjectClass> {
    candidates
        .iter()
        .min_by_key(|class| (class.attendance_start_time, class.id))
}
