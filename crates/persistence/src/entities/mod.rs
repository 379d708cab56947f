//! Database row mappings.

pub mod attendance;
pub mod false_attempt;
pub mod student;
pub mod subject_class;

pub use attendance::{
    GeoAttendanceEntity, HistoryRow, PairTimesRow, RosterRow, StaffAttendanceEntity,
    StudentOverviewRow,
};
pub use false_attempt::FalseAttemptEntity;
pub use student::StudentEntity;
pub use subject_class::SubjectClassEntity;
