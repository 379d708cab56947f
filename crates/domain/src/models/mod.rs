//! Domain models.

pub mod attendance;
pub mod student;
pub mod subject_class;

pub use attendance::AttendanceStatus;
pub use student::Student;
pub use subject_class::{ClassBoundary, SubjectClass};
