//! Data access repositories.

pub mod attendance;
pub mod false_attempt;
pub mod student;
pub mod subject_class;

pub use attendance::AttendanceRepository;
pub use false_attempt::FalseAttemptRepository;
pub use student::StudentRepository;
pub use subject_class::SubjectClassRepository;
