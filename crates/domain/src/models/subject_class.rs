//! Subject class domain model: schedule plus classroom boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Circular classroom boundary used for geofence validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassBoundary {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f32,
}

/// A scheduled class occurrence.
///
/// The attendance window (`attendance_start_time ..= attendance_end_time`)
/// is the interval during which geo check-ins are accepted; it is usually a
/// subwindow of or adjacent to the class period itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectClass {
    pub id: i64,
    pub name: String,
    pub class_start_time: DateTime<Utc>,
    pub class_end_time: DateTime<Utc>,
    pub attendance_start_time: DateTime<Utc>,
    pub attendance_end_time: DateTime<Utc>,
    pub is_attendance_mandatory: bool,
    #[serde(flatten)]
    pub boundary: ClassBoundary,
}

impl SubjectClass {
    /// Closed-interval attendance window check.
    pub fn is_in_attendance_window(&self, now: DateTime<Utc>) -> bool {
        self.attendance_start_time <= now && now <= self.attendance_end_time
    }

    /// Whether this class is the "current" one at `now`.
    ///
    /// A class stays current through the envelope of its class period and
    /// attendance window, so a check-in after the window closes still
    /// resolves to this class and gets the window range echoed back instead
    /// of a NoActiveClass rejection.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        let start = self.class_start_time.min(self.attendance_start_time);
        let end = self.class_end_time.max(self.attendance_end_time);
        start <= now && now <= end
    }

    /// Human-readable attendance window, e.g. "09:00 AM to 09:15 AM".
    pub fn attendance_window_label(&self) -> String {
        format!(
            "{} to {}",
            self.attendance_start_time.format("%I:%M %p"),
            self.attendance_end_time.format("%I:%M %p")
        )
    }
}

/// Class schedule detail in the original wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDetail {
    pub name: String,
    pub class_start_time: DateTime<Utc>,
    pub class_end_time: DateTime<Utc>,
    pub attendance_start_time: DateTime<Utc>,
    pub attendance_end_time: DateTime<Utc>,
}

impl From<&SubjectClass> for ClassDetail {
    fn from(class: &SubjectClass) -> Self {
        Self {
            name: class.name.clone(),
            class_start_time: class.class_start_time,
            class_end_time: class.class_end_time,
            attendance_start_time: class.attendance_start_time,
            attendance_end_time: class.attendance_end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn test_class(id: i64) -> SubjectClass {
        SubjectClass {
            id,
            name: "Algorithms".to_string(),
            class_start_time: Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
            class_end_time: Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap(),
            attendance_start_time: Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
            attendance_end_time: Utc.with_ymd_and_hms(2024, 3, 4, 9, 15, 0).unwrap(),
            is_attendance_mandatory: true,
            boundary: ClassBoundary {
                latitude: 12.9716,
                longitude: 77.5946,
                radius_meters: 50.0,
            },
        }
    }

    #[test]
    fn test_attendance_window_is_closed_interval() {
        let class = test_class(1);
        let start = class.attendance_start_time;
        let end = class.attendance_end_time;

        assert!(class.is_in_attendance_window(start));
        assert!(class.is_in_attendance_window(end));
        assert!(class.is_in_attendance_window(start + chrono::Duration::minutes(5)));

        // One unit outside either bound
        assert!(!class.is_in_attendance_window(start - chrono::Duration::seconds(1)));
        assert!(!class.is_in_attendance_window(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_is_current_covers_class_period_after_window_closes() {
        let class = test_class(1);
        // 09:20 - attendance window closed but class still running
        let t = Utc.with_ymd_and_hms(2024, 3, 4, 9, 20, 0).unwrap();
        assert!(class.is_current(t));
        assert!(!class.is_in_attendance_window(t));
    }

    #[test]
    fn test_is_current_false_outside_envelope() {
        let class = test_class(1);
        assert!(!class.is_current(Utc.with_ymd_and_hms(2024, 3, 4, 8, 59, 59).unwrap()));
        assert!(!class.is_current(Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 1).unwrap()));
    }

    #[test]
    fn test_attendance_window_label_format() {
        let class = test_class(1);
        assert_eq!(class.attendance_window_label(), "09:00 AM to 09:15 AM");
    }

    #[test]
    fn test_class_detail_wire_keys() {
        let class = test_class(1);
        let detail = ClassDetail::from(&class);
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["name"], "Algorithms");
        assert!(json.get("class_start_time").is_some());
        assert!(json.get("class_end_time").is_some());
        assert!(json.get("attendance_start_time").is_some());
        assert!(json.get("attendance_end_time").is_some());
    }

    #[test]
    fn test_boundary_flattened_in_serialization() {
        let class = test_class(1);
        let json = serde_json::to_value(&class).unwrap();
        assert_eq!(json["latitude"], 12.9716);
        assert_eq!(json["radius_meters"], 50.0);
    }
}
