//! Common validation utilities.

use validator::ValidationError;

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates that a GPS accuracy radius is non-negative.
///
/// Zero is valid and means an exact fix. Upper bounds are policy, not
/// validation: the geofence validator decides when a reading is too
/// imprecise to judge.
pub fn validate_accuracy(accuracy: f64) -> Result<(), ValidationError> {
    if accuracy >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("accuracy_range");
        err.message = Some("Accuracy must be non-negative".into());
        Err(err)
    }
}

/// Checks a mail address against an organizational domain allowlist.
///
/// Each allowlist entry is a suffix like `@example.edu`. Matching is
/// case-insensitive; the caller is expected to have lowercased the mail
/// already, but the suffixes are lowercased here to be safe.
pub fn mail_in_allowlist(mail: &str, allowed_suffixes: &[String]) -> bool {
    let mail = mail.to_lowercase();
    allowed_suffixes
        .iter()
        .any(|suffix| mail.ends_with(&suffix.to_lowercase()))
}
