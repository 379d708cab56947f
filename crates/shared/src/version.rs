//! Client app version comparison.
//!
//! The check-in endpoint rejects clients older than a configured minimum
//! version before any core logic runs. Versions are plain `major.minor.patch`
//! strings.

/// Compare two semantic versions.
/// Returns true if `version` is below `minimum`.
///
/// Unparseable versions are treated as below minimum: an unknown client
/// build must update rather than slip through the gate.
pub fn is_version_below_minimum(version: &str, minimum: &str) -> bool {
    match (parse_version(version), parse_version(minimum)) {
        (Some(v), Some(m)) => v < m,
        (None, _) => true,
        (_, None) => false,
    }
}

fn parse_version(v: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = v.split('.').collect();
    if parts.len() >= 3 {
        Some((
            parts[0].parse().ok()?,
            parts[1].parse().ok()?,
            parts[2].parse().ok()?,
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_comparison() {
        // Below minimum
        assert!(is_version_below_minimum("0.7.0", "0.8.0"));
        assert!(is_version_below_minimum("0.7.9", "0.8.0"));
        assert!(is_version_below_minimum("0.0.1", "0.8.0"));

        // At or above minimum
        assert!(!is_version_below_minimum("0.8.0", "0.8.0"));
        assert!(!is_version_below_minimum("0.8.1", "0.8.0"));
        assert!(!is_version_below_minimum("0.9.0", "0.8.0"));
        assert!(!is_version_below_minimum("1.0.0", "0.8.0"));
        assert!(!is_version_below_minimum("1.2.3", "0.8.0"));
    }

    #[test]
    fn test_invalid_client_version_rejected() {
        assert!(is_version_below_minimum("invalid", "0.8.0"));
        assert!(is_version_below_minimum("1.0", "0.8.0"));
        assert!(is_version_below_minimum("", "0.8.0"));
    }

    #[test]
    fn test_invalid_minimum_never_rejects() {
        assert!(!is_version_below_minimum("1.0.0", "not-a-version"));
    }
}
