//! Unique test data built from ULIDs, so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Lowercase address, already in the backend's normalized form.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let a = unique_email("ada");
/// assert_ne!(a, unique_email("ada"));
/// assert!(a.ends_with("@example.test"));
/// assert_eq!(a, a.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}
