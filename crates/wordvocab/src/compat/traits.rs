//! # Trait Checks

/// Static check that a value is `Send`.
pub fn static_is_send_check<S: Send>(_: &S) {}

/// Static check that a value is `Sync`.
pub fn static_is_sync_check<S: Sync>(_: &S) {}

/// Static check that a value is `Send` and `Sync`.
///
/// Used to pin the "shared across reader threads" contract of
/// [`crate::Vocabulary`] at compile time.
pub fn static_is_send_sync_check<S: Send + Sync>(v: &S) {
    static_is_send_check(v);
    static_is_sync_check(v);
}
