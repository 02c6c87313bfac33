use chrono::{DateTime, Utc};

use crate::model::{AccessResult, Capsule};

use super::password::verify_password;

/// Decides whether `capsule`'s contents may be viewed at `now`.
///
/// The time gate comes first: before `unlock_at` the result is `Locked` no matter
/// what password is supplied, and the password is not even looked at.
/// After that, password protected capsules need a password that verifies
/// against the stored hash.
pub fn can_access(
    capsule: &Capsule,
    now: DateTime<Utc>,
    supplied_password: Option<&str>,
) -> AccessResult {
    if now < capsule.unlock_at {
        return AccessResult::Locked {
            unlock_at: capsule.unlock_at,
        };
    }
    match (&capsule.password_hash, supplied_password) {
        (None, _) => AccessResult::Granted,
        (Some(hash), Some(password)) if verify_password(hash, password) => AccessResult::Granted,
        (Some(_), _) => AccessResult::PasswordRequired,
    }
}
