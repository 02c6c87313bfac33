use chrono::{DateTime, Duration, Utc};
use strum::{Display, EnumString};

use super::{AlbumId, CapsuleId, Principal};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capsule {
    pub id: CapsuleId,
    pub album_id: AlbumId,
    pub owner: Principal,
    pub unlock_at: DateTime<Utc>,
    pub theme: Theme,
    /// Present iff the capsule is password protected
    pub password_hash: Option<PasswordHash>,
    pub reminder_policy: ReminderPolicy,
    /// Only ever set by the reminder bookkeeping, always `None` for `ReminderPolicy::None`
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Capsule {
    pub fn password_protected(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn is_unlocked_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.unlock_at
    }
}

/// Argon2id hash in PHC string format.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PasswordHash(pub String);

impl PasswordHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Vintage,
    Modern,
    Dark,
    Nature,
    Sunset,
    Ocean,
    Royal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ReminderPolicy {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl ReminderPolicy {
    pub fn interval(&self) -> Option<Duration> {
        match self {
            ReminderPolicy::None => None,
            ReminderPolicy::Daily => Some(Duration::days(1)),
            ReminderPolicy::Weekly => Some(Duration::days(7)),
            ReminderPolicy::Monthly => Some(Duration::days(30)),
        }
    }
}

/// Fields an owner may change on an existing capsule. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapsulePatch {
    pub theme: Option<Theme>,
    pub unlock_at: Option<DateTime<Utc>>,
    pub reminder_policy: Option<ReminderPolicy>,
}

impl CapsulePatch {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.unlock_at.is_none() && self.reminder_policy.is_none()
    }
}

/// Outcome of evaluating whether a capsule's contents may be viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessResult {
    Locked { unlock_at: DateTime<Utc> },
    PasswordRequired,
    Granted,
}
