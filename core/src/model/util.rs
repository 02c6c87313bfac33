use std::str::FromStr;

use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use eyre::{eyre, Result};

use super::{Permission, ReminderPolicy, Theme};

#[inline]
pub fn bool_to_int(b: bool) -> i32 {
    if b {
        1
    } else {
        0
    }
}

/// milliseconds since UNIX epoch
pub fn datetime_to_db_repr(d: &DateTime<Utc>) -> i64 {
    d.timestamp_millis()
}

/// From milliseconds since UNIX epoch
pub fn datetime_from_db_repr(unix_millis: i64) -> Result<DateTime<Utc>> {
    match Utc.timestamp_millis_opt(unix_millis) {
        chrono::LocalResult::Single(dt) => Ok(dt),
        _ => Err(eyre!(
            "error converting unix millis epoch to DateTime: {}",
            unix_millis
        )),
    }
}

/// Drop everything the db representation can't hold
pub fn trunc_to_db_precision(d: DateTime<Utc>) -> DateTime<Utc> {
    d.trunc_subsecs(3)
}

pub fn to_db_theme(theme: Theme) -> String {
    theme.to_string()
}

pub fn from_db_theme(s: &str) -> Result<Theme> {
    Theme::from_str(s).map_err(|_| eyre!("invalid db theme {}", s))
}

pub fn to_db_reminder_policy(policy: ReminderPolicy) -> String {
    policy.to_string()
}

pub fn from_db_reminder_policy(s: &str) -> Result<ReminderPolicy> {
    ReminderPolicy::from_str(s).map_err(|_| eyre!("invalid db reminder policy {}", s))
}

pub fn to_db_permission(permission: Permission) -> String {
    permission.to_string()
}

pub fn from_db_permission(s: &str) -> Result<Permission> {
    Permission::from_str(s).map_err(|_| eyre!("invalid db permission {}", s))
}
