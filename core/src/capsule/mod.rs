//! Time capsule rules that don't touch any store: who may open a capsule when,
//! and when its owner should be reminded of it.

pub mod access;
pub mod password;
pub mod reminder;

pub use access::can_access;
pub use password::{verify_password, CapsulePasswordHasher};
pub use reminder::{due_reminders, next_reminder_at};
