//! Capsule, album and notification services. Services own the business rules,
//! stores behind them only persist.

mod album;
mod capsule;
mod clock;
mod error;
mod notification;
mod reminder_sweep;

pub use album::AlbumService;
pub use capsule::{CapsuleService, CreateCapsule, DueReminder};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use error::{CapsuleError, CapsuleResult};
pub use notification::{reminder_message, InAppNotifier, NotificationService, ReminderNotifier};
pub use reminder_sweep::{sweep_reminders, SweepReport};

#[cfg(test)]
mod test;
