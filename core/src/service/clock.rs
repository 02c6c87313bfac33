use chrono::{DateTime, Utc};

use crate::model::util::trunc_to_db_precision;

/// Source of "now" for the services. Instants are millisecond precision,
/// like everything that goes through the database.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        trunc_to_db_precision(Utc::now())
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-util"))]
mod manual {
    use std::sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    };

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::Clock;
    use crate::model::util::datetime_to_db_repr;

    /// Clock that only moves when told to. Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        unix_millis: Arc<AtomicI64>,
    }

    impl ManualClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            ManualClock {
                unix_millis: Arc::new(AtomicI64::new(datetime_to_db_repr(&now))),
            }
        }

        pub fn set(&self, now: DateTime<Utc>) {
            self.unix_millis
                .store(datetime_to_db_repr(&now), Ordering::SeqCst);
        }

        pub fn advance(&self, by: Duration) {
            self.unix_millis
                .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.timestamp_millis_opt(self.unix_millis.load(Ordering::SeqCst))
                .single()
                // only ever stores values that came from a valid DateTime
                .unwrap_or_else(Utc::now)
        }
    }
}
