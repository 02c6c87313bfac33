pub mod album;
pub mod capsule;
pub mod db;
pub mod db_entity;
mod error;
pub mod notification;
#[allow(non_snake_case)]
mod schema;
#[cfg(test)]
mod test;

pub use error::StoreError;

#[macro_export]
macro_rules! interact {
    ($conn:ident, $block:expr) => {
        tracing::Instrument::in_current_span(<_ as futures::TryFutureExt>::map_err(
            $conn.interact::<_, eyre::Result<_>>($block),
            |err| match err {
                $crate::deadpool_diesel::InteractError::Panic(_) => {
                    eyre::eyre!("database interaction panicked")
                }
                $crate::deadpool_diesel::InteractError::Aborted => {
                    eyre::eyre!("database interaction was aborted")
                }
            },
        ))
    };
}
