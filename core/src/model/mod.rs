pub mod repository;

mod album;
mod capsule;
mod id_types;
mod notification;
pub use album::*;
pub use capsule::*;
pub use id_types::*;
pub use notification::*;

pub(crate) mod util;
