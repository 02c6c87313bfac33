pub mod album;
pub mod capsule;
pub mod id_types;
pub mod notification;
pub use album::*;
pub use capsule::*;
pub use id_types::*;
pub use notification::*;
