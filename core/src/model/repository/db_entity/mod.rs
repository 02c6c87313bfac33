mod album;
mod capsule;
mod notification;

pub use album::*;
pub use capsule::*;
pub use notification::*;
