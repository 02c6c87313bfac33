pub mod capsule;
pub mod config;
pub mod model;
pub mod service;
pub mod store;
pub use deadpool_diesel;
