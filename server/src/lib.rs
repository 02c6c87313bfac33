pub mod app_state;
pub mod http_error;
pub mod openapi;
pub mod principal;
pub mod reminder_sweep;
pub mod routes;
pub mod schema;
