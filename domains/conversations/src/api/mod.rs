//! API layer for the Conversations domain
//!
//! Contains HTTP handlers, page templates, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod routes;

pub use middleware::ChatState;
pub use routes::routes;
