//! HTTP surface: routes, handlers and the API key middleware

pub mod middleware;
pub mod services;

pub use services::{api_routes, configure_routes, health_routes};
