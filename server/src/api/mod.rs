//! API server and routes

pub mod auth;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
mod server;
#[cfg(test)]
mod testing;
pub mod types;

pub use auth::AuthManager;
pub use server::{ApiServer, build_router};
