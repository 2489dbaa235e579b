//! Clients for the third-party APIs the watcher talks to.

pub mod client;
pub mod ticketing;
pub mod user_agent;

pub use client::build_http_client;
