//! seatwatch library
//!
//! Polls ticketing vendors for open seats and alerts Telegram chats, with a
//! per-vendor cooldown against duplicate alerts.

use shadow_rs::shadow;
shadow!(build);

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod services;

pub use app::App;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
