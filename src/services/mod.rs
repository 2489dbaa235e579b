//! Service layer: seat monitoring and notification delivery.

pub mod monitor;
pub mod notifications;
