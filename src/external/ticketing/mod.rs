mod interpark;
mod provider;
mod ticketlink;
mod types;
mod vendor;

pub use interpark::InterparkSource;
pub use provider::SeatSource;
pub use ticketlink::TicketlinkSource;
pub use types::{SeatIdentity, SeatRecord};
pub use vendor::Vendor;

use crate::config::SourcesConfig;

/// Instantiate one source per enabled vendor, in a stable order.
pub fn build_sources(config: &SourcesConfig, client: &reqwest::Client) -> Vec<Box<dyn SeatSource>> {
    let mut sources: Vec<Box<dyn SeatSource>> = Vec::new();
    if config.interpark.enabled {
        sources.push(Box::new(InterparkSource::new(
            client.clone(),
            config.interpark.clone(),
        )));
    }
    if config.ticketlink.enabled {
        sources.push(Box::new(TicketlinkSource::new(
            client.clone(),
            config.ticketlink.clone(),
        )));
    }
    sources
}
