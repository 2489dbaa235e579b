use super::types::SeatRecord;
use super::vendor::Vendor;
use crate::error::AppResult;
use async_trait::async_trait;

/// A ticketing vendor queried once per tick.
///
/// Implementations hold their own identifiers and issue every sub-request a
/// fetch needs; a failing sub-request fails the whole fetch.
#[async_trait]
pub trait SeatSource: Send + Sync {
    fn vendor(&self) -> Vendor;
    async fn fetch(&self) -> AppResult<Vec<SeatRecord>>;
}
