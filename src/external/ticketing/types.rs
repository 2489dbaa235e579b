use super::vendor::Vendor;

/// Stable key of a seat offer within one vendor.
///
/// `scope` is the vendor's performance slot (Interpark play sequence,
/// Ticketlink schedule id) and `grade` the seat grade inside it. The
/// remaining count is deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatIdentity {
    pub scope: String,
    pub grade: String,
}

impl SeatIdentity {
    pub fn new(scope: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            grade: grade.into(),
        }
    }
}

/// One vendor's reported availability for a seat offer at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRecord {
    pub vendor: Vendor,
    pub identity: SeatIdentity,
    /// Human readable grade name used in messages
    pub display_name: String,
    pub remaining: u32,
}

impl SeatRecord {
    pub fn is_available(&self) -> bool {
        self.remaining > 0
    }
}

/// Vendor counts arrive as signed JSON numbers; negatives mean sold out.
pub(crate) fn clamp_count(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}
