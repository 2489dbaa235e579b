//! Text rendering of seat records for alerts and console listings.

use jiff::Zoned;

use crate::external::ticketing::{SeatRecord, Vendor};
use crate::services::notifications::NotificationMessage;

pub const ALERT_TITLE: &str = "Seat Found!!!";
pub const START_MESSAGE: &str = "Start checking...";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

fn scope_label(vendor: Vendor) -> &'static str {
    match vendor {
        Vendor::Interpark => "PlaySeq",
        Vendor::Ticketlink => "Schedule",
    }
}

/// One-line description with every identity field, used for logs and `check`
pub fn describe_record(record: &SeatRecord) -> String {
    format!(
        "[{}] {}: {}, RemainCnt: {}, SeatGrade: {}, SeatGradeName: {}",
        record.vendor,
        scope_label(record.vendor),
        record.identity.scope,
        record.remaining,
        record.identity.grade,
        record.display_name
    )
}

/// Alert for a record that passed the dedup cache
pub fn render_alert(record: &SeatRecord, checked_at: &Zoned) -> NotificationMessage {
    NotificationMessage {
        title: Some(ALERT_TITLE.to_string()),
        body: format!(
            "[{}] {}: {}, RemainCnt: {}, SeatGradeName: {}\nChecked at {}",
            record.vendor,
            scope_label(record.vendor),
            record.identity.scope,
            record.remaining,
            record.display_name,
            checked_at.strftime(TIMESTAMP_FORMAT)
        ),
    }
}

pub fn start_message() -> NotificationMessage {
    NotificationMessage::text(START_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::ticketing::SeatIdentity;
    use jiff::Timestamp;
    use jiff::tz::TimeZone;

    fn checked_at() -> Zoned {
        "2026-03-01T12:30:05Z"
            .parse::<Timestamp>()
            .unwrap()
            .to_zoned(TimeZone::UTC)
    }

    #[test]
    fn test_render_interpark_alert() {
        let record = SeatRecord {
            vendor: Vendor::Interpark,
            identity: SeatIdentity::new("001", "1"),
            display_name: "VIP석".into(),
            remaining: 3,
        };
        let message = render_alert(&record, &checked_at());
        assert_eq!(message.title.as_deref(), Some("Seat Found!!!"));
        assert_eq!(
            message.body,
            "[interpark] PlaySeq: 001, RemainCnt: 3, SeatGradeName: VIP석\nChecked at 2026-03-01 12:30:05 UTC"
        );
    }

    #[test]
    fn test_describe_ticketlink_record() {
        let record = SeatRecord {
            vendor: Vendor::Ticketlink,
            identity: SeatIdentity::new("100", "외야석"),
            display_name: "외야석".into(),
            remaining: 0,
        };
        assert_eq!(
            describe_record(&record),
            "[ticketlink] Schedule: 100, RemainCnt: 0, SeatGrade: 외야석, SeatGradeName: 외야석"
        );
    }

    #[test]
    fn test_start_message() {
        let message = start_message();
        assert_eq!(message.render(), "Start checking...");
    }
}
