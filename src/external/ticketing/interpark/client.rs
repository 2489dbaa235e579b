use super::types::{RemainSeat, RemainSeatResponse};
use crate::config::InterparkSourceConfig;
use crate::error::{AppError, AppResult};
use crate::external::ticketing::provider::SeatSource;
use crate::external::ticketing::types::{SeatIdentity, SeatRecord, clamp_count};
use crate::external::ticketing::vendor::Vendor;
use crate::external::user_agent::{Browser, user_agent_for};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, USER_AGENT};

const ORIGIN_SITE: &str = "https://tickets.interpark.com";

/// Remaining-seat counts of one Interpark goods, one request per play sequence
pub struct InterparkSource {
    client: reqwest::Client,
    config: InterparkSourceConfig,
}

impl InterparkSource {
    pub fn new(client: reqwest::Client, config: InterparkSourceConfig) -> Self {
        Self { client, config }
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::Fetch {
            vendor: Vendor::Interpark.to_string(),
            message: message.into(),
            source,
        }
    }

    fn remain_seat_url(&self, play_seq: u32) -> String {
        format!(
            "{}/v1/goods/{}/playSeq/PlaySeq/{:03}/REMAINSEAT",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.goods_id,
            play_seq
        )
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("ko-KR,en-US;q=0.7,en;q=0.3"),
        );
        headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_SITE));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(user_agent_for(Browser::Firefox)),
        );
        headers
    }

    fn to_record(seat: RemainSeat) -> SeatRecord {
        SeatRecord {
            vendor: Vendor::Interpark,
            identity: SeatIdentity::new(seat.play_seq, seat.seat_grade),
            display_name: seat.seat_grade_name,
            remaining: clamp_count(seat.remain_cnt),
        }
    }

    async fn get_remain_seats(&self, play_seq: u32) -> AppResult<Vec<RemainSeat>> {
        let url = self.remain_seat_url(play_seq);
        let resp = self
            .client
            .get(&url)
            .headers(Self::headers())
            .send()
            .await
            .map_err(|e| {
                Self::make_error(
                    format!("get_remain_seats({:03}) request failed: {}", play_seq, e),
                    Some(e.into()),
                )
            })?
            .error_for_status()
            .map_err(|e| {
                Self::make_error(
                    format!("get_remain_seats({:03}) HTTP error: {}", play_seq, e),
                    Some(e.into()),
                )
            })?;

        let data: RemainSeatResponse = resp.json().await.map_err(|e| {
            Self::make_error(
                format!("get_remain_seats({:03}) invalid JSON: {}", play_seq, e),
                Some(e.into()),
            )
        })?;

        Ok(data.data.remain_seat)
    }
}

#[async_trait]
impl SeatSource for InterparkSource {
    fn vendor(&self) -> Vendor {
        Vendor::Interpark
    }

    async fn fetch(&self) -> AppResult<Vec<SeatRecord>> {
        let mut records = Vec::new();
        for play_seq in 1..=self.config.play_seq_count {
            let seats = self.get_remain_seats(play_seq).await?;
            records.extend(seats.into_iter().map(Self::to_record));
        }
        Ok(records)
    }
}
