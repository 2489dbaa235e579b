use super::types::{GradeRemain, TicketlinkResponse};
use crate::config::TicketlinkSourceConfig;
use crate::error::{AppError, AppResult};
use crate::external::ticketing::provider::SeatSource;
use crate::external::ticketing::types::{SeatIdentity, SeatRecord, clamp_count};
use crate::external::ticketing::vendor::Vendor;
use async_trait::async_trait;

const SUCCESS_CODE: i32 = 0;

/// Per-grade remaining counts for a list of Ticketlink schedules
pub struct TicketlinkSource {
    client: reqwest::Client,
    config: TicketlinkSourceConfig,
}

impl TicketlinkSource {
    pub fn new(client: reqwest::Client, config: TicketlinkSourceConfig) -> Self {
        Self { client, config }
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::Fetch {
            vendor: Vendor::Ticketlink.to_string(),
            message: message.into(),
            source,
        }
    }

    fn grades_url(&self, schedule_id: &str) -> String {
        format!(
            "{}/mapi/product/{}/schedule/{}/grades",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.product_id,
            schedule_id
        )
    }

    async fn get_grades(&self, schedule_id: &str) -> AppResult<Vec<GradeRemain>> {
        let url = self.grades_url(schedule_id);
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("Referer", "https://www.ticketlink.co.kr/")
            .send()
            .await
            .map_err(|e| {
                Self::make_error(
                    format!("get_grades({}) request failed: {}", schedule_id, e),
                    Some(e.into()),
                )
            })?
            .error_for_status()
            .map_err(|e| {
                Self::make_error(
                    format!("get_grades({}) HTTP error: {}", schedule_id, e),
                    Some(e.into()),
                )
            })?;

        let data: TicketlinkResponse<Vec<GradeRemain>> = resp.json().await.map_err(|e| {
            Self::make_error(
                format!("get_grades({}) invalid JSON: {}", schedule_id, e),
                Some(e.into()),
            )
        })?;

        if data.result.code != SUCCESS_CODE {
            return Err(Self::make_error(
                format!(
                    "get_grades({}) API error code {}: {}",
                    schedule_id,
                    data.result.code,
                    data.result.message.as_deref().unwrap_or("no message")
                ),
                None,
            ));
        }

        Ok(data.data.unwrap_or_default())
    }
}

#[async_trait]
impl SeatSource for TicketlinkSource {
    fn vendor(&self) -> Vendor {
        Vendor::Ticketlink
    }

    async fn fetch(&self) -> AppResult<Vec<SeatRecord>> {
        let mut records = Vec::new();
        for schedule_id in &self.config.schedule_ids {
            let grades = self.get_grades(schedule_id).await?;
            records.extend(grades.into_iter().map(|grade| SeatRecord {
                vendor: Vendor::Ticketlink,
                identity: SeatIdentity::new(schedule_id.as_str(), grade.name.as_str()),
                display_name: grade.name,
                remaining: clamp_count(grade.remain_cnt),
            }));
        }
        Ok(records)
    }
}
