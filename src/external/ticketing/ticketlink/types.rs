use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct TicketlinkResponse<T> {
    pub result: TicketlinkResult,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TicketlinkResult {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRemain {
    #[serde(default)]
    pub grade_id: Option<i64>,
    pub name: String,
    pub remain_cnt: i64,
}
