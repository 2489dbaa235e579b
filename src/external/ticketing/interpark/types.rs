use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct RemainSeatResponse {
    pub data: RemainSeatData,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainSeatData {
    #[serde(default)]
    pub remain_seat: Vec<RemainSeat>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainSeat {
    #[serde(deserialize_with = "string_or_number")]
    pub play_seq: String,
    pub remain_cnt: i64,
    #[serde(deserialize_with = "string_or_number")]
    pub seat_grade: String,
    #[serde(default)]
    pub seat_grade_name: String,
}

/// `playSeq` and `seatGrade` are strings in current responses but have been
/// served as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remain_seat_response() {
        let body = r#"{
            "data": {
                "remainSeat": [
                    {"playSeq": "001", "remainCnt": 0, "seatGrade": "1", "seatGradeName": "VIP석"},
                    {"playSeq": 1, "remainCnt": 4, "seatGrade": 2, "seatGradeName": "R석"}
                ]
            }
        }"#;
        let parsed: RemainSeatResponse = serde_json::from_str(body).unwrap();
        let seats = parsed.data.remain_seat;
        assert_eq!(seats.len(), 2);
        assert_eq!(seats[0].play_seq, "001");
        assert_eq!(seats[1].play_seq, "1");
        assert_eq!(seats[1].seat_grade, "2");
        assert_eq!(seats[1].remain_cnt, 4);
    }

    #[test]
    fn test_missing_remain_seat_is_empty() {
        let parsed: RemainSeatResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(parsed.data.remain_seat.is_empty());
    }
}
