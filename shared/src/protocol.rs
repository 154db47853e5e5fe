use serde::{Deserialize, Serialize};

/// The race service hands back race ids one higher than the id its other
/// endpoints accept. Remove once the upstream service is fixed.
pub const UPSTREAM_RACE_ID_OFFSET: u32 = 1;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Track {
    pub id: u32,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Racer {
    pub id: u32,
    pub driver_name: String,
    pub top_speed: f64,
    pub acceleration: f64,
    pub handling: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RacePosition {
    pub id: u32,
    pub driver_name: String,
    #[serde(default)]
    pub segment: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_position: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum RaceStatus {
    NotStarted,
    InProgress,
    Finished,
    Other(String),
}

impl From<String> for RaceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "not-started" | "unstarted" => RaceStatus::NotStarted,
            "in-progress" => RaceStatus::InProgress,
            "finished" => RaceStatus::Finished,
            _ => RaceStatus::Other(value),
        }
    }
}

impl From<RaceStatus> for String {
    fn from(status: RaceStatus) -> Self {
        match status {
            RaceStatus::NotStarted => "not-started".to_string(),
            RaceStatus::InProgress => "in-progress".to_string(),
            RaceStatus::Finished => "finished".to_string(),
            RaceStatus::Other(raw) => raw,
        }
    }
}

/// One poll of `GET /api/races/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RaceSnapshot {
    pub status: RaceStatus,
    #[serde(default)]
    pub positions: Vec<RacePosition>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreateRaceRequest {
    pub player_id: u32,
    pub track_id: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreatedRace {
    #[serde(rename = "ID")]
    pub id: u32,
}

impl CreatedRace {
    /// Id to use for every follow-up call on this race.
    pub fn race_id(&self) -> u32 {
        self.id.saturating_sub(UPSTREAM_RACE_ID_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_service_values() {
        let snapshot: RaceSnapshot = serde_json::from_str(
            r#"{"status":"in-progress","positions":[{"id":1,"driver_name":"Racer 1","segment":4,"speed":120}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.status, RaceStatus::InProgress);
        assert_eq!(snapshot.positions[0].segment, 4);
        assert_eq!(snapshot.positions[0].final_position, None);

        let unstarted: RaceStatus = serde_json::from_str(r#""unstarted""#).unwrap();
        assert_eq!(unstarted, RaceStatus::NotStarted);
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: RaceStatus = serde_json::from_str(r#""paused""#).unwrap();
        assert_eq!(status, RaceStatus::Other("paused".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""paused""#);
    }

    #[test]
    fn test_created_race_id_is_adjusted() {
        let created: CreatedRace = serde_json::from_str(r#"{"ID":10,"Track":{}}"#).unwrap();
        assert_eq!(created.id, 10);
        assert_eq!(created.race_id(), 9);
        assert_eq!(CreatedRace { id: 0 }.race_id(), 0);
    }
}
