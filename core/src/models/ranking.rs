use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::beatmap::Beatmapset;
use super::user::UserStatistics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spotlight {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub mode_specific: bool,
    pub participant_count: Option<u64>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spotlights {
    pub spotlights: Vec<Spotlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    pub beatmapsets: Option<Vec<Beatmapset>>,
    pub cursor: Option<Cursor>,
    pub ranking: Option<Vec<UserStatistics>>,
    pub spotlight: Option<Spotlight>,
    pub total: Option<u64>,
}
