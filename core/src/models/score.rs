use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::GameModeInt;

use super::beatmap::{Beatmap, BeatmapsetCompact};
use super::user::UserCompact;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count_50: Option<u32>,
    pub count_100: Option<u32>,
    pub count_300: Option<u32>,
    pub count_geki: Option<u32>,
    pub count_katu: Option<u32>,
    pub count_miss: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub percentage: f64,
    pub pp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMatchInfo {
    pub slot: u32,
    pub team: String,
    #[serde(rename = "pass")]
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub id: u64,
    pub best_id: Option<u64>,
    pub user_id: u64,
    pub accuracy: f64,
    pub mods: Vec<String>,
    pub score: u64,
    pub max_combo: u32,
    pub perfect: bool,
    pub statistics: Statistics,
    pub passed: bool,
    pub pp: Option<f64>,
    pub rank: String,
    pub created_at: DateTime<Utc>,
    pub mode: String,
    pub mode_int: GameModeInt,
    pub replay: bool,

    pub beatmap: Option<Box<Beatmap>>,
    pub beatmapset: Option<BeatmapsetCompact>,
    pub rank_country: Option<u32>,
    pub rank_global: Option<u32>,
    pub weight: Option<Weight>,
    pub user: Option<UserCompact>,
    #[serde(rename = "match")]
    pub match_info: Option<ScoreMatchInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapUserScore {
    pub position: u32,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapScores {
    pub scores: Vec<Score>,
    #[serde(rename = "userScore")]
    pub user_score: Option<BeatmapUserScore>,
}

/// All of a user's scores on one beatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub scores: Vec<Score>,
}
