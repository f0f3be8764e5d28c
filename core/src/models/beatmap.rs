use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{GameMode, GameModeInt};

use super::user::UserCompact;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Covers {
    pub cover: String,
    #[serde(rename = "cover@2x")]
    pub cover_2x: String,
    pub card: String,
    #[serde(rename = "card@2x")]
    pub card_2x: String,
    pub list: String,
    #[serde(rename = "list@2x")]
    pub list_2x: String,
    pub slimcover: String,
    #[serde(rename = "slimcover@2x")]
    pub slimcover_2x: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub download_disabled: bool,
    pub more_information: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hype {
    pub current: u32,
    pub required: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nominations {
    pub current: u32,
    pub required: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failtimes {
    pub exit: Option<Vec<u32>>,
    pub fail: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapsetCompact {
    pub id: u64,
    pub artist: String,
    pub artist_unicode: String,
    pub covers: Covers,
    pub creator: String,
    pub favourite_count: u32,
    pub nsfw: bool,
    pub play_count: u64,
    pub preview_url: String,
    pub source: String,
    pub status: String,
    pub title: String,
    pub title_unicode: String,
    pub user_id: u64,
    pub video: bool,

    pub has_favourited: Option<bool>,
    pub ratings: Option<Vec<u32>>,
    pub user: Option<Box<UserCompact>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beatmapset {
    #[serde(flatten)]
    pub compact: BeatmapsetCompact,
    pub availability: Availability,
    pub bpm: f64,
    pub can_be_hyped: bool,
    pub discussion_locked: bool,
    pub hype: Option<Hype>,
    pub is_scoreable: bool,
    pub last_updated: DateTime<Utc>,
    pub legacy_thread_url: Option<String>,
    pub nominations_summary: Option<Nominations>,
    pub ranked: i32,
    pub ranked_date: Option<DateTime<Utc>>,
    pub storyboard: bool,
    pub submitted_date: Option<DateTime<Utc>>,
    pub tags: String,
    pub beatmaps: Option<Vec<BeatmapCompact>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapCompact {
    pub id: u64,
    pub beatmapset_id: u64,
    pub difficulty_rating: f64,
    pub mode: GameMode,
    pub status: String,
    pub total_length: u32,
    pub user_id: u64,
    pub version: String,

    pub beatmapset: Option<Box<BeatmapsetCompact>>,
    pub checksum: Option<String>,
    pub failtimes: Option<Failtimes>,
    pub max_combo: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beatmap {
    #[serde(flatten)]
    pub compact: BeatmapCompact,
    pub accuracy: f64,
    pub ar: f64,
    pub bpm: Option<f64>,
    pub convert: bool,
    pub count_circles: u32,
    pub count_sliders: u32,
    pub count_spinners: u32,
    pub cs: f64,
    pub deleted_at: Option<DateTime<Utc>>,
    pub drain: f64,
    pub hit_length: u32,
    pub is_scoreable: bool,
    pub last_updated: DateTime<Utc>,
    pub mode_int: GameModeInt,
    pub passcount: u64,
    pub playcount: u64,
    pub ranked: i32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beatmaps {
    pub beatmaps: Vec<Beatmap>,
}

/// A beatmap with the user's play count, from the `most_played` category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapPlaycount {
    pub beatmap_id: u64,
    pub count: u64,
    pub beatmap: Option<BeatmapCompact>,
    pub beatmapset: Option<BeatmapsetCompact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAttributes {
    pub max_combo: u32,
    pub star_rating: f64,
    pub aim_difficulty: Option<f64>,
    pub approach_rate: Option<f64>,
    pub flashlight_difficulty: Option<f64>,
    pub overall_difficulty: Option<f64>,
    pub slider_factor: Option<f64>,
    pub speed_difficulty: Option<f64>,
    pub stamina_difficulty: Option<f64>,
    pub rhythm_difficulty: Option<f64>,
    pub colour_difficulty: Option<f64>,
    pub great_hit_window: Option<f64>,
    pub score_multiplier: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub attributes: DifficultyAttributes,
}
