use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::GameMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeCounts {
    pub a: i64,
    pub s: i64,
    pub sh: i64,
    pub ss: i64,
    pub ssh: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub current: u32,
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    pub custom_url: Option<String>,
    pub url: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kudosu {
    pub total: i64,
    pub available: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankHighest {
    pub rank: u32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub grade_counts: GradeCounts,
    pub hit_accuracy: f64,
    pub is_ranked: bool,
    pub level: Level,
    pub maximum_combo: u32,
    pub play_count: u64,
    pub play_time: Option<u64>,
    pub pp: f64,
    pub global_rank: Option<u32>,
    pub country_rank: Option<u32>,
    pub ranked_score: u64,
    pub replays_watched_by_others: u64,
    pub total_hits: u64,
    pub total_score: u64,
    /// Present on ranking rows.
    pub user: Option<Box<UserCompact>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatisticsRulesets {
    pub osu: Option<UserStatistics>,
    pub taiko: Option<UserStatistics>,
    pub fruits: Option<UserStatistics>,
    pub mania: Option<UserStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCompact {
    pub id: u64,
    pub username: String,
    pub avatar_url: String,
    pub country_code: String,
    pub default_group: Option<String>,
    pub is_active: bool,
    pub is_bot: bool,
    pub is_deleted: bool,
    pub is_online: bool,
    pub is_supporter: bool,
    pub last_visit: Option<DateTime<Utc>>,
    pub pm_friends_only: bool,
    pub profile_colour: Option<String>,

    pub country: Option<Country>,
    pub cover: Option<Cover>,
    pub follower_count: Option<u64>,
    pub previous_usernames: Option<Vec<String>>,
    pub rank_highest: Option<RankHighest>,
    pub statistics: Option<Box<UserStatistics>>,
    pub statistics_rulesets: Option<Box<UserStatisticsRulesets>>,
    pub support_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub compact: UserCompact,
    pub cover_url: String,
    pub discord: Option<String>,
    pub has_supported: bool,
    pub interests: Option<String>,
    pub join_date: DateTime<Utc>,
    pub kudosu: Kudosu,
    pub location: Option<String>,
    pub max_blocks: u32,
    pub max_friends: u32,
    pub occupation: Option<String>,
    pub playmode: GameMode,
    pub playstyle: Option<Vec<String>>,
    pub post_count: u64,
    pub profile_order: Vec<String>,
    pub title: Option<String>,
    pub title_url: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Users {
    pub users: Vec<UserCompact>,
}
