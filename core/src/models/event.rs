use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::GameMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Giver {
    pub url: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub url: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KudosuHistory {
    pub id: u64,
    pub action: String,
    pub amount: i64,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub giver: Option<Giver>,
    pub post: Post,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub achieved_at: Option<DateTime<Utc>>,
    pub id: Option<u64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBeatmap {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBeatmapset {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUser {
    pub username: String,
    pub url: String,
    #[serde(rename = "previousUsername")]
    pub previous_username: Option<String>,
}

/// An entry from a user's recent activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub achievement: Option<Achievement>,
    pub user: Option<EventUser>,
    pub beatmap: Option<EventBeatmap>,
    pub beatmapset: Option<EventBeatmapset>,
    pub count: Option<u64>,
    pub approval: Option<String>,
    #[serde(rename = "scoreRank")]
    pub score_rank: Option<String>,
    pub rank: Option<u32>,
    pub mode: Option<GameMode>,
}
