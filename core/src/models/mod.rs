//! Response shapes.
//!
//! These are passive deserialization targets. Fields the service documents
//! as optional attributes are `Option`, so a compact payload decodes into the
//! same struct as a full one.

mod beatmap;
mod event;
mod ranking;
mod score;
mod user;

pub use beatmap::{
    Attributes, Availability, Beatmap, BeatmapCompact, BeatmapPlaycount, Beatmaps, Beatmapset,
    BeatmapsetCompact, Covers, DifficultyAttributes, Failtimes, Hype, Nominations,
};
pub use event::{Achievement, Event, EventBeatmap, EventBeatmapset, EventUser, Giver, KudosuHistory, Post};
pub use ranking::{Cursor, Rankings, Spotlight, Spotlights};
pub use score::{BeatmapScores, BeatmapUserScore, Score, ScoreMatchInfo, Scores, Statistics, Weight};
pub use user::{
    Country, Cover, GradeCounts, Kudosu, Level, RankHighest, User, UserCompact, UserStatistics,
    UserStatisticsRulesets, Users,
};

use crate::enums::BeatmapType;

/// Result of the user-beatmaps operation; the variant is fixed by the
/// requested category, not by the response.
#[derive(Debug, Clone, PartialEq)]
pub enum UserBeatmaps {
    MostPlayed(Vec<BeatmapPlaycount>),
    Beatmapsets(Vec<Beatmapset>),
}

/// Which [`UserBeatmaps`] variant a request will decode into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserBeatmapsShape {
    MostPlayed,
    Beatmapsets,
}

impl UserBeatmapsShape {
    pub fn for_category(category: BeatmapType) -> Self {
        match category {
            BeatmapType::MostPlayed => UserBeatmapsShape::MostPlayed,
            _ => UserBeatmapsShape::Beatmapsets,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UserBeatmapsShape::MostPlayed => "Vec<BeatmapPlaycount>",
            UserBeatmapsShape::Beatmapsets => "Vec<Beatmapset>",
        }
    }
}
