//! Per-operation parameters.
//!
//! Required arguments go through `new`; options are set with chained
//! setters and stay `None` (and out of the query) unless called.

use crate::value::ParamValue;

/// `limit` / `offset` pagination shared by the user feed endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Page {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupBeatmapParams {
    pub beatmap_id: ParamValue,
    pub checksum: Option<String>,
    pub filename: Option<String>,
}

impl LookupBeatmapParams {
    pub fn new(beatmap_id: impl Into<ParamValue>) -> Self {
        Self {
            beatmap_id: beatmap_id.into(),
            checksum: None,
            filename: None,
        }
    }

    pub fn checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserBeatmapScoreParams {
    pub beatmap_id: ParamValue,
    pub user_id: ParamValue,
    pub mode: Option<ParamValue>,
    pub mods: Option<String>,
}

impl UserBeatmapScoreParams {
    pub fn new(beatmap_id: impl Into<ParamValue>, user_id: impl Into<ParamValue>) -> Self {
        Self {
            beatmap_id: beatmap_id.into(),
            user_id: user_id.into(),
            mode: None,
            mods: None,
        }
    }

    /// A `GameMode` or its wire name.
    pub fn mode(mut self, mode: impl Into<ParamValue>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn mods(mut self, mods: impl Into<String>) -> Self {
        self.mods = Some(mods.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserBeatmapScoresParams {
    pub beatmap_id: ParamValue,
    pub user_id: ParamValue,
    pub mode: Option<ParamValue>,
}

impl UserBeatmapScoresParams {
    pub fn new(beatmap_id: impl Into<ParamValue>, user_id: impl Into<ParamValue>) -> Self {
        Self {
            beatmap_id: beatmap_id.into(),
            user_id: user_id.into(),
            mode: None,
        }
    }

    pub fn mode(mut self, mode: impl Into<ParamValue>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeatmapScoresParams {
    pub beatmap_id: ParamValue,
    pub mode: Option<ParamValue>,
    pub mods: Option<String>,
    /// Leaderboard type, sent as `type`.
    pub leaderboard: Option<String>,
}

impl BeatmapScoresParams {
    pub fn new(beatmap_id: impl Into<ParamValue>) -> Self {
        Self {
            beatmap_id: beatmap_id.into(),
            mode: None,
            mods: None,
            leaderboard: None,
        }
    }

    pub fn mode(mut self, mode: impl Into<ParamValue>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn mods(mut self, mods: impl Into<String>) -> Self {
        self.mods = Some(mods.into());
        self
    }

    pub fn leaderboard(mut self, leaderboard: impl Into<String>) -> Self {
        self.leaderboard = Some(leaderboard.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeatmapAttributesParams {
    pub beatmap_id: ParamValue,
    /// Mod acronyms, sent as repeated `mods[]`.
    pub mods: Option<ParamValue>,
    pub ruleset: Option<ParamValue>,
    pub ruleset_id: Option<ParamValue>,
}

impl BeatmapAttributesParams {
    pub fn new(beatmap_id: impl Into<ParamValue>) -> Self {
        Self {
            beatmap_id: beatmap_id.into(),
            mods: None,
            ruleset: None,
            ruleset_id: None,
        }
    }

    pub fn mods(mut self, mods: impl Into<ParamValue>) -> Self {
        self.mods = Some(mods.into());
        self
    }

    pub fn ruleset(mut self, ruleset: impl Into<ParamValue>) -> Self {
        self.ruleset = Some(ruleset.into());
        self
    }

    /// A `GameModeInt` or its integer id.
    pub fn ruleset_id(mut self, ruleset_id: impl Into<ParamValue>) -> Self {
        self.ruleset_id = Some(ruleset_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserScoresParams {
    pub user_id: ParamValue,
    /// `ScoreType` or its wire name; a path segment.
    pub score_type: ParamValue,
    pub include_fails: bool,
    pub mode: Option<ParamValue>,
    pub page: Page,
}

impl UserScoresParams {
    pub fn new(user_id: impl Into<ParamValue>, score_type: impl Into<ParamValue>) -> Self {
        Self {
            user_id: user_id.into(),
            score_type: score_type.into(),
            include_fails: false,
            mode: None,
            page: Page::default(),
        }
    }

    pub fn include_fails(mut self, include_fails: bool) -> Self {
        self.include_fails = include_fails;
        self
    }

    pub fn mode(mut self, mode: impl Into<ParamValue>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.page.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.page.offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserBeatmapsParams {
    pub user_id: ParamValue,
    /// `BeatmapType` or its wire name; selects the result shape.
    pub category: ParamValue,
    pub page: Page,
}

impl UserBeatmapsParams {
    pub fn new(user_id: impl Into<ParamValue>, category: impl Into<ParamValue>) -> Self {
        Self {
            user_id: user_id.into(),
            category: category.into(),
            page: Page::default(),
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.page.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.page.offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserParams {
    /// Numeric id or username.
    pub username: ParamValue,
    pub mode: Option<ParamValue>,
    pub key: Option<ParamValue>,
}

impl UserParams {
    pub fn new(username: impl Into<ParamValue>) -> Self {
        Self {
            username: username.into(),
            mode: None,
            key: None,
        }
    }

    pub fn mode(mut self, mode: impl Into<ParamValue>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// `UserKey` or `"id"` / `"username"`.
    pub fn key(mut self, key: impl Into<ParamValue>) -> Self {
        self.key = Some(key.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingsParams {
    pub mode: ParamValue,
    pub ranking_type: ParamValue,
    pub filter: Option<ParamValue>,
    pub country: Option<u32>,
    pub cursor: Option<i64>,
    pub spotlight: Option<u64>,
    pub variant: Option<ParamValue>,
}

impl RankingsParams {
    pub fn new(mode: impl Into<ParamValue>, ranking_type: impl Into<ParamValue>) -> Self {
        Self {
            mode: mode.into(),
            ranking_type: ranking_type.into(),
            filter: None,
            country: None,
            cursor: None,
            spotlight: None,
            variant: None,
        }
    }

    /// `RankingFilter` or `"all"` / `"friends"`. Defaults to `all`.
    pub fn filter(mut self, filter: impl Into<ParamValue>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Only valid for `performance` rankings.
    pub fn country(mut self, country: u32) -> Self {
        self.country = Some(country);
        self
    }

    pub fn cursor(mut self, cursor: i64) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Only valid for `charts` rankings.
    pub fn spotlight(mut self, spotlight: u64) -> Self {
        self.spotlight = Some(spotlight);
        self
    }

    /// Only valid for `performance` rankings in `mania`.
    pub fn variant(mut self, variant: impl Into<ParamValue>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}
