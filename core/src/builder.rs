//! Request builders, one per API operation.
//!
//! # Design
//! `RequestBuilder` holds only the API root and carries no state between
//! calls. Each `build_*` method validates its parameters (types, enumerated
//! domains, cross-parameter rules) and returns an `HttpRequest`, or an
//! `ApiError` before anything touches the network. Authorization is not
//! attached here; sessions add it with `with_auth_headers`.

use crate::enums::{
    expect_choice, expect_ruleset_id, BeatmapType, GameMode, RankingFilter, RankingType,
    ScoreType, UserKey, Variant,
};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::models::UserBeatmapsShape;
use crate::params::{
    BeatmapAttributesParams, BeatmapScoresParams, LookupBeatmapParams, Page, RankingsParams,
    UserBeatmapScoreParams, UserBeatmapScoresParams, UserBeatmapsParams, UserParams,
    UserScoresParams,
};
use crate::value::{expect_int, expect_int_list, expect_str_list, ParamValue};

pub const DEFAULT_API_ROOT: &str = "https://osu.ppy.sh/api/v2";

/// Stateless builder for osu! API v2 requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_root: String,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_API_ROOT)
    }
}

/// Accumulates query pairs in insertion order.
#[derive(Default)]
struct Query(Vec<(String, String)>);

impl Query {
    fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    fn push_opt(&mut self, key: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    fn push_page(&mut self, page: &Page) {
        self.push_opt("limit", page.limit);
        self.push_opt("offset", page.offset);
    }
}

fn optional_mode(value: Option<&ParamValue>) -> Result<Option<GameMode>, ApiError> {
    value.map(|v| expect_choice("mode", v)).transpose()
}

impl RequestBuilder {
    pub fn new(api_root: &str) -> Self {
        Self {
            api_root: api_root.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn request(&self, method: HttpMethod, path: &str, query: Query) -> HttpRequest {
        let mut request = HttpRequest::new(method, format!("{}{path}", self.api_root));
        request.query = query.0;
        request
    }

    // -----------------------------------------------------------------------
    // Beatmaps
    // -----------------------------------------------------------------------

    pub fn build_lookup_beatmap(
        &self,
        params: &LookupBeatmapParams,
    ) -> Result<HttpRequest, ApiError> {
        let id = expect_int("beatmap_id", &params.beatmap_id)?;
        let mut query = Query::default();
        query.push("id", id);
        query.push_opt("checksum", params.checksum.as_deref());
        query.push_opt("filename", params.filename.as_deref());
        Ok(self.request(HttpMethod::Get, "/beatmaps/lookup", query))
    }

    pub fn build_user_beatmap_score(
        &self,
        params: &UserBeatmapScoreParams,
    ) -> Result<HttpRequest, ApiError> {
        let beatmap_id = expect_int("beatmap_id", &params.beatmap_id)?;
        let user_id = expect_int("user_id", &params.user_id)?;
        let mut query = Query::default();
        query.push_opt("mode", optional_mode(params.mode.as_ref())?);
        query.push_opt("mods", params.mods.as_deref());
        Ok(self.request(
            HttpMethod::Get,
            &format!("/beatmaps/{beatmap_id}/scores/users/{user_id}"),
            query,
        ))
    }

    pub fn build_user_beatmap_scores(
        &self,
        params: &UserBeatmapScoresParams,
    ) -> Result<HttpRequest, ApiError> {
        let beatmap_id = expect_int("beatmap_id", &params.beatmap_id)?;
        let user_id = expect_int("user_id", &params.user_id)?;
        let mut query = Query::default();
        query.push_opt("mode", optional_mode(params.mode.as_ref())?);
        Ok(self.request(
            HttpMethod::Get,
            &format!("/beatmaps/{beatmap_id}/scores/users/{user_id}/all"),
            query,
        ))
    }

    pub fn build_beatmap_scores(
        &self,
        params: &BeatmapScoresParams,
    ) -> Result<HttpRequest, ApiError> {
        let beatmap_id = expect_int("beatmap_id", &params.beatmap_id)?;
        let mut query = Query::default();
        query.push_opt("mode", optional_mode(params.mode.as_ref())?);
        query.push_opt("mods", params.mods.as_deref());
        query.push_opt("type", params.leaderboard.as_deref());
        Ok(self.request(
            HttpMethod::Get,
            &format!("/beatmaps/{beatmap_id}/scores"),
            query,
        ))
    }

    /// `beatmap_ids` must be a non-empty list of integers.
    pub fn build_beatmaps(
        &self,
        beatmap_ids: impl Into<ParamValue>,
    ) -> Result<HttpRequest, ApiError> {
        let ids = expect_int_list("beatmap_ids", &beatmap_ids.into())?;
        let mut query = Query::default();
        for id in ids {
            query.push("ids[]", id);
        }
        Ok(self.request(HttpMethod::Get, "/beatmaps", query))
    }

    pub fn build_beatmap(&self, beatmap_id: impl Into<ParamValue>) -> Result<HttpRequest, ApiError> {
        let beatmap_id = expect_int("beatmap_id", &beatmap_id.into())?;
        Ok(self.request(
            HttpMethod::Get,
            &format!("/beatmaps/{beatmap_id}"),
            Query::default(),
        ))
    }

    pub fn build_beatmap_attributes(
        &self,
        params: &BeatmapAttributesParams,
    ) -> Result<HttpRequest, ApiError> {
        let beatmap_id = expect_int("beatmap_id", &params.beatmap_id)?;
        let mut query = Query::default();
        if let Some(mods) = &params.mods {
            for acronym in expect_str_list("mods", mods)? {
                query.push("mods[]", acronym);
            }
        }
        let ruleset: Option<GameMode> = params
            .ruleset
            .as_ref()
            .map(|v| expect_choice("ruleset", v))
            .transpose()?;
        query.push_opt("ruleset", ruleset);
        let ruleset_id = params
            .ruleset_id
            .as_ref()
            .map(|v| expect_ruleset_id("ruleset_id", v))
            .transpose()?;
        query.push_opt("ruleset_id", ruleset_id.map(u8::from));
        Ok(self.request(
            HttpMethod::Post,
            &format!("/beatmaps/{beatmap_id}/attributes"),
            query,
        ))
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn build_user_kudosu(
        &self,
        user_id: impl Into<ParamValue>,
        page: &Page,
    ) -> Result<HttpRequest, ApiError> {
        let user_id = expect_int("user_id", &user_id.into())?;
        let mut query = Query::default();
        query.push_page(page);
        Ok(self.request(HttpMethod::Get, &format!("/users/{user_id}/kudosu"), query))
    }

    pub fn build_user_scores(&self, params: &UserScoresParams) -> Result<HttpRequest, ApiError> {
        let user_id = expect_int("user_id", &params.user_id)?;
        let score_type: ScoreType = expect_choice("type", &params.score_type)?;
        let mut query = Query::default();
        if params.include_fails {
            if score_type != ScoreType::Recent {
                return Err(ApiError::InvalidCombination {
                    param: "include_fails",
                    requires: "type 'recent'",
                });
            }
            query.push("include_fails", 1);
        }
        query.push_opt("mode", optional_mode(params.mode.as_ref())?);
        query.push_page(&params.page);
        Ok(self.request(
            HttpMethod::Get,
            &format!("/users/{user_id}/scores/{score_type}"),
            query,
        ))
    }

    /// Also returns the result shape the category implies.
    pub fn build_user_beatmaps(
        &self,
        params: &UserBeatmapsParams,
    ) -> Result<(HttpRequest, UserBeatmapsShape), ApiError> {
        let user_id = expect_int("user_id", &params.user_id)?;
        let category: BeatmapType = expect_choice("type", &params.category)?;
        let mut query = Query::default();
        query.push_page(&params.page);
        let request = self.request(
            HttpMethod::Get,
            &format!("/users/{user_id}/beatmapsets/{category}"),
            query,
        );
        Ok((request, UserBeatmapsShape::for_category(category)))
    }

    pub fn build_user_recent_activity(
        &self,
        user_id: impl Into<ParamValue>,
        page: &Page,
    ) -> Result<HttpRequest, ApiError> {
        let user_id = expect_int("user_id", &user_id.into())?;
        let mut query = Query::default();
        query.push_page(page);
        Ok(self.request(
            HttpMethod::Get,
            &format!("/users/{user_id}/recent_activity"),
            query,
        ))
    }

    pub fn build_user(&self, params: &UserParams) -> Result<HttpRequest, ApiError> {
        let username = match &params.username {
            ParamValue::Int(id) => id.to_string(),
            ParamValue::Str(name) if name.trim().is_empty() => {
                return Err(ApiError::InvalidValue {
                    param: "username".to_string(),
                    reason: "cannot be blank".to_string(),
                })
            }
            ParamValue::Str(name) => urlencoding::encode(name).into_owned(),
            other => {
                return Err(ApiError::ParameterType {
                    param: "username".to_string(),
                    expected: "int|str",
                    actual: other.type_name(),
                })
            }
        };
        let mode = optional_mode(params.mode.as_ref())?;

        let mut query = Query::default();
        match &params.key {
            // A blank key means "let the server guess", same as omitting it.
            Some(ParamValue::Str(s)) if s.trim().is_empty() => {}
            Some(key) => query.push("key", expect_choice::<UserKey>("key", key)?),
            None => {}
        }

        let path = match mode {
            Some(mode) => format!("/users/{username}/{mode}"),
            None => format!("/users/{username}"),
        };
        Ok(self.request(HttpMethod::Get, &path, query))
    }

    /// `user_ids` must be a non-empty list of integers.
    pub fn build_users(&self, user_ids: impl Into<ParamValue>) -> Result<HttpRequest, ApiError> {
        let ids = expect_int_list("user_ids", &user_ids.into())?;
        let mut query = Query::default();
        for id in ids {
            query.push("ids[]", id);
        }
        Ok(self.request(HttpMethod::Get, "/users", query))
    }

    // -----------------------------------------------------------------------
    // Rankings
    // -----------------------------------------------------------------------

    pub fn build_rankings(&self, params: &RankingsParams) -> Result<HttpRequest, ApiError> {
        let mode: GameMode = expect_choice("mode", &params.mode)?;
        let ranking_type: RankingType = expect_choice("type", &params.ranking_type)?;

        let mut query = Query::default();
        let filter = match &params.filter {
            Some(v) => expect_choice("filter", v)?,
            None => RankingFilter::All,
        };
        query.push("filter", filter);

        if let Some(cursor) = params.cursor {
            if cursor < 0 {
                return Err(ApiError::InvalidValue {
                    param: "cursor".to_string(),
                    reason: format!("must be greater than -1, got {cursor}"),
                });
            }
            query.push("cursor", cursor);
        }

        if let Some(country) = params.country {
            if ranking_type != RankingType::Performance {
                return Err(ApiError::InvalidCombination {
                    param: "country",
                    requires: "type 'performance'",
                });
            }
            query.push("country", country);
        }

        if let Some(spotlight) = params.spotlight {
            if ranking_type != RankingType::Charts {
                return Err(ApiError::InvalidCombination {
                    param: "spotlight",
                    requires: "type 'charts'",
                });
            }
            query.push("spotlight", spotlight);
        }

        if let Some(variant) = &params.variant {
            let variant: Variant = expect_choice("variant", variant)?;
            if ranking_type != RankingType::Performance {
                return Err(ApiError::InvalidCombination {
                    param: "variant",
                    requires: "type 'performance'",
                });
            }
            if mode != GameMode::Mania {
                return Err(ApiError::InvalidCombination {
                    param: "variant",
                    requires: "mode 'mania'",
                });
            }
            query.push("variant", variant);
        }

        Ok(self.request(
            HttpMethod::Get,
            &format!("/rankings/{mode}/{ranking_type}"),
            query,
        ))
    }

    pub fn build_spotlights(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/spotlights", Query::default())
    }
}
