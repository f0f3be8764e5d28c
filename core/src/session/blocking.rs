use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::auth::{
    build_revoke_request, build_token_request, parse_token_response, Token, TokenState,
    TokenStatus,
};
use crate::config::ClientBuilder;
use crate::decode::{decode, decode_user_beatmaps};
use crate::error::ApiError;
use crate::http::{with_auth_headers, HttpRequest, HttpResponse};
use crate::models::{
    Attributes, Beatmap, BeatmapScores, BeatmapUserScore, Beatmaps, Event, KudosuHistory,
    Rankings, Score, Scores, Spotlights, User, UserBeatmaps, Users,
};
use crate::params::{
    BeatmapAttributesParams, BeatmapScoresParams, LookupBeatmapParams, Page, RankingsParams,
    UserBeatmapScoreParams, UserBeatmapScoresParams, UserBeatmapsParams, UserParams,
    UserScoresParams,
};
use crate::transport::BlockingTransport;
use crate::value::ParamValue;

use super::{settle, warn_unrevoked, SessionCore};

/// Blocking osu! API session.
///
/// Every operation returns `Ok(None)` when the service answers with an
/// error body (unknown id, restricted user) and `Err` for everything else
/// that goes wrong.
///
/// Call [`close`](Self::close) when done; dropping the session does not
/// revoke its token.
pub struct OsuClient<T: BlockingTransport> {
    core: SessionCore,
    token: Mutex<TokenState>,
    transport: T,
}

impl<T: BlockingTransport> OsuClient<T> {
    pub(crate) fn from_parts(parts: ClientBuilder, transport: T) -> Self {
        Self {
            core: SessionCore::new(parts),
            token: Mutex::new(TokenState::default()),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn state(&self) -> MutexGuard<'_, TokenState> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn token_status(&self) -> TokenStatus {
        self.state().status(self.core.clock.now())
    }

    fn acquire(&self) -> Result<Token, ApiError> {
        let request = build_token_request(&self.core.token_url, &self.core.credentials)?;
        let now = self.core.clock.now();
        let response = self.transport.send(request)?;
        parse_token_response(&response, now).inspect_err(|e| {
            warn!(client_id = self.core.credentials.client_id, error = %e, "token request failed");
        })
    }

    /// Return a token valid right now, acquiring one if none is held or the
    /// held one has expired.
    pub fn ensure_valid(&self) -> Result<Token, ApiError> {
        let mut state = self.state();
        let now = self.core.clock.now();
        if let Some(token) = state.valid(now) {
            return Ok(token.clone());
        }
        let renewed = state.clear().is_some();
        let token = self.acquire()?;
        self.core.record_acquired(renewed, &token);
        state.replace(token.clone());
        Ok(token)
    }

    /// Revoke the held token on the server and forget it locally.
    #[instrument(skip(self))]
    pub fn revoke(&self) -> Result<(), ApiError> {
        let token = self.state().clear().ok_or_else(|| {
            ApiError::InvalidState("no access token to revoke".to_string())
        })?;
        let request = build_revoke_request(self.core.builder.api_root(), &token);
        let response = self.transport.send(request)?;
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        info!("revoked access token");
        Ok(())
    }

    /// Revoke the token and end the session.
    pub fn close(self) -> Result<(), ApiError> {
        self.revoke()
    }

    fn send_authorized(&self, request: HttpRequest) -> Result<(HttpResponse, Token), ApiError> {
        let token = self.ensure_valid()?;
        let request = with_auth_headers(request, &token);
        debug!(method = request.method.as_str(), url = %request.url, "dispatching request");
        let response = self.transport.send(request)?;
        debug!(status = response.status, "received response");
        Ok((response, token))
    }

    fn execute<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
        shape: &'static str,
    ) -> Result<Option<R>, ApiError> {
        let (response, token) = self.send_authorized(request)?;
        let decoded = decode(&response, shape, self.core.strict_auth)?;
        Ok(settle(&mut self.state(), decoded, &token))
    }

    // -----------------------------------------------------------------------
    // Beatmaps
    // -----------------------------------------------------------------------

    #[instrument(skip(self))]
    pub fn lookup_beatmap(&self, params: &LookupBeatmapParams) -> Result<Option<Beatmap>, ApiError> {
        let request = self.core.builder.build_lookup_beatmap(params)?;
        self.execute(request, "Beatmap")
    }

    #[instrument(skip(self))]
    pub fn user_beatmap_score(
        &self,
        params: &UserBeatmapScoreParams,
    ) -> Result<Option<BeatmapUserScore>, ApiError> {
        let request = self.core.builder.build_user_beatmap_score(params)?;
        self.execute(request, "BeatmapUserScore")
    }

    #[instrument(skip(self))]
    pub fn user_beatmap_scores(
        &self,
        params: &UserBeatmapScoresParams,
    ) -> Result<Option<Scores>, ApiError> {
        let request = self.core.builder.build_user_beatmap_scores(params)?;
        self.execute(request, "Scores")
    }

    #[instrument(skip(self))]
    pub fn beatmap_scores(
        &self,
        params: &BeatmapScoresParams,
    ) -> Result<Option<BeatmapScores>, ApiError> {
        let request = self.core.builder.build_beatmap_scores(params)?;
        self.execute(request, "BeatmapScores")
    }

    #[instrument(skip_all)]
    pub fn beatmaps(&self, beatmap_ids: impl Into<ParamValue>) -> Result<Option<Beatmaps>, ApiError> {
        let request = self.core.builder.build_beatmaps(beatmap_ids)?;
        self.execute(request, "Beatmaps")
    }

    #[instrument(skip_all)]
    pub fn beatmap(&self, beatmap_id: impl Into<ParamValue>) -> Result<Option<Beatmap>, ApiError> {
        let request = self.core.builder.build_beatmap(beatmap_id)?;
        self.execute(request, "Beatmap")
    }

    #[instrument(skip(self))]
    pub fn beatmap_attributes(
        &self,
        params: &BeatmapAttributesParams,
    ) -> Result<Option<Attributes>, ApiError> {
        let request = self.core.builder.build_beatmap_attributes(params)?;
        self.execute(request, "Attributes")
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    #[instrument(skip(self, user_id))]
    pub fn user_kudosu(
        &self,
        user_id: impl Into<ParamValue>,
        page: &Page,
    ) -> Result<Option<Vec<KudosuHistory>>, ApiError> {
        let request = self.core.builder.build_user_kudosu(user_id, page)?;
        self.execute(request, "Vec<KudosuHistory>")
    }

    #[instrument(skip(self))]
    pub fn user_scores(&self, params: &UserScoresParams) -> Result<Option<Vec<Score>>, ApiError> {
        let request = self.core.builder.build_user_scores(params)?;
        self.execute(request, "Vec<Score>")
    }

    /// The variant of [`UserBeatmaps`] is decided by `params.category`.
    #[instrument(skip(self))]
    pub fn user_beatmaps(
        &self,
        params: &UserBeatmapsParams,
    ) -> Result<Option<UserBeatmaps>, ApiError> {
        let (request, shape) = self.core.builder.build_user_beatmaps(params)?;
        let (response, token) = self.send_authorized(request)?;
        let decoded = decode_user_beatmaps(&response, shape, self.core.strict_auth)?;
        Ok(settle(&mut self.state(), decoded, &token))
    }

    #[instrument(skip(self, user_id))]
    pub fn user_recent_activity(
        &self,
        user_id: impl Into<ParamValue>,
        page: &Page,
    ) -> Result<Option<Vec<Event>>, ApiError> {
        let request = self.core.builder.build_user_recent_activity(user_id, page)?;
        self.execute(request, "Vec<Event>")
    }

    #[instrument(skip(self))]
    pub fn user(&self, params: &UserParams) -> Result<Option<User>, ApiError> {
        let request = self.core.builder.build_user(params)?;
        self.execute(request, "User")
    }

    #[instrument(skip_all)]
    pub fn users(&self, user_ids: impl Into<ParamValue>) -> Result<Option<Users>, ApiError> {
        let request = self.core.builder.build_users(user_ids)?;
        self.execute(request, "Users")
    }

    // -----------------------------------------------------------------------
    // Rankings
    // -----------------------------------------------------------------------

    #[instrument(skip(self))]
    pub fn rankings(&self, params: &RankingsParams) -> Result<Option<Rankings>, ApiError> {
        let request = self.core.builder.build_rankings(params)?;
        self.execute(request, "Rankings")
    }

    #[instrument(skip(self))]
    pub fn spotlights(&self) -> Result<Option<Spotlights>, ApiError> {
        let request = self.core.builder.build_spotlights();
        self.execute(request, "Spotlights")
    }
}

impl<T: BlockingTransport> Drop for OsuClient<T> {
    fn drop(&mut self) {
        let state = self.token.get_mut().unwrap_or_else(PoisonError::into_inner);
        warn_unrevoked(state, self.core.clock.now());
    }
}
