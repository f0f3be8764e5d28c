//! Verify builders and decoding against JSON test vectors stored in `test-vectors/`.
//!
//! `requests.json` pairs builder inputs with the request (or parameter
//! error) they must produce. `decode.json` pairs simulated responses with
//! the decode outcome. Inputs are JSON values converted to `ParamValue`, so a
//! vector can hand a builder the wrong type on purpose.

use osu_core::decode::{decode, Decoded};
use osu_core::models::{Beatmap, KudosuHistory, Rankings, Spotlights, User};
use osu_core::{
    ApiError, BeatmapAttributesParams, BeatmapScoresParams, HttpMethod, HttpRequest, HttpResponse,
    LookupBeatmapParams, Page, ParamValue, RankingsParams, RequestBuilder, UserBeatmapsParams,
    UserParams, UserScoresParams,
};
use serde_json::Value;

const ROOT: &str = "https://osu.ppy.sh/api/v2";

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Convert a JSON input into the dynamic parameter a caller could pass.
fn param(value: &Value) -> ParamValue {
    match value {
        Value::Bool(b) => ParamValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ParamValue::Int(i),
            None => ParamValue::Float(n.as_f64().unwrap()),
        },
        Value::String(s) => ParamValue::Str(s.clone()),
        Value::Array(items) => ParamValue::List(items.iter().map(param).collect()),
        other => panic!("unsupported input: {other}"),
    }
}

fn page(input: &Value) -> Page {
    Page {
        limit: input["limit"].as_u64().map(|v| v as u32),
        offset: input["offset"].as_u64().map(|v| v as u32),
    }
}

fn build(operation: &str, input: &Value) -> Result<HttpRequest, ApiError> {
    let b = RequestBuilder::new(ROOT);
    let opt = |key: &str| input.get(key).map(param);
    match operation {
        "user" => {
            let mut params = UserParams::new(param(&input["username"]));
            params.mode = opt("mode");
            params.key = opt("key");
            b.build_user(&params)
        }
        "users" => b.build_users(param(&input["ids"])),
        "beatmap" => b.build_beatmap(param(&input["id"])),
        "beatmaps" => b.build_beatmaps(param(&input["ids"])),
        "lookup_beatmap" => {
            let mut params = LookupBeatmapParams::new(param(&input["id"]));
            params.checksum = input["checksum"].as_str().map(str::to_string);
            params.filename = input["filename"].as_str().map(str::to_string);
            b.build_lookup_beatmap(&params)
        }
        "beatmap_scores" => {
            let mut params = BeatmapScoresParams::new(param(&input["id"]));
            params.mode = opt("mode");
            params.mods = input["mods"].as_str().map(str::to_string);
            params.leaderboard = input["type"].as_str().map(str::to_string);
            b.build_beatmap_scores(&params)
        }
        "beatmap_attributes" => {
            let mut params = BeatmapAttributesParams::new(param(&input["id"]));
            params.mods = opt("mods");
            params.ruleset = opt("ruleset");
            params.ruleset_id = opt("ruleset_id");
            b.build_beatmap_attributes(&params)
        }
        "user_scores" => {
            let mut params = UserScoresParams::new(param(&input["user_id"]), param(&input["type"]));
            params.include_fails = input["include_fails"].as_bool().unwrap_or(false);
            params.mode = opt("mode");
            params.page = page(input);
            b.build_user_scores(&params)
        }
        "user_beatmaps" => {
            let mut params =
                UserBeatmapsParams::new(param(&input["user_id"]), param(&input["type"]));
            params.page = page(input);
            b.build_user_beatmaps(&params).map(|(request, _)| request)
        }
        "user_kudosu" => b.build_user_kudosu(param(&input["user_id"]), &page(input)),
        "rankings" => {
            let mut params = RankingsParams::new(param(&input["mode"]), param(&input["type"]));
            params.filter = opt("filter");
            params.country = input["country"].as_u64().map(|v| v as u32);
            params.cursor = input["cursor"].as_i64();
            params.spotlight = input["spotlight"].as_u64();
            params.variant = opt("variant");
            b.build_rankings(&params)
        }
        "spotlights" => Ok(b.build_spotlights()),
        other => panic!("unknown operation: {other}"),
    }
}

fn error_kind(err: &ApiError) -> (&'static str, String) {
    match err {
        ApiError::ParameterType { param, .. } => ("ParameterType", param.clone()),
        ApiError::InvalidValue { param, .. } => ("InvalidValue", param.clone()),
        ApiError::InvalidCombination { param, .. } => ("InvalidCombination", param.to_string()),
        other => panic!("not a parameter error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = build(case["operation"].as_str().unwrap(), &case["input"]);

        if let Some(expected) = case.get("expected_error") {
            let err = result.expect_err(name);
            let (kind, param) = error_kind(&err);
            assert_eq!(kind, expected["kind"].as_str().unwrap(), "{name}: error kind");
            assert_eq!(param, expected["param"].as_str().unwrap(), "{name}: error param");
            continue;
        }

        let req = result.unwrap_or_else(|e| panic!("{name}: {e}"));
        let expected = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{ROOT}{}", expected["path"].as_str().unwrap()), "{name}: url");

        let expected_query: Vec<(String, String)> = expected["query"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                let arr = pair.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.query, expected_query, "{name}: query");
        assert_eq!(req.header("accept"), Some("application/json"), "{name}: accept");
        assert!(req.header("authorization").is_none(), "{name}: builders never authorize");
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode into the named shape and report the outcome as a vector label.
fn outcome(shape: &'static str, response: &HttpResponse, strict: bool) -> String {
    fn label<T>(result: Result<Decoded<T>, ApiError>) -> String {
        match result {
            Ok(Decoded::Value(_)) => "value".to_string(),
            Ok(Decoded::Absent) => "absent".to_string(),
            Ok(Decoded::Unauthenticated) => "unauthenticated".to_string(),
            Err(ApiError::HttpError { .. }) => "HttpError".to_string(),
            Err(ApiError::Decoding { .. }) => "Decoding".to_string(),
            Err(other) => format!("unexpected: {other}"),
        }
    }
    match shape {
        "Spotlights" => label(decode::<Spotlights>(response, shape, strict)),
        "User" => label(decode::<User>(response, shape, strict)),
        "Beatmap" => label(decode::<Beatmap>(response, shape, strict)),
        "Rankings" => label(decode::<Rankings>(response, shape, strict)),
        "Vec<KudosuHistory>" => label(decode::<Vec<KudosuHistory>>(response, shape, strict)),
        other => panic!("unknown shape: {other}"),
    }
}

#[test]
fn decode_test_vectors() {
    let raw = include_str!("../../test-vectors/decode.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };
        let shape: &'static str = match case["shape"].as_str().unwrap() {
            "Spotlights" => "Spotlights",
            "User" => "User",
            "Beatmap" => "Beatmap",
            "Rankings" => "Rankings",
            "Vec<KudosuHistory>" => "Vec<KudosuHistory>",
            other => panic!("unknown shape: {other}"),
        };
        let strict = case["strict_auth"].as_bool().unwrap_or(false);
        assert_eq!(
            outcome(shape, &response, strict),
            case["expected"].as_str().unwrap(),
            "{name}"
        );
    }
}

#[test]
fn fixture_bodies_decode() {
    let user: User =
        serde_json::from_str(include_str!("../../test-vectors/bodies/user.json")).unwrap();
    assert_eq!(user.compact.country_code, "AU");
    assert_eq!(user.compact.statistics.unwrap().level.current, 68);

    let beatmap: Beatmap =
        serde_json::from_str(include_str!("../../test-vectors/bodies/beatmap.json")).unwrap();
    assert!(beatmap.compact.beatmapset.unwrap().covers.cover_2x.ends_with("cover@2x.jpg"));
    assert_eq!(u8::from(beatmap.mode_int), 0);

    let rankings: Rankings =
        serde_json::from_str(include_str!("../../test-vectors/bodies/rankings.json")).unwrap();
    let row = &rankings.ranking.unwrap()[0];
    assert_eq!(row.user.as_ref().unwrap().username, "mrekk");
}
