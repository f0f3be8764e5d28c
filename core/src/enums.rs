//! Enumerated parameter domains.
//!
//! Every string enum can be handed to a builder directly or as a raw string;
//! both end up as the canonical string from [`Choice::as_str`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::value::{expect_int, expect_str, ParamValue};

/// A closed set of string values accepted by the API.
pub trait Choice: Sized + Copy + FromStr {
    /// Declared type reported in `ParameterType` errors, e.g. `GameMode|str`.
    const TYPE_NAME: &'static str;
    const DOMAIN: &'static [&'static str];

    fn as_str(self) -> &'static str;
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $type_name:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl Choice for $name {
            const TYPE_NAME: &'static str = $type_name;
            const DOMAIN: &'static [&'static str] = &[$($value),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for ParamValue {
            fn from(v: $name) -> Self {
                ParamValue::Str(v.as_str().to_string())
            }
        }
    };
}

string_enum!(
    /// Ruleset name.
    GameMode, "GameMode|str" {
        Osu => "osu",
        Taiko => "taiko",
        Fruits => "fruits",
        Mania => "mania",
    }
);

string_enum!(
    RankingType, "RankingType|str" {
        Charts => "charts",
        Country => "country",
        Performance => "performance",
        Score => "score",
    }
);

string_enum!(
    ScoreType, "ScoreType|str" {
        Best => "best",
        Firsts => "firsts",
        Recent => "recent",
    }
);

string_enum!(
    /// Category for a user's beatmapsets.
    BeatmapType, "BeatmapType|str" {
        Favourite => "favourite",
        Graveyard => "graveyard",
        Guest => "guest",
        Loved => "loved",
        MostPlayed => "most_played",
        Nominated => "nominated",
        Pending => "pending",
        Ranked => "ranked",
    }
);

string_enum!(
    RankingFilter, "RankingFilter|str" {
        All => "all",
        Friends => "friends",
    }
);

string_enum!(
    /// osu!mania key-count variant.
    Variant, "Variant|str" {
        FourKey => "4k",
        SevenKey => "7k",
    }
);

string_enum!(
    /// How the user lookup path segment is interpreted.
    UserKey, "UserKey|str" {
        Id => "id",
        Username => "username",
    }
);

/// Numeric ruleset id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GameModeInt {
    Osu = 0,
    Taiko = 1,
    Fruits = 2,
    Mania = 3,
}

impl TryFrom<u8> for GameModeInt {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(GameModeInt::Osu),
            1 => Ok(GameModeInt::Taiko),
            2 => Ok(GameModeInt::Fruits),
            3 => Ok(GameModeInt::Mania),
            other => Err(format!("unknown ruleset id {other}")),
        }
    }
}

impl From<GameModeInt> for u8 {
    fn from(v: GameModeInt) -> Self {
        v as u8
    }
}

impl From<GameModeInt> for ParamValue {
    fn from(v: GameModeInt) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<GameMode> for GameModeInt {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::Osu => GameModeInt::Osu,
            GameMode::Taiko => GameModeInt::Taiko,
            GameMode::Fruits => GameModeInt::Fruits,
            GameMode::Mania => GameModeInt::Mania,
        }
    }
}

/// Normalize an enum-or-string parameter to its typed value.
pub fn expect_choice<C: Choice>(param: &str, value: &ParamValue) -> Result<C, ApiError> {
    let raw = expect_str(param, C::TYPE_NAME, value)?;
    raw.parse().map_err(|_| ApiError::InvalidValue {
        param: param.to_string(),
        reason: format!("must be one of {}, got '{raw}'", quoted(C::DOMAIN)),
    })
}

/// Normalize a `GameModeInt|int` parameter.
pub fn expect_ruleset_id(param: &str, value: &ParamValue) -> Result<GameModeInt, ApiError> {
    let n = expect_int(param, value).map_err(|_| ApiError::ParameterType {
        param: param.to_string(),
        expected: "GameModeInt|int",
        actual: value.type_name(),
    })?;
    u8::try_from(n)
        .map_err(|_| format!("unknown ruleset id {n}"))
        .and_then(GameModeInt::try_from)
        .map_err(|reason| ApiError::InvalidValue {
            param: param.to_string(),
            reason,
        })
}

fn quoted(domain: &[&str]) -> String {
    domain
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
