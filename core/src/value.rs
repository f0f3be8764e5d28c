//! Loosely-typed parameter values checked at the builder boundary.
//!
//! Identifiers and union-typed options arrive as `ParamValue` so that a
//! caller forwarding user input (a chat command, a query string) gets a
//! `ParameterType` error naming the parameter instead of a parse panic.

use crate::error::ApiError;

/// A caller-supplied parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Type name used in `ParameterType` errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Bool(_) => "bool",
            ParamValue::Str(_) => "str",
            ParamValue::List(_) => "list",
        }
    }
}

macro_rules! int_from {
    ($($t:ty),*) => {
        $(impl From<$t> for ParamValue {
            fn from(v: $t) -> Self {
                ParamValue::Int(i64::from(v))
            }
        })*
    };
}

int_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        // osu! ids fit comfortably in i64; saturate rather than wrap.
        ParamValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue> + Clone> From<&[T]> for ParamValue {
    fn from(v: &[T]) -> Self {
        ParamValue::List(v.iter().cloned().map(Into::into).collect())
    }
}

fn type_error(param: &str, expected: &'static str, value: &ParamValue) -> ApiError {
    ApiError::ParameterType {
        param: param.to_string(),
        expected,
        actual: value.type_name(),
    }
}

/// Require an integer.
pub fn expect_int(param: &str, value: &ParamValue) -> Result<i64, ApiError> {
    match value {
        ParamValue::Int(n) => Ok(*n),
        other => Err(type_error(param, "int", other)),
    }
}

/// Require a string, using `expected` as the declared type in errors.
pub fn expect_str<'a>(
    param: &str,
    expected: &'static str,
    value: &'a ParamValue,
) -> Result<&'a str, ApiError> {
    match value {
        ParamValue::Str(s) => Ok(s),
        other => Err(type_error(param, expected, other)),
    }
}

/// Require a non-empty list of integers.
///
/// Every element is checked; the error names the first offending index.
pub fn expect_int_list(param: &str, value: &ParamValue) -> Result<Vec<i64>, ApiError> {
    let items = expect_list(param, value)?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| expect_int(&format!("{param}[{i}]"), item))
        .collect()
}

/// Require a non-empty list of strings.
pub fn expect_str_list(param: &str, value: &ParamValue) -> Result<Vec<String>, ApiError> {
    let items = expect_list(param, value)?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| expect_str(&format!("{param}[{i}]"), "str", item).map(str::to_string))
        .collect()
}

fn expect_list<'a>(param: &str, value: &'a ParamValue) -> Result<&'a [ParamValue], ApiError> {
    match value {
        ParamValue::List(items) if items.is_empty() => Err(ApiError::InvalidValue {
            param: param.to_string(),
            reason: "must not be empty".to_string(),
        }),
        ParamValue::List(items) => Ok(items),
        other => Err(type_error(param, "list", other)),
    }
}
