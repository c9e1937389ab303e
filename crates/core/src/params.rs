//! Helpers for reading typed overrides out of a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. A missing key
//! or a `null` yields the default. A key that is present with the wrong type
//! is an [`EngraveError::InvalidConfig`] naming the key. Range checks happen
//! later, when the assembled configuration is validated.

use crate::color::Srgb;
use crate::error::EngraveError;
use serde_json::Value;

fn read<T>(
    params: &Value,
    name: &str,
    default: T,
    expected: &str,
    parse: impl FnOnce(&Value) -> Option<T>,
) -> Result<T, EngraveError> {
    match params.get(name).filter(|v| !v.is_null()) {
        None => Ok(default),
        Some(v) => parse(v)
            .ok_or_else(|| EngraveError::InvalidConfig(format!("{name} must be {expected}"))),
    }
}

/// Extracts an `f64` from `params[name]`. Integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> Result<f64, EngraveError> {
    read(params, name, default, "a number", Value::as_f64)
}

/// Extracts a `usize` from a non-negative integer at `params[name]`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> Result<usize, EngraveError> {
    read(params, name, default, "a non-negative integer", |v| {
        v.as_u64().and_then(|n| usize::try_from(n).ok())
    })
}

/// Extracts a `u32` from a non-negative integer at `params[name]`.
pub fn param_u32(params: &Value, name: &str, default: u32) -> Result<u32, EngraveError> {
    read(params, name, default, "a non-negative 32-bit integer", |v| {
        v.as_u64().and_then(|n| u32::try_from(n).ok())
    })
}

/// Extracts an optional `u64`. `null` or absence gives `default`.
pub fn param_opt_u64(
    params: &Value,
    name: &str,
    default: Option<u64>,
) -> Result<Option<u64>, EngraveError> {
    read(params, name, default, "a non-negative integer", |v| v.as_u64().map(Some))
}

/// Extracts a `bool` from `params[name]`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> Result<bool, EngraveError> {
    read(params, name, default, "true or false", Value::as_bool)
}

/// Extracts a hex color string from `params[name]`.
pub fn param_color(params: &Value, name: &str, default: Srgb) -> Result<Srgb, EngraveError> {
    read(params, name, default, "a hex color such as \"#3b3630\"", |v| {
        v.as_str().and_then(|s| Srgb::from_hex(s).ok())
    })
}

/// Extracts a list of numeric triples, e.g. `[[45, 4, 4.0], [135, 4, 4.0]]`.
///
/// Every entry must be an array of exactly three numbers.
pub fn param_triples(
    params: &Value,
    name: &str,
    default: &[[f64; 3]],
) -> Result<Vec<[f64; 3]>, EngraveError> {
    read(
        params,
        name,
        default.to_vec(),
        "a list of [number, number, number] triples",
        |v| {
            v.as_array()?
                .iter()
                .map(|row| match row.as_array().map(Vec::as_slice) {
                    Some([a, b, c]) => Some([a.as_f64()?, b.as_f64()?, c.as_f64()?]),
                    _ => None,
                })
                .collect()
        },
    )
}

/// Extracts a string-valued enum through `serde`, e.g. `"round"` for a line cap.
pub fn param_enum<T>(params: &Value, name: &str, default: T) -> Result<T, EngraveError>
where
    T: serde::de::DeserializeOwned,
{
    match params.get(name).filter(|v| !v.is_null()) {
        None => Ok(default),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| EngraveError::InvalidConfig(format!("{name}: {e}"))),
    }
}
