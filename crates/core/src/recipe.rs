//! Reproducible record of a hatching run.
//!
//! A [`Recipe`] captures everything needed to render the same page again:
//! page size, the run seed, and the parameter overrides.

use crate::error::EngraveError;
use serde::{Deserialize, Serialize};

/// Page size, seed, and parameter overrides of one run.
///
/// Two identical recipes fed to the same binary produce bit-identical
/// stroke geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub width: f64,
    pub height: f64,
    pub seed: u64,
    #[serde(default = "empty_object")]
    pub params: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Recipe {
    /// Creates a recipe with no parameter overrides.
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            params: empty_object(),
        }
    }

    /// Checks that the page is non-empty and finite.
    pub fn validate(&self) -> Result<(), EngraveError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(EngraveError::InvalidDimensions)
        }
    }

    /// Parameter overrides with the page size and seed merged in.
    ///
    /// Keys in `params` are kept; `width`, `height`, and `seed` are always
    /// taken from the recipe's own fields.
    pub fn merged_params(&self) -> serde_json::Value {
        let mut map = match &self.params {
            serde_json::Value::Object(m) => m.clone(),
            _ => serde_json::Map::new(),
        };
        map.insert("width".into(), self.width.into());
        map.insert("height".into(), self.height.into());
        map.insert("seed".into(), self.seed.into());
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_has_empty_params() {
        let r = Recipe::new(3000.0, 1800.0, 42);
        assert_eq!(r.params, json!({}));
        assert_eq!(r.seed, 42);
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut r = Recipe::new(800.0, 600.0, u64::MAX);
        r.params = json!({"families": 3, "gap_prob": 0.2});
        let text = serde_json::to_string_pretty(&r).unwrap();
        let back: Recipe = serde_json::from_str(&text).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn missing_params_deserialize_as_empty_object() {
        let r: Recipe = serde_json::from_str(r#"{"width": 10, "height": 20, "seed": 1}"#).unwrap();
        assert_eq!(r.params, json!({}));
    }

    #[test]
    fn validate_rejects_bad_dimensions() {
        assert!(Recipe::new(100.0, 100.0, 1).validate().is_ok());
        assert!(Recipe::new(0.0, 100.0, 1).validate().is_err());
        assert!(Recipe::new(100.0, -5.0, 1).validate().is_err());
        assert!(Recipe::new(f64::NAN, 100.0, 1).validate().is_err());
        assert!(Recipe::new(f64::INFINITY, 100.0, 1).validate().is_err());
    }

    #[test]
    fn merged_params_overrides_page_and_seed() {
        let mut r = Recipe::new(200.0, 100.0, 9);
        r.params = json!({"width": 5, "families": 2});
        let merged = r.merged_params();
        assert_eq!(merged["width"], json!(200.0));
        assert_eq!(merged["height"], json!(100.0));
        assert_eq!(merged["seed"], json!(9));
        assert_eq!(merged["families"], json!(2));
    }
}
