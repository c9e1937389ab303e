//! Output naming, parameter layering, and recipe sidecars.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use engrave_core::Recipe;
use engrave_hatch::HatchConfig;
use engrave_render::OutputFormat;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// `YYYY-MM-DD-HH-MM-SS.CC` in UTC, centisecond resolution.
pub fn timestamp_slug(now: DateTime<Utc>) -> String {
    let centis = (now.timestamp_subsec_millis() / 10).min(99);
    format!("{}.{centis:02}", now.format("%Y-%m-%d-%H-%M-%S"))
}

/// Default output file name, unique per run to the centisecond.
pub fn output_name(prefix: &str, ext: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}-{}.{ext}", timestamp_slug(now))
}

/// The recipe sidecar written next to an output file.
pub fn recipe_path(output: &Path) -> PathBuf {
    output.with_extension("json")
}

/// Builds the parameter object for one run.
///
/// Later layers win: recipe, then `--params`, then explicit flags.
pub fn layer_params(
    recipe: Option<&Recipe>,
    overrides: &Value,
    width: Option<f64>,
    height: Option<f64>,
    seed: Option<u64>,
) -> Result<Value, CliError> {
    let mut map = match recipe.map(Recipe::merged_params) {
        Some(Value::Object(m)) => m,
        _ => Map::new(),
    };
    match overrides {
        Value::Object(o) => map.extend(o.iter().map(|(k, v)| (k.clone(), v.clone()))),
        Value::Null => {}
        _ => return Err(CliError::Input("--params must be a JSON object".into())),
    }
    if let Some(w) = width {
        map.insert("width".into(), w.into());
    }
    if let Some(h) = height {
        map.insert("height".into(), h.into());
    }
    if let Some(s) = seed {
        map.insert("seed".into(), s.into());
    }
    Ok(Value::Object(map))
}

/// Builds the run configuration from layered parameters.
///
/// A present key of the wrong type is the user's input, so it reports as
/// [`CliError::Input`]. Range violations surface later from the engine.
pub fn load_config(params: &Value) -> Result<HatchConfig, CliError> {
    HatchConfig::from_json(params)
        .map_err(|e| CliError::Input(format!("invalid parameter: {e}")))
}

/// Picks the output format: `--format` wins, then the output extension,
/// then SVG.
pub fn resolve_format(
    name: Option<&str>,
    out_path: Option<&Path>,
) -> Result<OutputFormat, CliError> {
    match (name, out_path) {
        (Some(name), _) => {
            OutputFormat::from_name(name).map_err(|e| CliError::Input(e.to_string()))
        }
        (None, Some(path)) => Ok(OutputFormat::from_path(path).unwrap_or(OutputFormat::Svg)),
        (None, None) => Ok(OutputFormat::Svg),
    }
}

/// Reads and validates a recipe file.
pub fn read_recipe(path: &Path) -> Result<Recipe, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read recipe {}: {e}", path.display())))?;
    let recipe: Recipe = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid recipe {}: {e}", path.display())))?;
    recipe.validate()?;
    Ok(recipe)
}

/// Captures a resolved configuration and seed as a recipe.
///
/// Every parameter is recorded, not only the overrides, so the recipe
/// survives changes to the defaults.
pub fn recipe_for(cfg: &HatchConfig, seed: u64) -> Recipe {
    let mut recipe = Recipe::new(cfg.width, cfg.height, seed);
    if let Value::Object(mut params) = cfg.to_json() {
        for key in ["width", "height", "seed"] {
            params.remove(key);
        }
        recipe.params = Value::Object(params);
    }
    recipe
}

pub fn write_recipe(recipe: &Recipe, path: &Path) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(recipe)?;
    std::fs::write(path, text)
        .map_err(|e| CliError::Io(format!("cannot write recipe {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9)
            .unwrap()
            .with_nanosecond(456_000_000)
            .unwrap()
    }

    #[test]
    fn slug_has_centiseconds() {
        assert_eq!(timestamp_slug(fixed_time()), "2024-03-05-07-08-09.45");
    }

    #[test]
    fn output_name_joins_prefix_and_extension() {
        assert_eq!(
            output_name("hatching", "svg", fixed_time()),
            "hatching-2024-03-05-07-08-09.45.svg"
        );
    }

    #[test]
    fn recipe_path_swaps_extension() {
        assert_eq!(
            recipe_path(Path::new("out/hatching-1.png")),
            PathBuf::from("out/hatching-1.json")
        );
    }

    #[test]
    fn flags_override_params_override_recipe() {
        let mut recipe = Recipe::new(300.0, 200.0, 7);
        recipe.params = json!({"families": 2, "gap_prob": 0.5});
        let merged = layer_params(
            Some(&recipe),
            &json!({"families": 4}),
            Some(120.0),
            None,
            Some(9),
        )
        .unwrap();
        assert_eq!(merged["families"], json!(4));
        assert_eq!(merged["gap_prob"], json!(0.5));
        assert_eq!(merged["width"], json!(120.0));
        assert_eq!(merged["height"], json!(200.0));
        assert_eq!(merged["seed"], json!(9));
    }

    #[test]
    fn non_object_params_are_rejected() {
        let result = layer_params(None, &json!([1, 2]), None, None, None);
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn recipe_round_trip_reproduces_config() {
        let cfg = load_config(&json!({
            "width": 640.0,
            "height": 480.0,
            "families": 3,
            "gap_prob": 0.25,
        }))
        .unwrap();
        let recipe = recipe_for(&cfg, 1234);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        write_recipe(&recipe, &path).unwrap();
        let loaded = read_recipe(&path).unwrap();
        assert_eq!(loaded, recipe);

        let params = layer_params(Some(&loaded), &Value::Null, None, None, None).unwrap();
        let replayed = load_config(&params).unwrap();
        assert_eq!(replayed.seed, Some(1234));
        assert_eq!(replayed.families, 3);
        assert_eq!(replayed.width, 640.0);
        assert_eq!(replayed.gap_prob, 0.25);
        assert_eq!(replayed.ink.to_hex(), cfg.ink.to_hex());
    }

    #[test]
    fn mistyped_parameter_is_input_error() {
        match load_config(&json!({"seed": -5})) {
            Err(CliError::Input(msg)) => assert!(msg.contains("seed"), "{msg}"),
            Err(other) => panic!("expected input error, got {other}"),
            Ok(_) => panic!("negative seed accepted"),
        }
    }

    #[test]
    fn format_flag_beats_extension() {
        let path = Path::new("page.png");
        assert!(matches!(
            resolve_format(Some("svg"), Some(path)),
            Ok(OutputFormat::Svg)
        ));
        assert!(matches!(resolve_format(None, Some(path)), Ok(OutputFormat::Png)));
        assert!(matches!(
            resolve_format(None, Some(Path::new("page.txt"))),
            Ok(OutputFormat::Svg)
        ));
        assert!(matches!(resolve_format(None, None), Ok(OutputFormat::Svg)));
    }

    #[test]
    fn unknown_format_is_input_error() {
        assert!(matches!(
            resolve_format(Some("tiff"), None),
            Err(CliError::Input(_))
        ));
    }

    #[test]
    fn read_recipe_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = read_recipe(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(CliError::Io(_))));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(read_recipe(&bad), Err(CliError::Input(_))));

        let empty_page = dir.path().join("empty.json");
        std::fs::write(&empty_page, r#"{"width": 0, "height": 10, "seed": 1}"#).unwrap();
        assert!(matches!(read_recipe(&empty_page), Err(CliError::Engine(_))));
    }
}
