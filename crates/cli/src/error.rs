//! Errors of the `engrave` binary and the exit code each one maps to.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | page (and recipe) written |
//! | 2    | bad command line, reported by clap |
//! | 10   | configuration rejected by the generator or a drawing surface |
//! | 11   | recipe unreadable, or output/recipe not writable |
//! | 12   | malformed `--params`, recipe, parameter value, or format name |
//! | 13   | JSON report could not be serialized |

use engrave_core::EngraveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Validation failed in the hatching engine or a sink refused the page,
    /// e.g. `ghost_max` above its limit or a raster page that is too large.
    #[error("{0}")]
    Engine(EngraveError),
    /// A recipe could not be read, or the page or recipe could not be written.
    #[error("{0}")]
    Io(String),
    /// The user handed over something unparseable: `--params` that is not a
    /// JSON object, a corrupt recipe, a mistyped value, an unknown format.
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// Surface write failures keep their I/O exit code; everything else the
/// engine raises is a rejected configuration.
impl From<EngraveError> for CliError {
    fn from(e: EngraveError) -> Self {
        match e {
            EngraveError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{load_config, read_recipe, resolve_format};
    use engrave_core::Srgb;
    use engrave_hatch::{HatchConfig, Hatcher};
    use engrave_render::{render_to_file, OutputFormat};
    use serde_json::json;

    #[test]
    fn out_of_range_parameter_exits_10() {
        let cfg = load_config(&json!({"ghost_max": 40})).unwrap();
        let Err(e) = Hatcher::new(cfg, 1) else {
            panic!("ghost_max of 40 accepted");
        };
        let err = CliError::from(e);
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("ghost_max"), "{err}");
    }

    #[test]
    fn missing_recipe_exits_11() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_recipe(&dir.path().join("lost.json")).unwrap_err();
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("lost.json"), "{err}");
    }

    #[test]
    fn unwritable_output_exits_11() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("page.svg");
        let cfg = HatchConfig {
            width: 50.0,
            height: 50.0,
            families: 0,
            ..HatchConfig::default()
        };
        let hatcher = Hatcher::new(cfg, 1).unwrap();
        let result =
            render_to_file(OutputFormat::Svg, &path, 50.0, 50.0, Srgb::PAPER, hatcher);
        let Err(e) = result else {
            panic!("wrote into a missing directory");
        };
        let err = CliError::from(e);
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn unknown_format_exits_12() {
        let err = resolve_format(Some("tiff"), None).unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("tiff"), "{err}");
    }

    #[test]
    fn mistyped_parameter_exits_12() {
        let err = load_config(&json!({"gap_prob": "0.5"})).unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("gap_prob"), "{err}");
    }

    #[test]
    fn corrupt_recipe_exits_12() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, "{\"width\": ").unwrap();
        assert_eq!(read_recipe(&path).unwrap_err().exit_code(), 12);
    }

    #[test]
    fn report_serialization_failure_exits_13() {
        let bad = serde_json::from_str::<serde_json::Value>("{oops");
        assert_eq!(CliError::from(bad.unwrap_err()).exit_code(), 13);
    }
}
