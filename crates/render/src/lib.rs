#![deny(unsafe_code)]
//! Drawing surfaces for engrave: an SVG document writer and a `tiny-skia`
//! raster page.
//!
//! Both implement [`engrave_core::RenderSink`]. [`OutputFormat`] maps a format
//! name or file extension to a surface so the CLI does not duplicate dispatch.

pub mod raster;
pub mod svg;

#[cfg(feature = "png")]
pub mod snapshot;

pub use raster::RasterSink;
pub use svg::SvgSink;

use engrave_core::{render_page, EngraveError, Srgb, StrokeCommand, StrokeStats};
use std::path::Path;

/// All output format names.
const FORMAT_NAMES: &[&str] = &["svg", "png"];

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Vector document, one `<path>` per stroke.
    Svg,
    /// Anti-aliased raster image.
    Png,
}

impl OutputFormat {
    /// Looks up a format by name (case insensitive).
    ///
    /// Returns `EngraveError::InvalidConfig` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, EngraveError> {
        match name.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(EngraveError::InvalidConfig(format!(
                "unknown output format {name:?} (expected one of: {})",
                FORMAT_NAMES.join(", ")
            ))),
        }
    }

    /// Infers the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        OutputFormat::from_name(ext).ok()
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }

    pub fn list_formats() -> &'static [&'static str] {
        FORMAT_NAMES
    }
}

/// Renders a full page of strokes and writes it to `path`.
///
/// The page is `width` x `height` filled with `background`; strokes are drawn
/// in iteration order.
pub fn render_to_file<I>(
    format: OutputFormat,
    path: &Path,
    width: f64,
    height: f64,
    background: Srgb,
    commands: I,
) -> Result<StrokeStats, EngraveError>
where
    I: IntoIterator<Item = StrokeCommand>,
{
    match format {
        OutputFormat::Svg => {
            let mut sink = SvgSink::new();
            let stats = render_page(&mut sink, width, height, background, commands)?;
            sink.write_to(path)?;
            Ok(stats)
        }
        OutputFormat::Png => write_raster(path, width, height, background, commands),
    }
}

#[cfg(feature = "png")]
fn write_raster<I>(
    path: &Path,
    width: f64,
    height: f64,
    background: Srgb,
    commands: I,
) -> Result<StrokeStats, EngraveError>
where
    I: IntoIterator<Item = StrokeCommand>,
{
    let mut sink = RasterSink::new();
    let stats = render_page(&mut sink, width, height, background, commands)?;
    snapshot::write_png(&sink, path)?;
    Ok(stats)
}

#[cfg(not(feature = "png"))]
fn write_raster<I>(
    _path: &Path,
    _width: f64,
    _height: f64,
    _background: Srgb,
    _commands: I,
) -> Result<StrokeStats, EngraveError>
where
    I: IntoIterator<Item = StrokeCommand>,
{
    Err(EngraveError::Io(
        "PNG output requires the `png` feature".into(),
    ))
}
