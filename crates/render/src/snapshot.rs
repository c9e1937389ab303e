//! PNG encoding of a finished [`RasterSink`] page.
//!
//! Feature-gated behind `png` (default on) so the raster surface can be used
//! without pulling in the `image` crate.

use engrave_core::EngraveError;
use std::path::Path;

use crate::raster::RasterSink;

/// Writes the sink's page as a PNG image.
///
/// Returns `EngraveError::Io` if no page has begun or the write fails.
pub fn write_png(sink: &RasterSink, path: &Path) -> Result<(), EngraveError> {
    let (w, h) = sink
        .dimensions()
        .ok_or_else(|| EngraveError::Io("raster page was never started".into()))?;
    let rgba = sink
        .to_rgba()
        .ok_or_else(|| EngraveError::Io("raster page was never started".into()))?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngraveError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngraveError::Io(e.to_string()))
}
