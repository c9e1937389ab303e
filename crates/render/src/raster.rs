//! Anti-aliased raster surface backed by a `tiny-skia` pixmap.
//!
//! Strokes are composited source-over in emission order. The pixel buffer
//! conversion lives here (no feature gate); PNG encoding is in
//! [`crate::snapshot`].

use engrave_core::{EngraveError, LineCap, LineJoin, RenderSink, Srgb};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Largest page edge accepted, in pixels.
pub const MAX_EDGE: u32 = 16_384;

/// Rasterizes strokes into an RGBA pixmap.
///
/// The pixmap is allocated by `begin_page`; path calls made before that are
/// dropped.
pub struct RasterSink {
    pixmap: Option<Pixmap>,
    path: PathBuilder,
    has_path: bool,
}

impl Default for RasterSink {
    fn default() -> Self {
        Self {
            pixmap: None,
            path: PathBuilder::new(),
            has_path: false,
        }
    }
}

fn pixel_edge(v: f64) -> Result<u32, EngraveError> {
    if !v.is_finite() || v <= 0.0 || v.ceil() > MAX_EDGE as f64 {
        return Err(EngraveError::InvalidDimensions);
    }
    Ok(v.ceil() as u32)
}

fn skia_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

fn skia_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

impl RasterSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Pixmap size, once a page has begun.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.pixmap.as_ref().map(|p| (p.width(), p.height()))
    }

    /// Unpremultiplied RGBA8 bytes of the page, row-major.
    ///
    /// The buffer length is `width * height * 4`.
    pub fn to_rgba(&self) -> Option<Vec<u8>> {
        let pixmap = self.pixmap.as_ref()?;
        Some(
            pixmap
                .pixels()
                .iter()
                .flat_map(|p| {
                    let c = p.demultiply();
                    [c.red(), c.green(), c.blue(), c.alpha()]
                })
                .collect(),
        )
    }
}

impl RenderSink for RasterSink {
    fn begin_page(
        &mut self,
        width: f64,
        height: f64,
        background: Srgb,
    ) -> Result<(), EngraveError> {
        let (w, h) = (pixel_edge(width)?, pixel_edge(height)?);
        let mut pixmap = Pixmap::new(w, h).ok_or(EngraveError::InvalidDimensions)?;
        let [r, g, b] = background.to_rgb8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
        self.pixmap = Some(pixmap);
        self.path = PathBuilder::new();
        self.has_path = false;
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
        self.has_path = false;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x as f32, y as f32);
        self.has_path = true;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.has_path {
            self.path.line_to(x as f32, y as f32);
        }
    }

    fn stroke_path(&mut self, width: f64, color: Srgb, alpha: f64, cap: LineCap, join: LineJoin) {
        let builder = std::mem::replace(&mut self.path, PathBuilder::new());
        self.has_path = false;
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        // Zero-length or single-point paths produce no geometry.
        let Some(path) = builder.finish() else {
            return;
        };

        let [r, g, b] = color.to_rgb8();
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: width.max(0.0) as f32,
            line_cap: skia_cap(cap),
            line_join: skia_join(join),
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}
