//! SVG document surface.
//!
//! Each stroked path becomes one `<path>` element carrying its own width,
//! color, opacity, cap and join, so a viewer composites strokes in emission
//! order exactly as the raster surface does.

use engrave_core::{EngraveError, LineCap, LineJoin, RenderSink, Srgb};
use std::path::Path;

/// Builds an SVG document in memory.
#[derive(Debug, Default)]
pub struct SvgSink {
    doc: String,
    path_data: String,
    paths: usize,
    finished: bool,
}

impl SvgSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `<path>` elements written so far.
    pub fn path_count(&self) -> usize {
        self.paths
    }

    /// The document text. Complete only after `end_page`.
    pub fn as_str(&self) -> &str {
        &self.doc
    }

    pub fn into_string(self) -> String {
        self.doc
    }

    /// Writes the finished document to `path`.
    ///
    /// Returns `EngraveError::Io` if the page was never ended or the write fails.
    pub fn write_to(&self, path: &Path) -> Result<(), EngraveError> {
        if !self.finished {
            return Err(EngraveError::Io("SVG page was not finished".into()));
        }
        std::fs::write(path, &self.doc).map_err(|e| EngraveError::Io(e.to_string()))
    }
}

impl RenderSink for SvgSink {
    fn begin_page(
        &mut self,
        width: f64,
        height: f64,
        background: Srgb,
    ) -> Result<(), EngraveError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EngraveError::InvalidDimensions);
        }
        self.doc.clear();
        self.path_data.clear();
        self.paths = 0;
        self.finished = false;
        self.doc.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{width:.2}" height="{height:.2}"
     viewBox="0 0 {width:.2} {height:.2}">
  <rect width="100%" height="100%" fill="{}"/>
"##,
            background.to_hex()
        ));
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path_data.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if !self.path_data.is_empty() {
            self.path_data.push(' ');
        }
        self.path_data.push_str(&format!("M{x:.2},{y:.2}"));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path_data.push_str(&format!(" L{x:.2},{y:.2}"));
    }

    fn stroke_path(&mut self, width: f64, color: Srgb, alpha: f64, cap: LineCap, join: LineJoin) {
        if self.path_data.is_empty() {
            return;
        }
        self.doc.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.3}\" \
             stroke-opacity=\"{:.3}\" stroke-linecap=\"{}\" stroke-linejoin=\"{}\"/>\n",
            self.path_data,
            color.to_hex(),
            width,
            alpha.clamp(0.0, 1.0),
            cap.as_str(),
            join.as_str(),
        ));
        self.path_data.clear();
        self.paths += 1;
    }

    fn end_page(&mut self) -> Result<(), EngraveError> {
        self.doc.push_str("</svg>\n");
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engrave_core::{render_page, StrokeCommand, StrokeKind, StrokeStyle};
    use glam::DVec2;

    fn stroke(points: &[(f64, f64)], alpha: f64) -> StrokeCommand {
        StrokeCommand {
            points: points.iter().map(|&(x, y)| DVec2::new(x, y)).collect(),
            style: StrokeStyle {
                width: 1.25,
                color: Srgb::INK,
                alpha,
                cap: LineCap::Round,
                join: LineJoin::Bevel,
            },
            kind: StrokeKind::Primary,
            family: 0,
            line: 0,
            normal_offset: 0.0,
        }
    }

    #[test]
    fn document_has_background_and_one_path_per_stroke() {
        let mut sink = SvgSink::new();
        let stats = render_page(
            &mut sink,
            200.0,
            100.0,
            Srgb::PAPER,
            vec![
                stroke(&[(0.0, 0.0), (10.0, 5.0), (20.0, 5.0)], 0.3),
                stroke(&[(1.0, 1.0), (2.0, 2.0)], 0.5),
            ],
        )
        .unwrap();

        assert_eq!(stats.primaries, 2);
        assert_eq!(sink.path_count(), 2);
        let doc = sink.as_str();
        assert!(doc.starts_with("<?xml"));
        assert!(doc.contains(r#"viewBox="0 0 200.00 100.00""#));
        assert!(doc.contains(r##"fill="#e8e3d6""##));
        assert_eq!(doc.matches("<path ").count(), 2);
        assert!(doc.contains(r#"d="M0.00,0.00 L10.00,5.00 L20.00,5.00""#));
        assert!(doc.contains(r##"stroke="#3b3630""##));
        assert!(doc.contains(r#"stroke-width="1.250""#));
        assert!(doc.contains(r#"stroke-opacity="0.300""#));
        assert!(doc.contains(r#"stroke-linecap="round""#));
        assert!(doc.contains(r#"stroke-linejoin="bevel""#));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn stroke_without_path_is_ignored() {
        let mut sink = SvgSink::new();
        sink.begin_page(10.0, 10.0, Srgb::PAPER).unwrap();
        sink.begin_path();
        sink.stroke_path(1.0, Srgb::INK, 1.0, LineCap::Butt, LineJoin::Miter);
        assert_eq!(sink.path_count(), 0);
    }

    #[test]
    fn rejects_bad_page_size() {
        let mut sink = SvgSink::new();
        assert!(matches!(
            sink.begin_page(0.0, 10.0, Srgb::PAPER),
            Err(EngraveError::InvalidDimensions)
        ));
        assert!(matches!(
            sink.begin_page(10.0, f64::NAN, Srgb::PAPER),
            Err(EngraveError::InvalidDimensions)
        ));
    }

    #[test]
    fn write_to_requires_finished_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.svg");

        let mut sink = SvgSink::new();
        sink.begin_page(10.0, 10.0, Srgb::PAPER).unwrap();
        assert!(matches!(sink.write_to(&path), Err(EngraveError::Io(_))));

        sink.end_page().unwrap();
        sink.write_to(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, sink.as_str());
    }
}
