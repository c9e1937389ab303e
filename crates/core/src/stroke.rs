//! Immutable stroke commands: a polyline plus the style it is drawn with.
//!
//! The generator produces these and never touches a drawing surface; any
//! [`RenderSink`](crate::sink::RenderSink) can consume them afterwards.

use crate::color::Srgb;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Shape drawn at the open ends of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    /// SVG `stroke-linecap` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Shape drawn where two segments of a stroke meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

impl LineJoin {
    /// SVG `stroke-linejoin` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

/// How a polyline is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Srgb,
    /// Opacity in [0, 1].
    pub alpha: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// Whether a command is a run itself or one of its faint offset copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    Primary,
    Ghost,
}

/// One renderable polyline with its style and provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCommand {
    pub points: Vec<DVec2>,
    pub style: StrokeStyle,
    pub kind: StrokeKind,
    /// Index of the family (sweep direction) this stroke belongs to.
    pub family: usize,
    /// Index of the swept line within its family.
    pub line: usize,
    /// Displacement along the family normal relative to the source run.
    /// Always 0 for primaries.
    pub normal_offset: f64,
}

impl StrokeCommand {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_ghost(&self) -> bool {
        self.kind == StrokeKind::Ghost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_round() {
        assert_eq!(LineCap::default(), LineCap::Round);
        assert_eq!(LineJoin::default(), LineJoin::Round);
    }

    #[test]
    fn svg_keywords() {
        assert_eq!(LineCap::Square.as_str(), "square");
        assert_eq!(LineJoin::Bevel.as_str(), "bevel");
    }

    #[test]
    fn cap_and_join_deserialize_from_lowercase() {
        let cap: LineCap = serde_json::from_str("\"butt\"").unwrap();
        let join: LineJoin = serde_json::from_str("\"miter\"").unwrap();
        assert_eq!(cap, LineCap::Butt);
        assert_eq!(join, LineJoin::Miter);
    }

    #[test]
    fn ghost_flag_follows_kind() {
        let cmd = StrokeCommand {
            points: vec![DVec2::ZERO, DVec2::ONE],
            style: StrokeStyle {
                width: 1.0,
                color: Srgb::INK,
                alpha: 0.5,
                cap: LineCap::Round,
                join: LineJoin::Round,
            },
            kind: StrokeKind::Ghost,
            family: 0,
            line: 0,
            normal_offset: 1.0,
        };
        assert!(cmd.is_ghost());
        assert_eq!(cmd.len(), 2);
        assert!(!cmd.is_empty());
    }
}
