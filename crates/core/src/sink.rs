//! The drawing-surface boundary.
//!
//! [`RenderSink`] is the only interface generated geometry is handed to.
//! [`replay`] and [`render_page`] turn a stream of [`StrokeCommand`]s into
//! path calls on any sink.

use crate::color::Srgb;
use crate::error::EngraveError;
use crate::stroke::{LineCap, LineJoin, StrokeCommand, StrokeKind};

/// A drawing surface that accepts stroked polylines.
///
/// Path calls are infallible; surfaces that write output report failures from
/// [`end_page`](RenderSink::end_page).
pub trait RenderSink {
    /// Prepares a page of the given size filled with `background`.
    fn begin_page(
        &mut self,
        width: f64,
        height: f64,
        background: Srgb,
    ) -> Result<(), EngraveError> {
        let _ = (width, height, background);
        Ok(())
    }

    /// Starts a new, empty path.
    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    /// Strokes the current path and composites it onto the page.
    fn stroke_path(&mut self, width: f64, color: Srgb, alpha: f64, cap: LineCap, join: LineJoin);

    /// Finishes the page.
    fn end_page(&mut self) -> Result<(), EngraveError> {
        Ok(())
    }
}

/// Counts of what a replay sent to a sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrokeStats {
    pub primaries: usize,
    pub ghosts: usize,
    pub points: usize,
}

impl StrokeStats {
    pub fn strokes(&self) -> usize {
        self.primaries + self.ghosts
    }

    fn record(&mut self, cmd: &StrokeCommand) {
        match cmd.kind {
            StrokeKind::Primary => self.primaries += 1,
            StrokeKind::Ghost => self.ghosts += 1,
        }
        self.points += cmd.points.len();
    }
}

/// Issues one command as `begin_path`, `move_to`, `line_to`..., `stroke_path`.
///
/// Commands with fewer than two points are skipped and return `false`.
pub fn draw<S: RenderSink + ?Sized>(sink: &mut S, cmd: &StrokeCommand) -> bool {
    let Some((first, rest)) = cmd.points.split_first() else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    sink.begin_path();
    sink.move_to(first.x, first.y);
    for p in rest {
        sink.line_to(p.x, p.y);
    }
    let s = &cmd.style;
    sink.stroke_path(s.width, s.color, s.alpha, s.cap, s.join);
    true
}

/// Draws every command in order.
pub fn replay<S, I>(commands: I, sink: &mut S) -> StrokeStats
where
    S: RenderSink + ?Sized,
    I: IntoIterator<Item = StrokeCommand>,
{
    let mut stats = StrokeStats::default();
    for cmd in commands {
        if draw(sink, &cmd) {
            stats.record(&cmd);
        }
    }
    stats
}

/// Full page lifecycle: `begin_page`, [`replay`], `end_page`.
pub fn render_page<S, I>(
    sink: &mut S,
    width: f64,
    height: f64,
    background: Srgb,
    commands: I,
) -> Result<StrokeStats, EngraveError>
where
    S: RenderSink + ?Sized,
    I: IntoIterator<Item = StrokeCommand>,
{
    sink.begin_page(width, height, background)?;
    let stats = replay(commands, sink);
    sink.end_page()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeStyle;
    use glam::DVec2;

    #[derive(Debug, PartialEq)]
    enum Op {
        Page(f64, f64),
        Begin,
        Move(f64, f64),
        Line(f64, f64),
        Stroke(f64, f64),
        End,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl RenderSink for Recorder {
        fn begin_page(&mut self, w: f64, h: f64, _bg: Srgb) -> Result<(), EngraveError> {
            self.ops.push(Op::Page(w, h));
            Ok(())
        }
        fn begin_path(&mut self) {
            self.ops.push(Op::Begin);
        }
        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Move(x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Line(x, y));
        }
        fn stroke_path(
            &mut self,
            width: f64,
            _c: Srgb,
            alpha: f64,
            _cap: LineCap,
            _join: LineJoin,
        ) {
            self.ops.push(Op::Stroke(width, alpha));
        }
        fn end_page(&mut self) -> Result<(), EngraveError> {
            self.ops.push(Op::End);
            Ok(())
        }
    }

    fn cmd(points: &[(f64, f64)], kind: StrokeKind) -> StrokeCommand {
        StrokeCommand {
            points: points.iter().map(|&(x, y)| DVec2::new(x, y)).collect(),
            style: StrokeStyle {
                width: 1.5,
                color: Srgb::INK,
                alpha: 0.4,
                cap: LineCap::Round,
                join: LineJoin::Round,
            },
            kind,
            family: 0,
            line: 0,
            normal_offset: 0.0,
        }
    }

    #[test]
    fn draw_emits_move_then_lines_then_stroke() {
        let mut rec = Recorder::default();
        assert!(draw(&mut rec, &cmd(&[(0.0, 0.0), (1.0, 2.0), (3.0, 4.0)], StrokeKind::Primary)));
        assert_eq!(
            rec.ops,
            vec![
                Op::Begin,
                Op::Move(0.0, 0.0),
                Op::Line(1.0, 2.0),
                Op::Line(3.0, 4.0),
                Op::Stroke(1.5, 0.4),
            ]
        );
    }

    #[test]
    fn draw_skips_degenerate_polylines() {
        let mut rec = Recorder::default();
        assert!(!draw(&mut rec, &cmd(&[], StrokeKind::Primary)));
        assert!(!draw(&mut rec, &cmd(&[(1.0, 1.0)], StrokeKind::Primary)));
        assert!(rec.ops.is_empty());
    }

    #[test]
    fn replay_counts_primaries_ghosts_and_points() {
        let mut rec = Recorder::default();
        let stats = replay(
            vec![
                cmd(&[(0.0, 0.0), (1.0, 0.0)], StrokeKind::Primary),
                cmd(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)], StrokeKind::Ghost),
                cmd(&[(5.0, 5.0)], StrokeKind::Primary),
            ],
            &mut rec,
        );
        assert_eq!(
            stats,
            StrokeStats {
                primaries: 1,
                ghosts: 1,
                points: 5
            }
        );
        assert_eq!(stats.strokes(), 2);
    }

    #[test]
    fn render_page_brackets_strokes() {
        let mut rec = Recorder::default();
        render_page(
            &mut rec,
            100.0,
            50.0,
            Srgb::PAPER,
            vec![cmd(&[(0.0, 0.0), (1.0, 0.0)], StrokeKind::Primary)],
        )
        .unwrap();
        assert_eq!(rec.ops.first(), Some(&Op::Page(100.0, 50.0)));
        assert_eq!(rec.ops.last(), Some(&Op::End));
    }
}
