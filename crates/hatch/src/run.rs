//! Run accumulation: the `Idle -> Accumulating -> flush -> Idle` state
//! machine that cuts a swept line into drawable pieces.

use glam::DVec2;

/// A contiguous piece of a swept line with at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    points: Vec<DVec2>,
}

impl Run {
    /// Wraps `points` if there are at least two of them.
    pub fn new(points: Vec<DVec2>) -> Option<Self> {
        (points.len() >= 2).then_some(Self { points })
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The middle element by index (`points[len / 2]`), not the centroid.
    pub fn midpoint(&self) -> DVec2 {
        self.points[self.points.len() / 2]
    }

    /// Copy of the run shifted by `delta`.
    pub fn translated(&self, delta: DVec2) -> Vec<DVec2> {
        self.points.iter().map(|&p| p + delta).collect()
    }

    pub fn into_points(self) -> Vec<DVec2> {
        self.points
    }
}

#[derive(Debug, Default)]
enum RunState {
    #[default]
    Idle,
    Accumulating(Vec<DVec2>),
}

/// Collects accepted points and hands out a [`Run`] at each break.
///
/// Breaks on an empty or single-point run yield nothing; the point is dropped.
#[derive(Debug, Default)]
pub struct RunBuilder {
    state: RunState,
}

impl RunBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an accepted point.
    pub fn push(&mut self, p: DVec2) {
        match &mut self.state {
            RunState::Idle => self.state = RunState::Accumulating(vec![p]),
            RunState::Accumulating(points) => points.push(p),
        }
    }

    /// Ends the current run at a gap or out-of-bounds point.
    pub fn split(&mut self) -> Option<Run> {
        match std::mem::take(&mut self.state) {
            RunState::Idle => None,
            RunState::Accumulating(points) => Run::new(points),
        }
    }

    /// Ends the line; same contract as [`split`](Self::split).
    pub fn finish(mut self) -> Option<Run> {
        self.split()
    }

    /// Points accumulated since the last break.
    pub fn pending(&self) -> usize {
        match &self.state {
            RunState::Idle => 0,
            RunState::Accumulating(points) => points.len(),
        }
    }
}
