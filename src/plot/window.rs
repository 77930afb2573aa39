use crate::data::Trajectory;

/// Borrowed view `[lo, hi)` of the samples drawn as the trail.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    trajectory: &'a Trajectory,
    lo: usize,
    hi: usize,
}

impl<'a> Window<'a> {
    /// Trailing window ending (exclusively) at `frame_index`.
    ///
    /// `frame_index` past the end clamps to the last sample, a zero trail
    /// length counts as one, and a trail longer than the data yields the
    /// whole history.
    pub fn extract(trajectory: &'a Trajectory, frame_index: usize, trail_length: usize) -> Self {
        let hi = frame_index.min(trajectory.last_index());
        let lo = hi.saturating_sub(trail_length.max(1));
        Self { trajectory, lo, hi }
    }

    /// The frame this trail leads up to.
    pub fn head(&self) -> usize {
        self.hi
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.lo..self.hi
    }

    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    pub fn is_empty(&self) -> bool {
        self.hi == self.lo
    }

    pub fn times(&self) -> &'a [f64] {
        &self.trajectory.times()[self.lo..self.hi]
    }

    pub fn a(&self) -> &'a [f64] {
        &self.trajectory.a()[self.lo..self.hi]
    }

    pub fn b(&self) -> &'a [f64] {
        &self.trajectory.b()[self.lo..self.hi]
    }

    /// Points of the trail in plot coordinates.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.a().iter().copied().zip(self.b().iter().copied())
    }

    pub fn trajectory(&self) -> &'a Trajectory {
        self.trajectory
    }
}
