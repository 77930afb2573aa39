//! Elapsed-time color ramp: white → green → blue → purple → red.

/// Entries per linear sub-segment.
pub const SEGMENT_LEN: usize = 128;
/// Total number of entries in the ramp.
pub const RAMP_LEN: usize = SEGMENT_LEN * 4;

/// Sub-segment endpoints as RGB fractions.
const STOPS: [[f64; 3]; 5] = [
    [1.0, 1.0, 1.0], // white
    [0.0, 1.0, 0.0], // green
    [0.0, 0.0, 1.0], // blue
    [0.5, 0.0, 0.5], // purple
    [1.0, 0.0, 0.0], // red
];

/// One ramp entry, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RampColor {
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    pub fn channel(self, i: usize) -> f64 {
        match i {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }
}

impl From<RampColor> for plotters::style::RGBColor {
    fn from(c: RampColor) -> Self {
        let (r, g, b) = c.to_rgb8();
        plotters::style::RGBColor(r, g, b)
    }
}

impl From<RampColor> for ratatui::style::Color {
    fn from(c: RampColor) -> Self {
        let (r, g, b) = c.to_rgb8();
        ratatui::style::Color::Rgb(r, g, b)
    }
}

/// Fixed lookup table, built once per session and shared by every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    colors: Vec<RampColor>,
}

impl ColorRamp {
    pub fn build() -> Self {
        let mut colors = Vec::with_capacity(RAMP_LEN);
        for pair in STOPS.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            for i in 0..SEGMENT_LEN {
                let s = i as f64 / (SEGMENT_LEN - 1) as f64;
                let lerp = |c: usize| from[c] + s * (to[c] - from[c]);
                colors.push(RampColor { r: lerp(0), g: lerp(1), b: lerp(2) });
            }
        }
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[RampColor] {
        &self.colors
    }

    /// Index of `t` on the ramp when `[tmin, tmax]` spans the whole table.
    /// Out-of-range values clamp; a degenerate span or NaN maps to 0.
    pub fn index_of(&self, t: f64, tmin: f64, tmax: f64) -> usize {
        let last = self.colors.len() - 1;
        let span = tmax - tmin;
        if !(span > 0.0) || t.is_nan() {
            return 0;
        }
        let idx = ((t - tmin) / span * last as f64).round();
        idx.clamp(0.0, last as f64) as usize
    }

    pub fn color_at(&self, t: f64, tmin: f64, tmax: f64) -> RampColor {
        self.colors[self.index_of(t, tmin, tmax)]
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_len() {
        let ramp = ColorRamp::build();
        assert_eq!(ramp.len(), 512);
    }

    #[test]
    fn test_ramp_endpoints() {
        let ramp = ColorRamp::build();
        assert_eq!(ramp.colors()[0].to_rgb8(), (255, 255, 255));
        assert_eq!(ramp.colors()[127].to_rgb8(), (0, 255, 0));
        assert_eq!(ramp.colors()[128].to_rgb8(), (0, 255, 0));
        assert_eq!(ramp.colors()[255].to_rgb8(), (0, 0, 255));
        assert_eq!(ramp.colors()[383].to_rgb8(), (128, 0, 128));
        assert_eq!(ramp.colors()[511].to_rgb8(), (255, 0, 0));
    }

    #[test]
    fn test_channels_monotonic_within_segments() {
        let ramp = ColorRamp::build();
        for seg in ramp.colors().chunks(SEGMENT_LEN) {
            for ch in 0..3 {
                let values: Vec<f64> = seg.iter().map(|c| c.channel(ch)).collect();
                let rising = values.windows(2).all(|w| w[1] >= w[0]);
                let falling = values.windows(2).all(|w| w[1] <= w[0]);
                assert!(rising || falling, "channel {} not monotonic", ch);
            }
        }
    }

    #[test]
    fn test_color_at_maps_linearly() {
        let ramp = ColorRamp::build();
        assert_eq!(ramp.index_of(0.0, 0.0, 10.0), 0);
        assert_eq!(ramp.index_of(10.0, 0.0, 10.0), 511);
        assert_eq!(ramp.index_of(5.0, 0.0, 10.0), 256);
        assert_eq!(ramp.color_at(10.0, 0.0, 10.0).to_rgb8(), (255, 0, 0));
    }

    #[test]
    fn test_color_at_clamps() {
        let ramp = ColorRamp::build();
        assert_eq!(ramp.index_of(-3.0, 0.0, 10.0), 0);
        assert_eq!(ramp.index_of(99.0, 0.0, 10.0), 511);
        assert_eq!(ramp.index_of(1.0, 2.0, 2.0), 0);
        assert_eq!(ramp.index_of(f64::NAN, 0.0, 1.0), 0);
    }

    #[test]
    fn test_index_monotonic_in_time() {
        let ramp = ColorRamp::build();
        let idx: Vec<usize> = (0..=100).map(|i| ramp.index_of(i as f64, 0.0, 100.0)).collect();
        assert!(idx.windows(2).all(|w| w[1] >= w[0]));
    }
}
