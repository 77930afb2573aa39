use std::path::Path;

use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data::error::{TrajectoryError, TrajectoryResult};

/// Key of the time column inside the `data` object.
pub const TIMES_KEY: &str = "times";

/// Names of the two trajectory variables inside the `data` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnKeys {
    pub a: String,
    pub b: String,
}

impl Default for ColumnKeys {
    fn default() -> Self {
        Self {
            a: "wages".to_string(),
            b: "outputs".to_string(),
        }
    }
}

/// On-disk layout: `{ "params": {...}, "data": { "times": [...], ... } }`.
#[derive(Deserialize)]
struct TrajectoryDocument {
    #[serde(default)]
    params: Map<String, Value>,
    data: Map<String, Value>,
}

/// Lower/upper plot limits for both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

/// Extent of the whole trajectory, computed once at load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub a_min: f64,
    pub a_max: f64,
    pub b_min: f64,
    pub b_max: f64,
}

impl Bounds {
    fn of(a: &[f64], b: &[f64]) -> Self {
        let (a_min, a_max) = min_max(a);
        let (b_min, b_max) = min_max(b);
        Self { a_min, a_max, b_min, b_max }
    }

    /// Limits with both ends rounded outward to even integers.
    pub fn even_limits(&self) -> AxisLimits {
        AxisLimits {
            x: outward(self.a_min, self.a_max, round_up_even),
            y: outward(self.b_min, self.b_max, round_up_even),
        }
    }

    /// `[0, ceil(max)]` per axis, extended below zero only if the data goes there.
    pub fn ceil_limits(&self) -> AxisLimits {
        AxisLimits {
            x: outward(self.a_min, self.a_max, f64::ceil),
            y: outward(self.b_min, self.b_max, f64::ceil),
        }
    }
}

/// Round up to the next even integer.
pub fn round_up_even(f: f64) -> f64 {
    (f / 2.0).ceil() * 2.0
}

fn outward(min: f64, max: f64, round: fn(f64) -> f64) -> (f64, f64) {
    let lo = if min >= 0.0 { 0.0 } else { -round(-min) };
    let mut hi = round(max);
    if hi <= lo {
        hi = lo + 1.0;
    }
    (lo, hi)
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// An immutable, validated trajectory: `times` strictly increasing, all three
/// columns the same non-zero length.
#[derive(Debug, Clone)]
pub struct Trajectory {
    times: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    keys: ColumnKeys,
    params: Map<String, Value>,
    bounds: Bounds,
}

impl Trajectory {
    /// Load and validate a trajectory document from disk.
    pub fn load(path: &Path, keys: &ColumnKeys) -> TrajectoryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                TrajectoryError::NotFound { path: path.to_path_buf() }
            } else {
                TrajectoryError::Io { path: path.to_path_buf(), source }
            }
        })?;
        let trajectory = Self::from_json(&content, keys)?;
        info!(
            "loaded {} samples from {} (t = {:.3}..{:.3})",
            trajectory.len(),
            path.display(),
            trajectory.t_min(),
            trajectory.t_max()
        );
        Ok(trajectory)
    }

    /// Parse and validate a trajectory document.
    pub fn from_json(content: &str, keys: &ColumnKeys) -> TrajectoryResult<Self> {
        let mut doc: TrajectoryDocument = serde_json::from_str(content)
            .map_err(|e| TrajectoryError::format(format!("invalid document: {}", e)))?;

        let times = take_column(&mut doc.data, TIMES_KEY)?;
        let a = take_column(&mut doc.data, &keys.a)?;
        let b = take_column(&mut doc.data, &keys.b)?;
        debug!("document params: {} entries", doc.params.len());

        let mut trajectory = Self::from_columns(times, a, b)?;
        trajectory.keys = keys.clone();
        trajectory.params = doc.params;
        Ok(trajectory)
    }

    /// Build a trajectory from in-memory columns, enforcing every invariant.
    pub fn from_columns(times: Vec<f64>, a: Vec<f64>, b: Vec<f64>) -> TrajectoryResult<Self> {
        if times.is_empty() {
            return Err(TrajectoryError::format("trajectory has no samples"));
        }
        if times.len() != a.len() || times.len() != b.len() {
            return Err(TrajectoryError::format(format!(
                "column lengths differ: times={}, a={}, b={}",
                times.len(),
                a.len(),
                b.len()
            )));
        }
        if let Some(i) = times
            .iter()
            .chain(a.iter())
            .chain(b.iter())
            .position(|v| !v.is_finite())
        {
            return Err(TrajectoryError::format(format!("non-finite value at flat index {}", i)));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TrajectoryError::format(format!(
                "times not strictly increasing at index {} ({} -> {})",
                i + 1,
                times[i],
                times[i + 1]
            )));
        }

        let bounds = Bounds::of(&a, &b);
        Ok(Self {
            times,
            a,
            b,
            keys: ColumnKeys::default(),
            params: Map::new(),
            bounds,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a loaded trajectory has at least one sample.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.times.len() - 1
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    pub fn t_min(&self) -> f64 {
        self.times[0]
    }

    pub fn t_max(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn keys(&self) -> &ColumnKeys {
        &self.keys
    }

    /// Opaque simulation parameters carried along from the input file.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }
}

fn take_column(data: &mut Map<String, Value>, key: &str) -> TrajectoryResult<Vec<f64>> {
    let value = data
        .remove(key)
        .ok_or_else(|| TrajectoryError::format(format!("missing data column '{}'", key)))?;
    serde_json::from_value(value)
        .map_err(|e| TrajectoryError::format(format!("column '{}' is not a number array: {}", key, e)))
}
