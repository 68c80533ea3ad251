use crate::error::{Error, Result};

/// Time-indexed overlap and contact force produced by evaluating a contact model.
///
/// Fields:
/// - `time`: sample times (s)
/// - `delta`: per-sample `[overlap, overlap rate]` (m, m/s)
/// - `force`: normal contact force (N)
///
/// All three columns have the same length; element `i` of each belongs to the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    time: Vec<f64>,
    delta: Vec<[f64; 2]>,
    force: Vec<f64>,
}

impl Trajectory {
    /// Build a trajectory after checking that every column has the length of `time`.
    ///
    /// Errors:
    /// - `Error::ShapeMismatch` if the column lengths differ.
    pub fn new(time: Vec<f64>, delta: Vec<[f64; 2]>, force: Vec<f64>) -> Result<Self> {
        if delta.len() != time.len() || force.len() != time.len() {
            return Err(Error::ShapeMismatch {
                time: time.len(),
                delta: delta.len(),
                force: force.len(),
            });
        }
        Ok(Self { time, delta, force })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn delta(&self) -> &[[f64; 2]] {
        &self.delta
    }

    pub fn force(&self) -> &[f64] {
        &self.force
    }

    /// Overlap column (first displacement column).
    pub fn overlap(&self) -> impl Iterator<Item = f64> + '_ {
        self.delta.iter().map(|d| d[0])
    }

    /// Largest force reached during the contact, 0 for an empty trajectory.
    pub fn peak_force(&self) -> f64 {
        self.force.iter().copied().fold(0.0, f64::max)
    }

    /// Ratio of separation to approach overlap rate, `-delta_dot_end / delta_dot_start`.
    ///
    /// Returns `None` when there are fewer than two samples or the approach rate is zero.
    pub fn restitution(&self) -> Option<f64> {
        let (first, last) = (self.delta.first()?, self.delta.last()?);
        if self.delta.len() < 2 || first[1] == 0.0 {
            return None;
        }
        Some(-last[1] / first[1])
    }

    /// Plot-ready `(x, y)` columns: overlap scaled by `delta_scale`, force by `force_scale`.
    pub fn scaled(&self, delta_scale: f64, force_scale: f64) -> (Vec<f64>, Vec<f64>) {
        let x = self.overlap().map(|d| d * delta_scale).collect();
        let y = self.force.iter().map(|f| f * force_scale).collect();
        (x, y)
    }
}
