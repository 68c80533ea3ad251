use crate::core::hertz_mindlin::HertzMindlin;
use crate::core::material::Material;
use crate::core::spring_dashpot::SpringDashpot;
use crate::core::trajectory::Trajectory;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Samples per estimated contact time used by the numerical integrators.
pub const DEFAULT_STEPS: usize = 1000;
/// Upper bound accepted for the samples per contact time.
pub const MAX_STEPS: usize = 1_000_000;
/// Contact times integrated before a run is cut off.
const CONTACT_TIMES_PER_RUN: usize = 4;

/// Validate a samples-per-contact-time setting.
pub(crate) fn check_steps(steps: usize) -> Result<usize> {
    if steps == 0 || steps > MAX_STEPS {
        return Err(Error::InvalidParam(format!(
            "steps must lie in [1, {MAX_STEPS}], got {steps}"
        )));
    }
    Ok(steps)
}

/// Integration step budget for one contact.
pub(crate) fn step_budget(steps: usize) -> Result<usize> {
    steps
        .checked_mul(CONTACT_TIMES_PER_RUN)
        .ok_or_else(|| Error::InvalidParam(format!("step budget overflows for {steps} steps")))
}

/// A contact-mechanics formulation bound to one material.
///
/// `analytical` is an optional capability: models with a closed-form reference curve return
/// `Some`, everyone else keeps the default `None`.
pub trait ContactModel {
    /// Display name, e.g. `"SpringDashpot"`.
    fn name(&self) -> &str;

    /// Estimated duration of a single contact (s).
    fn contact_time(&self) -> f64;

    /// Numerically integrate one contact and return its trajectory.
    fn displacement(&self) -> Result<Trajectory>;

    /// Closed-form solution for the same contact, when the formulation has one.
    fn analytical(&self) -> Option<&dyn AnalyticalSolution> {
        None
    }
}

/// Closed-form trajectory of a contact model.
pub trait AnalyticalSolution {
    fn displacement_analytical(&self) -> Result<Trajectory>;
}

/// Something that can construct a [`ContactModel`] for a material.
pub trait ModelFactory {
    /// Name of the formulation this factory builds.
    fn name(&self) -> &str;

    /// Build a model; `limit_force` clamps the contact force to be non-negative.
    fn build(&self, material: &Material, limit_force: bool) -> Result<Box<dyn ContactModel>>;
}

/// The contact formulations shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ModelKind {
    SpringDashpot,
    HertzMindlin,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::SpringDashpot, ModelKind::HertzMindlin];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::SpringDashpot => "SpringDashpot",
            ModelKind::HertzMindlin => "HertzMindlin",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ModelKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidParam(format!("unknown contact model: {s}")))
    }
}

impl ModelFactory for ModelKind {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn build(&self, material: &Material, limit_force: bool) -> Result<Box<dyn ContactModel>> {
        Ok(match self {
            ModelKind::SpringDashpot => Box::new(SpringDashpot::new(material, limit_force)?),
            ModelKind::HertzMindlin => Box::new(HertzMindlin::new(material, limit_force)?),
        })
    }
}
