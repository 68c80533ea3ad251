use crate::core::integrator::{integrate_contact, State};
use crate::core::material::{ContactProperties, Material};
use crate::core::model::{
    check_steps, step_budget, AnalyticalSolution, ContactModel, DEFAULT_STEPS,
};
use crate::core::trajectory::Trajectory;
use crate::error::{Error, Result};
use std::f64::consts::PI;

/// Linear spring in parallel with a linear dashpot.
///
/// The spring stiffness is chosen so that the peak overlap at the characteristic velocity
/// matches the Hertzian one; the damping coefficient reproduces the material's coefficient
/// of restitution exactly for an unlimited force.
#[derive(Debug, Clone)]
pub struct SpringDashpot {
    props: ContactProperties,
    stiffness: f64,
    damping: f64,
    limit_force: bool,
    steps: usize,
}

impl SpringDashpot {
    /// Build the model from a material.
    ///
    /// Errors:
    /// - `Error::MissingProperty` / `Error::InvalidParam` for incomplete or non-physical materials.
    pub fn new(material: &Material, limit_force: bool) -> Result<Self> {
        let props = ContactProperties::from_material(material)?;
        let sqrt_r = props.radius.sqrt();
        let y = props.youngs_modulus;
        let v = props.velocity;
        let stiffness = 16.0 / 15.0
            * sqrt_r
            * y
            * (15.0 * props.mass * v * v / (16.0 * sqrt_r * y)).powf(0.2);
        let damping = -2.0 * props.beta() * (stiffness * props.mass).sqrt();
        Ok(Self {
            props,
            stiffness,
            damping,
            limit_force,
            steps: DEFAULT_STEPS,
        })
    }

    /// Override the number of samples per contact time.
    pub fn with_steps(mut self, steps: usize) -> Result<Self> {
        self.steps = check_steps(steps)?;
        Ok(self)
    }

    /// Spring stiffness k_n (N/m).
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Dashpot coefficient gamma_n (N s/m).
    pub fn damping(&self) -> f64 {
        self.damping
    }

    fn force(&self, y: State) -> f64 {
        let f = self.stiffness * y[0] + self.damping * y[1];
        if self.limit_force {
            f.max(0.0)
        } else {
            f
        }
    }

    /// Decay rate b and damped angular frequency omega_d.
    fn oscillator(&self) -> Result<(f64, f64)> {
        let b = self.damping / (2.0 * self.props.mass);
        let w0_sq = self.stiffness / self.props.mass;
        let wd_sq = w0_sq - b * b;
        if wd_sq <= 0.0 {
            return Err(Error::MathError(
                "spring-dashpot contact is overdamped".into(),
            ));
        }
        Ok((b, wd_sq.sqrt()))
    }
}

impl ContactModel for SpringDashpot {
    fn name(&self) -> &str {
        "SpringDashpot"
    }

    fn contact_time(&self) -> f64 {
        match self.oscillator() {
            Ok((_, wd)) => PI / wd,
            Err(_) => f64::INFINITY,
        }
    }

    fn displacement(&self) -> Result<Trajectory> {
        let (_, wd) = self.oscillator()?;
        let dt = PI / wd / self.steps as f64;
        let mass = self.props.mass;
        let budget = step_budget(self.steps)?;
        let (time, delta) =
            integrate_contact([0.0, self.props.velocity], dt, budget, |y| -self.force(y) / mass)?;
        let force = delta.iter().map(|&y| self.force(y)).collect();
        Trajectory::new(time, delta, force)
    }

    fn analytical(&self) -> Option<&dyn AnalyticalSolution> {
        Some(self)
    }
}

impl AnalyticalSolution for SpringDashpot {
    /// Damped harmonic oscillator, `delta(t) = v/omega_d e^{-bt} sin(omega_d t)`, sampled over
    /// one contact time.
    fn displacement_analytical(&self) -> Result<Trajectory> {
        let (b, wd) = self.oscillator()?;
        let v = self.props.velocity;
        let tc = PI / wd;
        let n = self.steps;

        let time: Vec<f64> = (0..=n).map(|i| tc * i as f64 / n as f64).collect();
        let delta: Vec<State> = time
            .iter()
            .map(|&t| {
                let decay = (-b * t).exp();
                let (s, c) = (wd * t).sin_cos();
                [v / wd * decay * s, v * decay * (c - b / wd * s)]
            })
            .collect();
        let force = delta.iter().map(|&y| self.force(y)).collect();
        Trajectory::new(time, delta, force)
    }
}
