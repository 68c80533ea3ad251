use crate::core::integrator::{integrate_contact, State};
use crate::core::material::{ContactProperties, Material};
use crate::core::model::{check_steps, step_budget, ContactModel, DEFAULT_STEPS};
use crate::core::trajectory::Trajectory;
use crate::error::Result;

/// Normal part of the Hertz-Mindlin contact: nonlinear elastic spring (delta^{3/2}) with an
/// overlap-dependent viscous term. No closed-form trajectory exists.
#[derive(Debug, Clone)]
pub struct HertzMindlin {
    props: ContactProperties,
    limit_force: bool,
    steps: usize,
}

impl HertzMindlin {
    /// Build the model from a material.
    ///
    /// Errors:
    /// - `Error::MissingProperty` / `Error::InvalidParam` for incomplete or non-physical materials.
    pub fn new(material: &Material, limit_force: bool) -> Result<Self> {
        Ok(Self {
            props: ContactProperties::from_material(material)?,
            limit_force,
            steps: DEFAULT_STEPS,
        })
    }

    /// Override the number of samples per contact time.
    pub fn with_steps(mut self, steps: usize) -> Result<Self> {
        self.steps = check_steps(steps)?;
        Ok(self)
    }

    fn force(&self, y: State) -> f64 {
        let p = &self.props;
        let delta = y[0].max(0.0);
        let elastic = 4.0 / 3.0 * p.youngs_modulus * p.radius.sqrt() * delta.powf(1.5);
        // S_n = 2 Y* sqrt(R* delta)
        let sn = 2.0 * p.youngs_modulus * (p.radius * delta).sqrt();
        let damping = -2.0 * (5.0f64 / 6.0).sqrt() * p.beta() * (sn * p.mass).sqrt();
        let f = elastic + damping * y[1];
        if self.limit_force {
            f.max(0.0)
        } else {
            f
        }
    }
}

impl ContactModel for HertzMindlin {
    fn name(&self) -> &str {
        "HertzMindlin"
    }

    fn contact_time(&self) -> f64 {
        let p = &self.props;
        2.87 * (p.mass * p.mass / (p.radius * p.youngs_modulus.powi(2) * p.velocity)).powf(0.2)
    }

    fn displacement(&self) -> Result<Trajectory> {
        let dt = self.contact_time() / self.steps as f64;
        let mass = self.props.mass;
        let budget = step_budget(self.steps)?;
        let (time, delta) =
            integrate_contact([0.0, self.props.velocity], dt, budget, |y| -self.force(y) / mass)?;
        let force = delta.iter().map(|&y| self.force(y)).collect();
        Trajectory::new(time, delta, force)
    }
}
