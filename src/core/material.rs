use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Particle radius (m).
pub const RADIUS: &str = "radius";
/// Young's modulus (Pa).
pub const YOUNGS_MODULUS: &str = "youngs_modulus";
/// Poisson's ratio (dimensionless).
pub const POISSONS_RATIO: &str = "poissons_ratio";
/// Bulk density (kg/m^3).
pub const DENSITY: &str = "density";
/// Normal coefficient of restitution in (0, 1].
pub const COEFFICIENT_RESTITUTION: &str = "coefficient_restitution";
/// Impact velocity used to initialise a contact (m/s).
pub const CHARACTERISTIC_VELOCITY: &str = "characteristic_velocity";
/// Sliding friction coefficient (carried for completeness, unused by the normal models).
pub const COEFFICIENT_FRICTION: &str = "coefficient_friction";

/// Names of the built-in presets accepted by [`Material::preset`].
pub const PRESETS: [&str; 2] = ["steel", "glass"];

/// A set of named physical properties describing one granular material.
///
/// Values are always finite. A `Material` is an owned value: presets hand out fresh copies and
/// overrides produce new materials, so no caller ever observes another caller's edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    props: BTreeMap<String, f64>,
}

impl Material {
    /// Create a material from `(key, value)` pairs.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if any value is NaN/inf.
    pub fn new<I, K>(name: impl Into<String>, props: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (k, v) in props {
            let k = k.into();
            if !v.is_finite() {
                return Err(Error::InvalidParam(format!("{k} must be finite")));
            }
            map.insert(k, v);
        }
        Ok(Self {
            name: name.into(),
            props: map,
        })
    }

    /// Look up a built-in preset by name. Every call returns an independent copy.
    pub fn preset(name: &str) -> Result<Self> {
        let props: &[(&str, f64)] = match name {
            "steel" => &[
                (RADIUS, 1e-4),
                (YOUNGS_MODULUS, 200e9),
                (POISSONS_RATIO, 0.29),
                (DENSITY, 7800.0),
                (COEFFICIENT_RESTITUTION, 0.9),
                (CHARACTERISTIC_VELOCITY, 0.1),
                (COEFFICIENT_FRICTION, 0.5),
            ],
            "glass" => &[
                (RADIUS, 1e-4),
                (YOUNGS_MODULUS, 63e9),
                (POISSONS_RATIO, 0.23),
                (DENSITY, 2500.0),
                (COEFFICIENT_RESTITUTION, 0.85),
                (CHARACTERISTIC_VELOCITY, 0.1),
                (COEFFICIENT_FRICTION, 0.4),
            ],
            other => return Err(Error::UnknownMaterial(other.to_string())),
        };
        Self::new(name, props.iter().map(|&(k, v)| (k, v)))
    }

    /// Preset or user-supplied name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.props.get(key).copied()
    }

    /// Value stored under `key`.
    ///
    /// Errors:
    /// - `Error::MissingProperty` if the key is absent.
    pub fn require(&self, key: &str) -> Result<f64> {
        self.get(key)
            .ok_or_else(|| Error::MissingProperty(key.to_string()))
    }

    /// Copy of this material with `key` set to `value`.
    pub fn with_override(&self, key: &str, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidParam(format!("{key} must be finite")));
        }
        let mut out = self.clone();
        out.props.insert(key.to_string(), value);
        Ok(out)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.props.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Copy `preset` and set its particle radius; the preset itself is left untouched.
pub fn configure_material(preset: &Material, radius: f64) -> Result<Material> {
    if radius <= 0.0 {
        return Err(Error::InvalidParam("radius must be finite and > 0".into()));
    }
    preset.with_override(RADIUS, radius)
}

/// Effective (reduced) properties for a head-on collision of two identical spheres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactProperties {
    /// Effective radius R* = R/2.
    pub radius: f64,
    /// Effective mass m* = m/2.
    pub mass: f64,
    /// Effective Young's modulus Y* = E / (2 (1 - nu^2)).
    pub youngs_modulus: f64,
    /// Coefficient of restitution.
    pub restitution: f64,
    /// Initial approach velocity.
    pub velocity: f64,
}

impl ContactProperties {
    /// Derive effective properties from a material, validating every value a model relies on.
    ///
    /// Errors:
    /// - `Error::MissingProperty` if a required key is absent.
    /// - `Error::InvalidParam` if a value is out of its physical range.
    pub fn from_material(material: &Material) -> Result<Self> {
        let radius = material.require(RADIUS)?;
        let youngs = material.require(YOUNGS_MODULUS)?;
        let poisson = material.require(POISSONS_RATIO)?;
        let density = material.require(DENSITY)?;
        let restitution = material.require(COEFFICIENT_RESTITUTION)?;
        let velocity = material.require(CHARACTERISTIC_VELOCITY)?;

        if radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be > 0".into()));
        }
        if youngs <= 0.0 {
            return Err(Error::InvalidParam("youngs_modulus must be > 0".into()));
        }
        if !(-1.0..0.5).contains(&poisson) {
            return Err(Error::InvalidParam(
                "poissons_ratio must lie in [-1, 0.5)".into(),
            ));
        }
        if density <= 0.0 {
            return Err(Error::InvalidParam("density must be > 0".into()));
        }
        if restitution <= 0.0 || restitution > 1.0 {
            return Err(Error::InvalidParam(
                "coefficient_restitution must lie in (0, 1]".into(),
            ));
        }
        if velocity <= 0.0 {
            return Err(Error::InvalidParam(
                "characteristic_velocity must be > 0".into(),
            ));
        }

        let mass = density * 4.0 / 3.0 * PI * radius.powi(3);
        Ok(Self {
            radius: 0.5 * radius,
            mass: 0.5 * mass,
            youngs_modulus: youngs / (2.0 * (1.0 - poisson * poisson)),
            restitution,
            velocity,
        })
    }

    /// Damping ratio term ln(e) / sqrt(ln^2 e + pi^2); zero for perfectly elastic contacts.
    #[inline]
    pub fn beta(&self) -> f64 {
        let ln_e = self.restitution.ln();
        ln_e / (ln_e * ln_e + PI * PI).sqrt()
    }
}
