use crate::core::model::ModelKind;
use crate::driver::DEFAULT_RADIUS;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Settings for one run of the `visco-elastic` binary.
///
/// Every field has a default, so an empty JSON object (or no file at all) reproduces the
/// reference chart: steel, 1 mm radius, force limiting on, both models.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Material preset name.
    pub material: String,
    /// Particle radius override (m).
    pub radius: f64,
    /// Clamp contact forces to be non-negative.
    pub limit_force: bool,
    /// Models to evaluate, in plot order.
    pub models: Vec<ModelKind>,
    /// SVG output path.
    pub output: PathBuf,
    /// Chart size in pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            material: "steel".to_string(),
            radius: DEFAULT_RADIUS,
            limit_force: true,
            models: ModelKind::ALL.to_vec(),
            output: PathBuf::from("visco-elastic.svg"),
            width: 800,
            height: 600,
        }
    }
}

impl RunConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let cfg: Self = serde_json::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges that deserialization alone cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if self.models.is_empty() {
            return Err(Error::InvalidParam("at least one model is required".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidParam("chart size must be > 0".into()));
        }
        Ok(())
    }
}
