use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by the material layer, the contact models, the plot sinks and the driver.
///
/// Each variant carries enough context to be actionable; nothing in the crate recovers from
/// these, a run simply aborts with the first one raised.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A material property required by a contact model is absent.
    #[error("missing material property: {0}")]
    MissingProperty(String),

    /// No material preset is registered under the requested name.
    #[error("unknown material preset: {0}")]
    UnknownMaterial(String),

    /// Numerical issue inside a contact model (non-physical parameters, diverging state).
    #[error("numerical error: {0}")]
    MathError(String),

    /// Displacement/force columns do not line up with the time column.
    #[error("shape mismatch: time has {time} samples, displacement {delta}, force {force}")]
    ShapeMismatch {
        time: usize,
        delta: usize,
        force: usize,
    },

    /// Chart backend failure.
    #[error("render error: {0}")]
    Render(String),

    /// Malformed run configuration file.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Propagated I/O errors (config files, chart output).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
