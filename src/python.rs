use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::collections::HashMap;

use crate::core::material::{Material, PRESETS};
use crate::core::{AnalyticalSolution, ContactModel, HertzMindlin, SpringDashpot, Trajectory};

type TrajectoryArrays<'py> = (
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray2<f64>>,
    Bound<'py, PyArray1<f64>>,
);

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn material_from_dict(material: HashMap<String, f64>) -> PyResult<Material> {
    Material::new("custom", material).map_err(py_err)
}

/// Convert a trajectory into `(time, delta, force)` with `delta` of shape (N, 2).
fn to_arrays<'py>(py: Python<'py>, traj: &Trajectory) -> TrajectoryArrays<'py> {
    let mut delta = Array2::<f64>::zeros((traj.len(), 2));
    for (i, d) in traj.delta().iter().enumerate() {
        delta[[i, 0]] = d[0];
        delta[[i, 1]] = d[1];
    }
    (
        Array1::from(traj.time().to_vec()).into_pyarray(py),
        delta.into_pyarray(py),
        Array1::from(traj.force().to_vec()).into_pyarray(py),
    )
}

/// Linear spring-dashpot contact model.
///
/// - __new__(material: dict[str, float], limit_force=True)
/// - displacement() -> (time, delta, force)
/// - displacement_analytical() -> (time, delta, force)
#[pyclass(name = "SpringDashpot")]
pub struct PySpringDashpot {
    inner: SpringDashpot,
}

#[pymethods]
impl PySpringDashpot {
    /// Errors: raises ValueError on missing or non-physical material properties.
    #[new]
    #[pyo3(signature = (material, limit_force=true))]
    fn new(material: HashMap<String, f64>, limit_force: bool) -> PyResult<Self> {
        let material = material_from_dict(material)?;
        let inner = SpringDashpot::new(&material, limit_force).map_err(py_err)?;
        Ok(Self { inner })
    }

    /// Estimated contact duration (s).
    fn contact_time(&self) -> f64 {
        self.inner.contact_time()
    }

    /// Numerically integrated contact (releases the GIL during computation).
    fn displacement<'py>(&self, py: Python<'py>) -> PyResult<TrajectoryArrays<'py>> {
        let traj = py.detach(|| self.inner.displacement()).map_err(py_err)?;
        Ok(to_arrays(py, &traj))
    }

    /// Closed-form damped-oscillator contact.
    fn displacement_analytical<'py>(&self, py: Python<'py>) -> PyResult<TrajectoryArrays<'py>> {
        let traj = py
            .detach(|| self.inner.displacement_analytical())
            .map_err(py_err)?;
        Ok(to_arrays(py, &traj))
    }
}

/// Hertz-Mindlin normal contact model.
///
/// - __new__(material: dict[str, float], limit_force=True)
/// - displacement() -> (time, delta, force)
#[pyclass(name = "HertzMindlin")]
pub struct PyHertzMindlin {
    inner: HertzMindlin,
}

#[pymethods]
impl PyHertzMindlin {
    #[new]
    #[pyo3(signature = (material, limit_force=true))]
    fn new(material: HashMap<String, f64>, limit_force: bool) -> PyResult<Self> {
        let material = material_from_dict(material)?;
        let inner = HertzMindlin::new(&material, limit_force).map_err(py_err)?;
        Ok(Self { inner })
    }

    fn contact_time(&self) -> f64 {
        self.inner.contact_time()
    }

    fn displacement<'py>(&self, py: Python<'py>) -> PyResult<TrajectoryArrays<'py>> {
        let traj = py.detach(|| self.inner.displacement()).map_err(py_err)?;
        Ok(to_arrays(py, &traj))
    }
}

/// Return a fresh dict copy of a built-in material preset ("steel", "glass").
#[pyfunction]
fn material<'py>(py: Python<'py>, name: &str) -> PyResult<Bound<'py, PyDict>> {
    let preset = Material::preset(name).map_err(py_err)?;
    let out = PyDict::new(py);
    for (k, v) in preset.iter() {
        out.set_item(k, v)?;
    }
    Ok(out)
}

/// Names of the built-in material presets.
#[pyfunction]
fn presets() -> Vec<&'static str> {
    PRESETS.to_vec()
}

/// The contactcurve Python module entry point.
#[pymodule]
fn contactcurve(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySpringDashpot>()?;
    m.add_class::<PyHertzMindlin>()?;
    m.add_function(wrap_pyfunction!(material, m)?)?;
    m.add_function(wrap_pyfunction!(presets, m)?)?;
    Ok(())
}
