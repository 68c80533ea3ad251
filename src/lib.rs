//! Force-displacement curves for granular contact models.
//!
//! Two normal-contact formulations ([`core::SpringDashpot`], [`core::HertzMindlin`]) are
//! evaluated for a configured material and rendered as one chart by [`driver::Driver`]. With
//! the `python` feature the models are also exported as a Python extension module.

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod plot;

#[cfg(feature = "python")]
mod python;
