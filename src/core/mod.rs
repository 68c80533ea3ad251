//! Contact-mechanics core: materials, trajectories, the model capability traits and the two
//! shipped contact formulations.

pub mod hertz_mindlin;
pub mod integrator;
pub mod material;
pub mod model;
pub mod spring_dashpot;
pub mod trajectory;

pub use hertz_mindlin::HertzMindlin;
pub use material::{configure_material, ContactProperties, Material};
pub use model::{AnalyticalSolution, ContactModel, ModelFactory, ModelKind};
pub use spring_dashpot::SpringDashpot;
pub use trajectory::Trajectory;
