pub mod controller;
pub mod geometry;
pub mod harness;
pub mod model;
pub mod observation;
pub mod target;

pub use controller::TankController;
pub use harness::{run_session, Arena};
pub use model::{DecisionModel, DoNothingModel, GreedyAimModel, GreedyChaseModel};
