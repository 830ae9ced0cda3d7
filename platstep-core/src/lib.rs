pub mod engine;
pub mod input;
pub mod integrator;
pub mod level;
pub mod math;
pub mod resolver;
pub mod runtime;
pub mod script;
pub mod tuning;

pub use engine::{Body, ContactFlags, Obstacle, PlayerState, Side};
pub use input::{ButtonState, InputState};
pub use integrator::{integrate, step};
pub use level::{Level, LevelError, Spawn};
pub use resolver::{resolve, sweep_x, sweep_y, AxisHit, Resolution};
pub use runtime::{
    build_simulation_context, build_simulation_context_from_source, run_level, run_level_source,
    step_simulation, SimulationContext, SimulationResult,
};
pub use script::{InputScript, ScriptSegment};
pub use tuning::Tuning;
