use crate::engine::PlayerState;
use crate::input::InputState;
use crate::integrator::step;
use crate::level::{Level, LevelError};
use crate::script::InputScript;

/// A level being played: the static layout plus the evolving player state
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub level: Level,
    pub state: PlayerState,
    pub current_step: u64,
}

impl SimulationContext {
    /// Put the player back at the spawn point
    pub fn reset(&mut self) {
        self.state = self.level.initial_state();
        self.current_step = 0;
    }
}

/// Final result of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub final_state: PlayerState,
    pub steps: u64,
    /// Steps that ended with the body resting on something
    pub grounded_steps: u64,
    /// Highest the body's bottom edge reached
    pub peak_height: f64,
}

/// Validate a level and place the player at its spawn point
pub fn build_simulation_context(level: Level) -> Result<SimulationContext, LevelError> {
    level.validate()?;
    let state = level.initial_state();
    Ok(SimulationContext {
        level,
        state,
        current_step: 0,
    })
}

/// Parse a level from JSON source and build a context for it
pub fn build_simulation_context_from_source(source: &str) -> Result<SimulationContext, LevelError> {
    build_simulation_context(Level::from_json(source)?)
}

/// Advance the context by one step and return the new state
pub fn step_simulation(ctx: &mut SimulationContext, input: &InputState, dt: f64) -> PlayerState {
    ctx.state = step(&ctx.state, input, &ctx.level.obstacles, &ctx.level.tuning, dt);
    ctx.current_step += 1;
    ctx.state
}

/// Run a level for `steps` fixed steps, feeding input from `script`
pub fn run_level(
    level: Level,
    script: &InputScript,
    dt: f64,
    steps: u64,
) -> Result<SimulationResult, LevelError> {
    script.validate()?;
    let mut ctx = build_simulation_context(level)?;

    let mut grounded_steps = 0;
    let mut peak_height = ctx.state.body.position.y;
    for frame in 0..steps {
        let state = step_simulation(&mut ctx, &script.input_at(frame), dt);
        if state.grounded() {
            grounded_steps += 1;
        }
        peak_height = peak_height.max(state.body.position.y);
    }

    tracing::debug!(
        steps,
        grounded_steps,
        position = ?ctx.state.body.position,
        "run finished"
    );

    Ok(SimulationResult {
        final_state: ctx.state,
        steps,
        grounded_steps,
        peak_height,
    })
}

/// Parse a level from JSON source and run it
pub fn run_level_source(
    source: &str,
    script: &InputScript,
    dt: f64,
    steps: u64,
) -> Result<SimulationResult, LevelError> {
    run_level(Level::from_json(source)?, script, dt, steps)
}
