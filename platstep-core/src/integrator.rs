use crate::engine::{Body, ContactFlags, Obstacle, PlayerState};
use crate::input::InputState;
use crate::math::snap_to_zero;
use crate::resolver::resolve;
use crate::tuning::Tuning;
use glam::DVec2;

/// Apply input, friction, jump and gravity to produce the provisional velocity.
///
/// Friction is taken from the pre-update velocity (semi-implicit), so a
/// released body decays instead of stopping dead.
pub fn integrate(
    velocity: DVec2,
    input: &InputState,
    dt: f64,
    tuning: &Tuning,
    contacts_before: ContactFlags,
) -> DVec2 {
    let mut vy = velocity.y;

    // No edge detection: a held jump fires again on every grounded step.
    if input.jump.is_pressed() && contacts_before.down {
        vy += tuning.jump_speed;
    }

    let mut accel = 0.0;
    if input.left.is_pressed() {
        accel -= tuning.acceleration;
    }
    if input.right.is_pressed() {
        accel += tuning.acceleration;
    }
    let vx = snap_to_zero(velocity.x + accel * dt - tuning.friction * velocity.x * dt);

    let gravity = if vy > 0.0 && !input.jump.is_pressed() {
        tuning.gravity * tuning.fall_multiplier
    } else {
        tuning.gravity
    };
    let vy = snap_to_zero(vy + gravity * dt);

    DVec2::new(vx, vy)
}

/// Advance the player by `dt` seconds against a static obstacle set.
///
/// Non-positive or non-finite `dt` returns `state` unchanged.
pub fn step(
    state: &PlayerState,
    input: &InputState,
    obstacles: &[Obstacle],
    tuning: &Tuning,
    dt: f64,
) -> PlayerState {
    if dt <= 0.0 || !dt.is_finite() {
        return *state;
    }

    let body = &state.body;
    let velocity = integrate(body.velocity, input, dt, tuning, state.contacts);
    let resolution = resolve(body.position, body.dimension, velocity, obstacles, dt);

    debug_assert!(
        resolution.position.is_finite() && resolution.velocity.is_finite(),
        "non-finite body state after step: {:?}",
        resolution
    );

    if resolution.contacts != state.contacts {
        tracing::trace!(
            before = ?state.contacts,
            after = ?resolution.contacts,
            "contacts changed"
        );
    }

    PlayerState {
        body: Body {
            position: resolution.position,
            dimension: body.dimension,
            velocity: resolution.velocity,
        },
        contacts: resolution.contacts,
    }
}
