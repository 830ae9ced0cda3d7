//! Swept AABB collision against static obstacles.
//!
//! Each obstacle is inflated by the body's size (Minkowski sum) so the body
//! reduces to its anchor point. The x and y sweeps are independent: each one
//! gates candidates on the *pre-step* coordinate of the other axis. Diagonal
//! motion can therefore clip an obstacle corner within a single step.

use crate::engine::{ContactFlags, Obstacle, Side};
use crate::math::{sign, Aabb, SKIN};
use glam::DVec2;

/// Earliest blocking time found on one axis, and the body side it blocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisHit {
    pub time: f64,
    pub side: Option<Side>,
}

impl AxisHit {
    /// Nothing in the way for the whole step
    pub fn unobstructed(dt: f64) -> Self {
        Self {
            time: dt,
            side: None,
        }
    }

    /// Keep whichever of `self` and the candidate comes first.
    ///
    /// Only strictly earlier, strictly positive times win, so ties keep the
    /// hit found first and contacts already touching at t = 0 are ignored.
    pub fn consider(self, time: f64, side: Side) -> Self {
        if time > 0.0 && time < self.time {
            Self {
                time,
                side: Some(side),
            }
        } else {
            self
        }
    }
}

/// Outcome of resolving one step of motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub position: DVec2,
    pub velocity: DVec2,
    pub contacts: ContactFlags,
}

fn inflated(obstacles: &[Obstacle], dimension: DVec2) -> impl Iterator<Item = Aabb> + '_ {
    obstacles
        .iter()
        .map(move |obstacle| obstacle.bounds().inflate_for(dimension))
}

/// Earliest horizontal hit within `dt`
pub fn sweep_x(position: DVec2, dimension: DVec2, vx: f64, obstacles: &[Obstacle], dt: f64) -> AxisHit {
    if vx == 0.0 {
        return AxisHit::unobstructed(dt);
    }

    inflated(obstacles, dimension).fold(AxisHit::unobstructed(dt), |best, aabb| {
        if !aabb.spans_y(position.y) {
            return best;
        }
        let enter_left = (aabb.min.x - position.x) / vx;
        let enter_right = (aabb.max().x - position.x) / vx;
        // Reaching the obstacle's left edge blocks the body's right side.
        best.consider(enter_left, Side::Right)
            .consider(enter_right, Side::Left)
    })
}

/// Earliest vertical hit within `dt`
pub fn sweep_y(position: DVec2, dimension: DVec2, vy: f64, obstacles: &[Obstacle], dt: f64) -> AxisHit {
    if vy == 0.0 {
        return AxisHit::unobstructed(dt);
    }

    inflated(obstacles, dimension).fold(AxisHit::unobstructed(dt), |best, aabb| {
        if !aabb.spans_x(position.x) {
            return best;
        }
        let enter_bottom = (aabb.min.y - position.y) / vy;
        let enter_top = (aabb.max().y - position.y) / vy;
        best.consider(enter_bottom, Side::Up)
            .consider(enter_top, Side::Down)
    })
}

/// Advance one coordinate, stopping just short of the hit if there was one
fn advance(position: f64, velocity: f64, hit: AxisHit, dt: f64) -> (f64, f64) {
    match hit.side {
        Some(_) => (position + velocity * hit.time - sign(velocity) * SKIN, 0.0),
        None => (position + velocity * dt, velocity),
    }
}

/// Move the body by `velocity * dt`, clamped against `obstacles`
pub fn resolve(
    position: DVec2,
    dimension: DVec2,
    velocity: DVec2,
    obstacles: &[Obstacle],
    dt: f64,
) -> Resolution {
    let hit_x = sweep_x(position, dimension, velocity.x, obstacles, dt);
    let hit_y = sweep_y(position, dimension, velocity.y, obstacles, dt);

    let (x, vx) = advance(position.x, velocity.x, hit_x, dt);
    let (y, vy) = advance(position.y, velocity.y, hit_y, dt);

    let mut contacts = ContactFlags::NONE;
    for side in [hit_x.side, hit_y.side].into_iter().flatten() {
        contacts.set(side);
    }

    Resolution {
        position: DVec2::new(x, y),
        velocity: DVec2::new(vx, vy),
        contacts,
    }
}
