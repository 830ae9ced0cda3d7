use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Velocity components smaller than this are snapped to exactly zero
pub const VELOCITY_EPSILON: f64 = 1e-4;

/// Separation left between the body and whatever stopped it
pub const SKIN: f64 = 1e-4;

/// Snap tiny values to zero so damping never leaves the body drifting
#[inline]
pub fn snap_to_zero(value: f64) -> f64 {
    if value.abs() < VELOCITY_EPSILON {
        0.0
    } else {
        value
    }
}

/// Sign of a value with zero mapping to zero (`f64::signum` returns 1.0 for +0.0)
#[inline]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Axis-aligned box described by its minimum corner and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec2,
    pub size: DVec2,
}

impl Aabb {
    pub fn new(min: DVec2, size: DVec2) -> Self {
        Self { min, size }
    }

    /// Maximum corner
    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Minkowski sum with a body anchored at its bottom-center.
    ///
    /// Sweeping the body's anchor point against the returned box is
    /// equivalent to sweeping the whole body against `self`.
    pub fn inflate_for(&self, body_dimension: DVec2) -> Aabb {
        Aabb {
            min: DVec2::new(
                self.min.x - body_dimension.x / 2.0,
                self.min.y - body_dimension.y,
            ),
            size: self.size + body_dimension,
        }
    }

    /// Closed-interval test on the x axis
    pub fn spans_x(&self, x: f64) -> bool {
        x >= self.min.x && x <= self.min.x + self.size.x
    }

    /// Closed-interval test on the y axis
    pub fn spans_y(&self, y: f64) -> bool {
        y >= self.min.y && y <= self.min.y + self.size.y
    }

    /// True when the interiors overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Reflect across the vertical line `x = 0`
    pub fn mirrored_x(&self) -> Aabb {
        Aabb {
            min: DVec2::new(-(self.min.x + self.size.x), self.min.y),
            size: self.size,
        }
    }
}
