use crate::math::Aabb;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The dynamic body driven by the player.
///
/// `position` is the body's anchor: horizontally centered, on its bottom
/// edge. `dimension` is the full width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    pub dimension: DVec2,
    #[serde(default)]
    pub velocity: DVec2,
}

impl Body {
    pub fn new(position: DVec2, dimension: DVec2) -> Self {
        Self {
            position,
            dimension,
            velocity: DVec2::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// World-space bounds of the body
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            DVec2::new(self.position.x - self.dimension.x / 2.0, self.position.y),
            self.dimension,
        )
    }
}

/// A static box the body collides with. `position` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: DVec2,
    pub dimension: DVec2,
}

impl Obstacle {
    pub fn new(position: DVec2, dimension: DVec2) -> Self {
        Self {
            position,
            dimension,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.dimension)
    }
}

/// A side of the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

/// Which sides of the body ended the last step touching an obstacle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ContactFlags {
    pub const NONE: ContactFlags = ContactFlags {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn set(&mut self, side: Side) {
        match side {
            Side::Up => self.up = true,
            Side::Down => self.down = true,
            Side::Left => self.left = true,
            Side::Right => self.right = true,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Swap left and right
    pub fn mirrored(&self) -> ContactFlags {
        ContactFlags {
            left: self.right,
            right: self.left,
            ..*self
        }
    }
}

/// Everything a step needs to carry over to the next one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub body: Body,
    #[serde(default)]
    pub contacts: ContactFlags,
}

impl PlayerState {
    pub fn new(body: Body) -> Self {
        Self {
            body,
            contacts: ContactFlags::NONE,
        }
    }

    /// Resting on something as of the last step
    pub fn grounded(&self) -> bool {
        self.contacts.down
    }
}
