use crate::level::LevelError;
use serde::{Deserialize, Serialize};

/// Movement constants fed to the integrator every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal acceleration while left or right is held (units/s²)
    pub acceleration: f64,
    /// Fraction of horizontal velocity removed per second
    pub friction: f64,
    /// Vertical acceleration; negative pulls the body down
    pub gravity: f64,
    /// Vertical speed added by a grounded jump
    pub jump_speed: f64,
    /// Gravity scale while rising with jump released. 1.0 disables it.
    pub fall_multiplier: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acceleration: 40.0,
            friction: 6.0,
            gravity: -25.0,
            jump_speed: 12.0,
            fall_multiplier: 1.0,
        }
    }
}

impl Tuning {
    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<(), LevelError> {
        let fields = [
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("fall_multiplier", self.fall_multiplier),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(LevelError::InvalidTuning { field, value });
            }
        }

        // Gravity may point either way; everything else is a magnitude.
        for (field, value) in fields {
            if field != "gravity" && value < 0.0 {
                return Err(LevelError::InvalidTuning { field, value });
            }
        }

        Ok(())
    }
}
