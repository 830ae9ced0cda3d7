use serde::{Deserialize, Serialize};

/// Two-state control signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    Pressed,
    #[default]
    Released,
}

impl ButtonState {
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

/// Player intent sampled once per step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    #[serde(default)]
    pub left: ButtonState,
    #[serde(default)]
    pub right: ButtonState,
    #[serde(default)]
    pub jump: ButtonState,
}

impl InputState {
    /// Nothing held
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn from_pressed(left: bool, right: bool, jump: bool) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            jump: jump.into(),
        }
    }

    /// Swap left and right
    pub fn mirrored(&self) -> Self {
        Self {
            left: self.right,
            right: self.left,
            jump: self.jump,
        }
    }
}
