//! Recorded input for headless runs.
//!
//! A script is a JSON array of segments, each holding a set of buttons for a
//! number of frames:
//!
//! ```json
//! [
//!   { "frames": 30, "right": true },
//!   { "frames": 1, "right": true, "jump": true },
//!   { "frames": 60 }
//! ]
//! ```

use crate::input::InputState;
use crate::level::LevelError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Buttons held for a run of consecutive frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSegment {
    pub frames: u32,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
}

impl ScriptSegment {
    pub fn input(&self) -> InputState {
        InputState::from_pressed(self.left, self.right, self.jump)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    pub segments: Vec<ScriptSegment>,
}

impl InputScript {
    pub fn new(segments: Vec<ScriptSegment>) -> Self {
        Self { segments }
    }

    pub fn from_json(source: &str) -> Result<Self, LevelError> {
        let script: InputScript = serde_json::from_str(source)?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        match self.segments.iter().position(|segment| segment.frames == 0) {
            Some(index) => Err(LevelError::EmptySegment { index }),
            None => Ok(()),
        }
    }

    /// Number of frames the script covers
    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Input for a given frame; frames past the end are idle
    pub fn input_at(&self, frame: u64) -> InputState {
        let mut remaining = frame;
        for segment in &self.segments {
            let frames = u64::from(segment.frames);
            if remaining < frames {
                return segment.input();
            }
            remaining -= frames;
        }
        InputState::idle()
    }

    /// One input per frame, in order
    pub fn frames(&self) -> impl Iterator<Item = InputState> + '_ {
        self.segments
            .iter()
            .flat_map(|segment| std::iter::repeat(segment.input()).take(segment.frames as usize))
    }
}
