use serde::{Deserialize, Serialize};

/// Lifecycle of the two-socket link. Transitions only move forward until
/// shutdown returns the driver to `Uninitialized`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Uninitialized,
    SocketsOpen,
    Connected,
}

/// Framing parameters appended to every motion command.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionOptions {
    pub segment_time: i32,
    pub motion_type: i32,
}

impl MotionOptions {
    pub fn new(segment_time: i32, motion_type: i32) -> Self {
        Self {
            segment_time,
            motion_type,
        }
    }

    pub fn with_segment_time(segment_time: i32) -> Self {
        Self {
            segment_time,
            ..Self::default()
        }
    }
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            segment_time: 10,
            motion_type: 2,
        }
    }
}
