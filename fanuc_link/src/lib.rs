use serde::{Deserialize, Serialize};

pub mod drivers;
pub mod errors;
pub mod packets;
pub mod transforms;
pub use errors::*;

/// Cartesian pose as the guidance server understands it.
///
/// `x`, `y`, `z` are millimetres in the robot base frame, `w`, `p`, `r` are
/// degrees. The same six slots carry joint angles when the controller is in
/// joint frame mode.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
    pub p: f64,
    pub r: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64, w: f64, p: f64, r: f64) -> Self {
        Self { x, y, z, w, p, r }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.x, self.y, self.z, self.w, self.p, self.r]
    }

    pub fn from_array(values: [f64; 6]) -> Self {
        let [x, y, z, w, p, r] = values;
        Self { x, y, z, w, p, r }
    }
}

/// Six joint angles in degrees, as reported on the telemetry channel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct JointAngles {
    pub j1: f64,
    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j5: f64,
    pub j6: f64,
}

impl JointAngles {
    pub const fn new(j1: f64, j2: f64, j3: f64, j4: f64, j5: f64, j6: f64) -> Self {
        Self { j1, j2, j3, j4, j5, j6 }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.j1, self.j2, self.j3, self.j4, self.j5, self.j6]
    }

    pub fn from_array(values: [f64; 6]) -> Self {
        let [j1, j2, j3, j4, j5, j6] = values;
        Self { j1, j2, j3, j4, j5, j6 }
    }
}

/// Interpretation of the six values in a motion command.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameMode {
    /// Cartesian targets in the base frame. Subject to the safety envelope.
    World,
    /// Joint-space targets. The envelope check is skipped.
    Joint,
}
