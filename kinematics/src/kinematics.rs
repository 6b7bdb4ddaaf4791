// Forward kinematics for the Fanuc M-20iA.
//
// Controller joint readings are not DH angles: J2 is measured from vertical,
// J3 is coupled to J2, and J4/J6 turn the other way. `joints_to_generalized`
// maps one onto the other before the chain is evaluated.

use std::f64::consts::FRAC_PI_2;

use fanuc_link::JointAngles;

use crate::chain::KinematicChain;
use crate::robot_config::RobotConfig;
use crate::transform::HomogeneousTransform;

#[derive(Debug, Clone)]
pub struct FanucKinematics {
    config: RobotConfig,
    chain: KinematicChain<6>,
}

impl FanucKinematics {
    /// Create kinematics from a robot configuration
    pub fn from_config(config: RobotConfig) -> Self {
        Self {
            chain: KinematicChain::new(config.links),
            config,
        }
    }

    /// Get the robot configuration
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Flange pose in the base frame for controller joint angles in degrees.
    pub fn forward_pose(&self, joints: &JointAngles) -> HomogeneousTransform {
        self.chain.forward(&joints_to_generalized(joints))
    }

    pub fn camera_offset(&self) -> HomogeneousTransform {
        self.config.camera_offset
    }

    pub fn tool_offset(&self) -> HomogeneousTransform {
        self.config.tool_offset
    }
}

impl Default for FanucKinematics {
    fn default() -> Self {
        Self::from_config(RobotConfig::default())
    }
}

/// Controller joint angles (degrees) to DH joint variables (radians).
pub fn joints_to_generalized(joints: &JointAngles) -> [f64; 6] {
    let [j1, j2, j3, j4, j5, j6] = joints.to_array().map(f64::to_radians);
    [j1, -j2 + FRAC_PI_2, j3 + j2, -j4, j5, -j6]
}
