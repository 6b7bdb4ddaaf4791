//! Robot geometry and camera calibration for the Fanuc M-20iA cell.
//!
//! Lengths are millimetres, angles radians. The DH table follows the standard
//! convention `(d, theta, a, alpha)`.

use std::f64::consts::FRAC_PI_2;

use crate::chain::DhLink;
use crate::transform::HomogeneousTransform;

#[derive(Debug, Clone, PartialEq)]
pub struct RobotConfig {
    pub name: &'static str,

    /// Link table, base to flange
    pub links: [DhLink; 6],

    /// Flange frame to camera frame
    pub camera_offset: HomogeneousTransform,

    /// Marker frame to the point the tool should reach
    pub tool_offset: HomogeneousTransform,
}

impl RobotConfig {
    /// Create configuration for the M-20iA
    ///
    /// - Shoulder offset: 150 mm, upper arm: 790 mm, elbow offset: 250 mm
    /// - Forearm: 835 mm, flange: 100 mm
    /// - Camera mounted 130 mm above the flange, rotated a quarter turn about Z
    /// - Tool point 190 mm short of the marker along its Z axis
    pub fn m20ia() -> Self {
        Self {
            name: "M-20iA",
            links: [
                DhLink::new(0.0, 0.0, 150.0, FRAC_PI_2),
                DhLink::new(0.0, 0.0, 790.0, 0.0),
                DhLink::new(0.0, 0.0, 250.0, FRAC_PI_2),
                DhLink::new(835.0, 0.0, 0.0, -FRAC_PI_2),
                DhLink::new(0.0, 0.0, 0.0, FRAC_PI_2),
                DhLink::new(100.0, 0.0, 0.0, 0.0),
            ],
            camera_offset: HomogeneousTransform::from_rows([
                [0.0, -1.0, 0.0, -43.0],
                [1.0, 0.0, 0.0, -90.0],
                [0.0, 0.0, 1.0, 130.0],
            ]),
            tool_offset: HomogeneousTransform::from_rows([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, -190.0],
            ]),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::m20ia()
    }
}
