//! Seams to the camera and the fiducial detector.
//!
//! Capture and detection live outside this crate. The pipeline only needs a
//! stream of frames and, per frame, the pose of at most one marker in the
//! camera frame.

use kinematics::HomogeneousTransform;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::calibration::CameraCalibration;

/// Marker pose as reported by the detector: an axis-angle rotation vector and
/// a translation in metres, both in the camera frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MarkerPose {
    #[serde(default)]
    pub id: i32,
    pub rvec: [f64; 3],
    pub tvec: [f64; 3],
}

impl MarkerPose {
    pub fn translation_mm(&self) -> Vector3<f64> {
        Vector3::from(self.tvec) * 1000.0
    }

    /// Full marker pose, translation in millimetres.
    pub fn transform(&self) -> HomogeneousTransform {
        HomogeneousTransform::from_rotation_vector(&Vector3::from(self.rvec), &self.translation_mm())
    }

    /// Marker position only. The tool keeps a fixed orientation, so the
    /// marker's rotation is not used for goal computation.
    pub fn position_transform(&self) -> HomogeneousTransform {
        HomogeneousTransform::from_rotation_vector(&Vector3::zeros(), &self.translation_mm())
    }
}

/// Produces frames until the stream ends.
pub trait FrameSource {
    type Frame;

    fn read_frame(&mut self) -> Option<Self::Frame>;
}

/// Finds a marker in a frame.
pub trait MarkerDetector<F> {
    fn detect(&mut self, frame: &F, calibration: &CameraCalibration) -> Option<MarkerPose>;
}
