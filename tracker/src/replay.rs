//! Recorded detections played back as a frame stream.
//!
//! One JSON object per line, e.g.
//! `{"markers":[{"id":7,"rvec":[0.0,0.0,0.0],"tvec":[0.01,-0.02,0.3]}]}`.
//! A line with no markers is a frame in which nothing was detected.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calibration::CameraCalibration;
use crate::error::ConfigError;
use crate::vision::{FrameSource, MarkerDetector, MarkerPose};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RecordedFrame {
    #[serde(default)]
    pub markers: Vec<MarkerPose>,
}

#[derive(Debug)]
pub struct ReplaySource {
    frames: std::vec::IntoIter<RecordedFrame>,
}

impl ReplaySource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut frames = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let frame: RecordedFrame = serde_json::from_str(line)
                .map_err(|e| ConfigError::Parse(format!("line {}: {}", number + 1, e)))?;
            frames.push(frame);
        }
        debug!("loaded {} recorded frames", frames.len());
        Ok(Self::from_frames(frames))
    }

    pub fn from_frames(frames: Vec<RecordedFrame>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl FrameSource for ReplaySource {
    type Frame = RecordedFrame;

    fn read_frame(&mut self) -> Option<RecordedFrame> {
        self.frames.next()
    }
}

/// Reports the first marker of each frame. Poses were estimated at record
/// time, so the calibration is not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMarker;

impl MarkerDetector<RecordedFrame> for FirstMarker {
    fn detect(&mut self, frame: &RecordedFrame, _calibration: &CameraCalibration) -> Option<MarkerPose> {
        frame.markers.first().copied()
    }
}
