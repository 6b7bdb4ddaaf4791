pub mod calibration;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod pipeline;
pub mod replay;
pub mod trajectory;
pub mod vision;

pub use calibration::CameraCalibration;
pub use config::TrackerConfig;
pub use error::{ConfigError, TrackerError};
pub use interrupt::watch_interrupts;
pub use pipeline::{run_session, Tracker, TrackingOutcome, TrackingSettings};
pub use replay::{FirstMarker, RecordedFrame, ReplaySource};
pub use trajectory::{plan, TrajectoryPlanner};
pub use vision::{FrameSource, MarkerDetector, MarkerPose};
