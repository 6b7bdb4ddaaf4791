use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};

use fanuc_link::drivers::{FanucDriver, MotionOptions};
use fanuc_link::{DriverError, JointAngles, Position};
use kinematics::{FanucKinematics, HomogeneousTransform};
use nalgebra::Point3;
use tracing::{debug, info, warn};

use crate::calibration::CameraCalibration;
use crate::config::TrackerConfig;
use crate::error::ConfigError;
use crate::trajectory::TrajectoryPlanner;
use crate::vision::{FrameSource, MarkerDetector, MarkerPose};

/// Why a tracking run stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackingOutcome {
    /// The tool reached the goal computed from the first detection.
    Completed { goal: [f64; 3] },
    Aborted,
    /// The frame source ran dry.
    StreamEnded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSettings {
    pub steps: NonZeroUsize,
    pub follow: bool,
    pub tool_orientation: [f64; 3],
    pub ready_joints: JointAngles,
}

impl TrackingSettings {
    pub fn from_config(config: &TrackerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            steps: config.step_count()?,
            follow: config.follow,
            tool_orientation: config.tool_orientation,
            ready_joints: config.ready_joints,
        })
    }
}

/// Turns marker detections into waypoints for the controller.
///
/// The flange pose is evaluated once from the ready joints and reused for
/// every detection; the camera is assumed to look from that pose.
pub struct Tracker<S, D> {
    kinematics: FanucKinematics,
    calibration: CameraCalibration,
    settings: TrackingSettings,
    flange: HomogeneousTransform,
    source: S,
    detector: D,
}

impl<S, D> Tracker<S, D>
where
    S: FrameSource,
    D: MarkerDetector<S::Frame>,
{
    pub fn new(
        kinematics: FanucKinematics,
        calibration: CameraCalibration,
        settings: TrackingSettings,
        source: S,
        detector: D,
    ) -> Self {
        let flange = kinematics.forward_pose(&settings.ready_joints);
        Self {
            kinematics,
            calibration,
            settings,
            flange,
            source,
            detector,
        }
    }

    /// Flange position at the ready pose, where the first trajectory starts.
    pub fn start_point(&self) -> Point3<f64> {
        Point3::from(self.flange.translation())
    }

    /// `flange * camera * marker * tool`, marker rotation ignored.
    pub fn goal_pose(&self, marker: &MarkerPose) -> HomogeneousTransform {
        self.flange
            * self.kinematics.camera_offset()
            * marker.position_transform()
            * self.kinematics.tool_offset()
    }

    pub fn goal_for(&self, marker: &MarkerPose) -> Point3<f64> {
        Point3::from(self.goal_pose(marker).translation())
    }

    fn waypoint_pose(&self, point: &Point3<f64>) -> Position {
        let [w, p, r] = self.settings.tool_orientation;
        Position::new(point.x, point.y, point.z, w, p, r)
    }

    /// Runs the detect / plan / move loop on a connected driver in world mode.
    ///
    /// Without `follow` the goal is fixed by the first detection and the run
    /// completes when the commanded point equals it. With `follow` every frame
    /// is re-detected and the run only ends on abort or end of stream.
    pub async fn run(
        &mut self,
        driver: &mut FanucDriver,
        abort: &AtomicBool,
    ) -> Result<TrackingOutcome, DriverError> {
        let mut current = self.start_point();
        let mut active: Option<(TrajectoryPlanner, Point3<f64>)> = None;

        loop {
            if abort.load(Ordering::Relaxed) {
                info!("Tracking aborted");
                return Ok(TrackingOutcome::Aborted);
            }

            let (mut planner, goal) = match active.take() {
                Some(locked) if !self.settings.follow => locked,
                previous => {
                    let Some(frame) = self.source.read_frame() else {
                        info!("Frame source ended");
                        return Ok(TrackingOutcome::StreamEnded);
                    };
                    match (self.detector.detect(&frame, &self.calibration), previous) {
                        (Some(marker), previous) => {
                            let goal = self.goal_for(&marker);
                            debug!("Marker {} at {:?}, goal {:?}", marker.id, marker.tvec, goal);
                            match previous {
                                Some((planner, _)) => (planner, goal),
                                None if self.settings.follow && goal == current => continue,
                                None => {
                                    info!(
                                        "Marker {} detected, goal ({:.3}, {:.3}, {:.3})",
                                        marker.id, goal.x, goal.y, goal.z
                                    );
                                    (TrajectoryPlanner::new(current, goal, self.settings.steps), goal)
                                }
                            }
                        }
                        (None, Some(previous)) => previous,
                        (None, None) => {
                            debug!("No marker in frame");
                            continue;
                        }
                    }
                }
            };

            current = planner.advance(goal);
            info!("Waypoint ({:.3}, {:.3}, {:.3})", current.x, current.y, current.z);
            driver
                .go_to_coordinates(&self.waypoint_pose(&current), MotionOptions::default())
                .await?;
            let joints = driver.read_joint_angles().await?;
            debug!("Joints {:?}", joints.to_array());

            if current == goal {
                info!("Goal reached");
                if !self.settings.follow {
                    return Ok(TrackingOutcome::Completed {
                        goal: [goal.x, goal.y, goal.z],
                    });
                }
            } else {
                active = Some((planner, goal));
            }
        }
    }
}

/// Connects, switches to world mode, tracks, and always shuts the link down.
/// A tracking error takes precedence over a shutdown error.
pub async fn run_session<S, D>(
    tracker: &mut Tracker<S, D>,
    driver: &mut FanucDriver,
    abort: &AtomicBool,
) -> Result<TrackingOutcome, DriverError>
where
    S: FrameSource,
    D: MarkerDetector<S::Frame>,
{
    let outcome = connect_and_track(tracker, driver, abort).await;
    let closed = driver.shutdown().await;
    match (outcome, closed) {
        (Err(e), Err(shutdown)) => {
            warn!("Shutdown after failure also failed: {}", shutdown);
            Err(e)
        }
        (outcome, closed) => {
            let outcome = outcome?;
            closed?;
            Ok(outcome)
        }
    }
}

async fn connect_and_track<S, D>(
    tracker: &mut Tracker<S, D>,
    driver: &mut FanucDriver,
    abort: &AtomicBool,
) -> Result<TrackingOutcome, DriverError>
where
    S: FrameSource,
    D: MarkerDetector<S::Frame>,
{
    driver.connect().await?;
    driver.set_world_frame().await?;
    tracker.run(driver, abort).await
}
