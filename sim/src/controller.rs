use fanuc_link::drivers::SafetyEnvelope;
use fanuc_link::packets::{encode_joint_telemetry, ModeCommand, MotionCommand};
use fanuc_link::{DriverError, FrameMode, JointAngles, Position};
use kinematics::FanucKinematics;
use tracing::{debug, info, warn};

// Simulated guidance server state
#[derive(Debug, Clone)]
pub struct SimulatedController {
    frame: Option<FrameMode>,
    joints: JointAngles,
    last_target: Option<Position>,
    envelope: SafetyEnvelope,
    kinematics: FanucKinematics,
}

impl SimulatedController {
    pub fn new(joints: JointAngles) -> Self {
        Self {
            frame: None,
            joints,
            last_target: None,
            envelope: SafetyEnvelope::default(),
            kinematics: FanucKinematics::default(),
        }
    }

    pub fn frame_mode(&self) -> Option<FrameMode> {
        self.frame
    }

    pub fn joints(&self) -> JointAngles {
        self.joints
    }

    /// Last Cartesian target received in world mode.
    pub fn last_target(&self) -> Option<Position> {
        self.last_target
    }

    /// Flange pose implied by the current joints.
    pub fn flange_position(&self) -> Position {
        self.kinematics.forward_pose(&self.joints).to_position()
    }

    /// Handles one read from the command channel. Motion commands are answered
    /// with a telemetry message; mode commands are not answered.
    ///
    /// Joint-mode motion moves the simulated arm instantly. World-mode motion
    /// is recorded but the joints do not change, since there is no inverse
    /// kinematics. An unset frame mode is treated as world. Cartesian targets
    /// outside the envelope are answered but not recorded; on an unframed
    /// stream that is what a mode digit merged into a motion command looks like.
    pub fn handle(&mut self, message: &str) -> Result<Option<String>, DriverError> {
        let message = message.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0');
        if let Ok(ModeCommand(mode)) = ModeCommand::parse(message) {
            info!("Frame mode {:?}", mode);
            self.frame = Some(mode);
            return Ok(None);
        }

        let command = MotionCommand::parse(message)?;
        match self.frame {
            Some(FrameMode::Joint) => {
                self.joints = command.joints();
                let flange = self.flange_position();
                info!(
                    "Moved to joints {:?}, flange at ({:.3}, {:.3}, {:.3})",
                    self.joints.to_array(),
                    flange.x,
                    flange.y,
                    flange.z
                );
            }
            frame => {
                if frame.is_none() {
                    warn!("Motion received before any frame mode, treating it as world");
                }
                let target = command.position();
                match self.envelope.check(target.x, target.y, target.z) {
                    Ok(()) => {
                        info!(
                            "Cartesian target ({:.3}, {:.3}, {:.3}) wpr ({:.3}, {:.3}, {:.3})",
                            target.x, target.y, target.z, target.w, target.p, target.r
                        );
                        self.last_target = Some(target);
                    }
                    Err(violation) => warn!(
                        "Ignoring Cartesian target {:?}: {}. A frame mode digit may have merged into the command",
                        message, violation
                    ),
                }
            }
        }
        debug!(
            "segment time {}, motion type {}",
            command.options.segment_time, command.options.motion_type
        );
        Ok(Some(encode_joint_telemetry(&self.joints)))
    }
}

impl Default for SimulatedController {
    fn default() -> Self {
        Self::new(JointAngles::new(0.0, 0.0, 0.0, 0.0, -90.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_commands_are_silent() {
        let mut sim = SimulatedController::default();
        assert_eq!(sim.handle("0").unwrap(), None);
        assert_eq!(sim.frame_mode(), Some(FrameMode::Joint));
        assert_eq!(sim.handle("2").unwrap(), None);
        assert_eq!(sim.frame_mode(), Some(FrameMode::World));
    }

    #[test]
    fn test_joint_motion_echoes_new_joints() {
        let mut sim = SimulatedController::default();
        sim.handle("0").unwrap();
        let reply = sim.handle("10000 -5000 0 0 -90000 45000 10 2 0").unwrap().unwrap();
        assert_eq!(reply, "#10000 -5000 0 0 -90000 45000\n");
        assert_eq!(sim.joints().j1, 10.0);
    }

    #[test]
    fn test_world_motion_records_target_only() {
        let mut sim = SimulatedController::default();
        sim.handle("2").unwrap();
        let reply = sim.handle("962000 80000 700000 180000 0 0 10 2 0").unwrap().unwrap();
        assert_eq!(reply, "#0 0 0 0 -90000 0\n");
        assert_eq!(
            sim.last_target(),
            Some(Position::new(962.0, 80.0, 700.0, 180.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_merged_mode_digit_is_not_recorded() {
        let mut sim = SimulatedController::default();
        let reply = sim.handle("2982000 80000 700000 180000 0 0 10 2 0").unwrap();
        assert_eq!(reply.as_deref(), Some("#0 0 0 0 -90000 0\n"));
        assert_eq!(sim.frame_mode(), None);
        assert_eq!(sim.last_target(), None);
    }

    #[test]
    fn test_world_target_outside_envelope_is_not_recorded() {
        let mut sim = SimulatedController::default();
        sim.handle("2").unwrap();
        sim.handle("962000 80000 700000 180000 0 0 10 2 0").unwrap();
        sim.handle("962000 80000 100000 180000 0 0 10 2 0").unwrap();
        assert_eq!(
            sim.last_target(),
            Some(Position::new(962.0, 80.0, 700.0, 180.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_ready_flange_matches_park_pose() {
        let flange = SimulatedController::default().flange_position();
        assert!((flange.x - 985.0).abs() < 1e-6);
        assert!((flange.z - 940.0).abs() < 1e-6);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let mut sim = SimulatedController::default();
        assert!(sim.handle("hello").is_err());
    }
}
