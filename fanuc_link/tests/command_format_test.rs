use fanuc_link::drivers::{FanucDriverConfig, MotionOptions};
use fanuc_link::packets::MotionCommand;
use fanuc_link::{JointAngles, Position};

#[test]
fn test_minimal_form_uses_default_framing() {
    let target = Position::new(985.0, 0.0, 940.0, 180.0, 0.0, 0.0);
    let command = MotionCommand::from_position(&target, MotionOptions::default());
    assert_eq!(command.encode(), "985000 0 940000 180000 0 0 10 2 0");
}

#[test]
fn test_segment_time_keeps_default_motion_type() {
    let target = Position::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    let command = MotionCommand::from_position(&target, MotionOptions::with_segment_time(25));
    assert_eq!(command.encode(), "1000 2000 3000 4000 5000 6000 25 2 0");
}

#[test]
fn test_segment_time_and_motion_type() {
    let target = Position::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    let command = MotionCommand::from_position(&target, MotionOptions::new(5, 1));
    assert_eq!(command.encode(), "1000 2000 3000 4000 5000 6000 5 1 0");
}

#[test]
fn test_values_truncate_toward_zero() {
    let target = Position::new(1.2345, -1.2345, 0.0004, -0.0004, 999.9999, -0.5);
    let command = MotionCommand::from_position(&target, MotionOptions::default());
    assert_eq!(command.encode(), "1234 -1234 0 0 999999 -500 10 2 0");
}

#[test]
fn test_joint_targets_share_the_layout() {
    let joints = JointAngles::new(0.0, 0.0, 0.0, 0.0, -90.0, 0.0);
    let command = MotionCommand::from_joints(&joints, MotionOptions::default());
    assert_eq!(command.encode(), "0 0 0 0 -90000 0 10 2 0");
}

#[test]
fn test_driver_config_json_defaults_missing_fields() {
    let config: FanucDriverConfig =
        serde_json::from_str(r#"{ "addr": "127.0.0.1", "telemetry_buffer": 128 }"#).unwrap();
    assert_eq!(config.addr, "127.0.0.1");
    assert_eq!(config.command_port, 59002);
    assert_eq!(config.telemetry_port, 59003);
    assert_eq!(config.telemetry_buffer, 128);
    assert_eq!(config.envelope.max, [1380.0, 465.0, 1200.0]);
}
