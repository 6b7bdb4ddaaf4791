use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use fanuc_link::drivers::{FanucDriver, FanucDriverConfig, MotionOptions, PARKED_JOINTS, PARKED_POSITION};
use fanuc_link::{FrameMode, JointAngles, Position};
use sim::{SimServer, SimulatedController};

async fn start() -> (SimServer, FanucDriver) {
    let server = SimServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0, 0).await.unwrap();
    let config = FanucDriverConfig::new(
        "127.0.0.1".to_string(),
        server.command_addr().unwrap().port(),
        server.telemetry_addr().unwrap().port(),
    );
    (server, FanucDriver::new(config))
}

// Mode commands carry no terminator; give the server time to read one on its own.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_joint_session_moves_simulated_arm() {
    let (server, mut driver) = start().await;
    let session = tokio::spawn(async move { server.serve_one(SimulatedController::default()).await });

    driver.connect().await.unwrap();
    driver.set_joint_frame().await.unwrap();
    settle().await;

    let target = JointAngles::new(10.0, -5.0, 20.0, 0.0, -60.0, 45.0);
    driver.go_to_joints(&target, MotionOptions::default()).await.unwrap();
    assert_eq!(driver.read_joint_angles().await.unwrap(), target);

    driver.shutdown().await.unwrap();
    let controller = session.await.unwrap().unwrap();
    assert_eq!(controller.frame_mode(), Some(FrameMode::Joint));
    assert_eq!(controller.joints(), PARKED_JOINTS);
}

#[tokio::test]
async fn test_world_session_records_targets() {
    let (server, mut driver) = start().await;
    let start_joints = JointAngles::new(5.0, 0.0, 0.0, 0.0, -90.0, 0.0);
    let session = tokio::spawn(async move { server.serve_one(SimulatedController::new(start_joints)).await });

    driver.connect().await.unwrap();
    driver.set_world_frame().await.unwrap();
    settle().await;

    let target = Position::new(1000.0, 50.0, 800.0, 180.0, 0.0, 0.0);
    driver.go_to_coordinates(&target, MotionOptions::default()).await.unwrap();
    // no inverse kinematics, the arm reports where it already was
    assert_eq!(driver.read_joint_angles().await.unwrap(), start_joints);

    driver.shutdown().await.unwrap();
    let controller = session.await.unwrap().unwrap();
    assert_eq!(controller.frame_mode(), Some(FrameMode::World));
    assert_eq!(controller.last_target(), Some(PARKED_POSITION));
    assert_eq!(controller.joints(), start_joints);
}
