use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use fanuc_link::drivers::FanucDriver;
use kinematics::FanucKinematics;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tracker::{
    run_session, watch_interrupts, CameraCalibration, FirstMarker, ReplaySource, Tracker,
    TrackerConfig, TrackerError, TrackingOutcome, TrackingSettings,
};

// Conventional status for a process ended by SIGINT.
const INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(author, version, about = "Move the M-20iA tool to a detected fiducial marker", long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Controller IPv4 address, overrides the configuration
    #[arg(long)]
    robot_ip: Option<String>,

    /// Camera calibration file
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// Recorded detections, one JSON frame per line
    #[arg(short, long)]
    observations: PathBuf,

    /// Waypoints per trajectory
    #[arg(long)]
    steps: Option<usize>,

    /// Keep chasing the marker instead of stopping at the first goal
    #[arg(long)]
    follow: bool,
}

fn load_config(args: &Args) -> Result<TrackerConfig, TrackerError> {
    let mut config = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    if let Some(ip) = &args.robot_ip {
        config.driver.addr = ip.clone();
    }
    if let Some(path) = &args.calibration {
        config.calibration = Some(path.clone());
    }
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    config.follow |= args.follow;
    config.validate()?;
    Ok(config)
}

async fn run(args: Args, abort: Arc<AtomicBool>) -> Result<TrackingOutcome, TrackerError> {
    let config = load_config(&args)?;
    let calibration = match &config.calibration {
        Some(path) => CameraCalibration::load(path)?,
        None => {
            warn!("No camera calibration configured, using an uncalibrated pinhole");
            CameraCalibration::default()
        }
    };
    let source = ReplaySource::open(&args.observations)?;
    let settings = TrackingSettings::from_config(&config)?;

    let kinematics = FanucKinematics::default();
    info!("Robot model {}", kinematics.config().name);
    let mut tracker = Tracker::new(
        kinematics,
        calibration,
        settings,
        source,
        FirstMarker,
    );
    let start = tracker.start_point();
    info!("Ready pose flange at ({:.3}, {:.3}, {:.3})", start.x, start.y, start.z);

    let mut driver = FanucDriver::new(config.driver.clone());
    let outcome = run_session(&mut tracker, &mut driver, &abort).await?;
    Ok(outcome)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let abort = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&abort);
    let forced = async move { watch_interrupts(tokio::signal::ctrl_c, &flag).await };

    tokio::select! {
        result = run(args, abort) => match result {
            Ok(outcome) => {
                info!("Tracking finished: {:?}", outcome);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::from(e.exit_code())
            }
        },
        Ok(()) = forced => ExitCode::from(INTERRUPTED),
    }
}
