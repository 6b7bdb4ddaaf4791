use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, warn};

/// Sets `abort` on the first interrupt and returns on the second.
///
/// The pipeline only looks at `abort` between waypoints, so a controller that
/// stops answering would otherwise make the process unkillable from the
/// terminal. The caller is expected to give up on the run once this returns.
pub async fn watch_interrupts<F, Fut>(mut next_interrupt: F, abort: &AtomicBool) -> io::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    next_interrupt().await?;
    warn!("Interrupt received, stopping after the current waypoint (interrupt again to force)");
    abort.store(true, Ordering::Relaxed);

    next_interrupt().await?;
    error!("Second interrupt received, abandoning the run without parking the robot");
    Ok(())
}
