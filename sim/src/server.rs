use std::io;
use std::net::{IpAddr, SocketAddr};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

use crate::controller::SimulatedController;

/// Command and telemetry listeners of a simulated guidance server.
///
/// Messages are unframed, so a mode command is only recognised when it
/// arrives in a read of its own.
pub struct SimServer {
    command: TcpListener,
    telemetry: TcpListener,
}

impl SimServer {
    pub async fn bind(ip: IpAddr, command_port: u16, telemetry_port: u16) -> io::Result<Self> {
        let command = TcpListener::bind(SocketAddr::new(ip, command_port)).await?;
        let telemetry = TcpListener::bind(SocketAddr::new(ip, telemetry_port)).await?;
        Ok(Self { command, telemetry })
    }

    pub fn command_addr(&self) -> io::Result<SocketAddr> {
        self.command.local_addr()
    }

    pub fn telemetry_addr(&self) -> io::Result<SocketAddr> {
        self.telemetry.local_addr()
    }

    /// Serves one client until it closes the command channel and returns the
    /// controller state at that point.
    pub async fn serve_one(&self, mut controller: SimulatedController) -> io::Result<SimulatedController> {
        let (command, peer) = self.command.accept().await?;
        info!("Command channel connected from {}", peer);
        let (telemetry, peer) = self.telemetry.accept().await?;
        info!("Telemetry channel connected from {}", peer);
        serve_session(command, telemetry, &mut controller).await?;
        info!("Client disconnected");
        Ok(controller)
    }

    /// Serves clients one after another. The arm keeps its joints between
    /// sessions; the frame mode does not carry over.
    pub async fn run(&self) -> io::Result<()> {
        let mut controller = SimulatedController::default();
        loop {
            let fresh = SimulatedController::new(controller.joints());
            match self.serve_one(fresh).await {
                Ok(state) => controller = state,
                Err(e) => error!("Session ended with error: {}", e),
            }
        }
    }
}

async fn serve_session(
    mut command: TcpStream,
    mut telemetry: TcpStream,
    controller: &mut SimulatedController,
) -> io::Result<()> {
    let mut buffer = vec![0u8; 1024];
    loop {
        let n = command.read(&mut buffer).await?;
        if n == 0 {
            return Ok(());
        }
        let message = String::from_utf8_lossy(&buffer[..n]);
        match controller.handle(&message) {
            Ok(Some(reply)) => telemetry.write_all(reply.as_bytes()).await?,
            Ok(None) => {}
            Err(e) => warn!("Ignoring {:?}: {}", message, e),
        }
    }
}
