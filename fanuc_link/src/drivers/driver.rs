use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpSocket, TcpStream};
use tracing::{debug, error, info, warn};

use crate::packets::{parse_joint_telemetry, ModeCommand, MotionCommand};
use crate::{Channel, DriverError, FrameMode, JointAngles, Operation, Position, SocketErrorCode};

use super::{ConnectionState, FanucDriverConfig, MotionOptions};

/// Joint pose commanded on shutdown when the link is in joint mode.
pub const PARKED_JOINTS: JointAngles = JointAngles::new(0.0, 0.0, 0.0, 0.0, -90.0, 0.0);
/// Cartesian pose commanded on shutdown otherwise. Same pose as `PARKED_JOINTS`.
pub const PARKED_POSITION: Position = Position::new(985.0, 0.0, 940.0, 180.0, 0.0, 0.0);

#[derive(Debug)]
enum Channels {
    Uninitialized,
    SocketsOpen {
        command: TcpSocket,
        telemetry: TcpSocket,
    },
    Connected {
        command: TcpStream,
        telemetry: TcpStream,
    },
}

/// Client side of the guidance server's two-socket protocol.
///
/// Every call that touches the network takes `&mut self`, so a command and the
/// telemetry read that answers it can never interleave with another caller's.
/// Call [`FanucDriver::shutdown`] before dropping a connected driver; the
/// robot is only parked from there.
#[derive(Debug)]
pub struct FanucDriver {
    pub config: FanucDriverConfig,
    channels: Channels,
    frame: Option<FrameMode>,
}

impl FanucDriver {
    pub fn new(config: FanucDriverConfig) -> Self {
        Self {
            config,
            channels: Channels::Uninitialized,
            frame: None,
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        match self.channels {
            Channels::Uninitialized => ConnectionState::Uninitialized,
            Channels::SocketsOpen { .. } => ConnectionState::SocketsOpen,
            Channels::Connected { .. } => ConnectionState::Connected,
        }
    }

    /// `None` until a frame mode has been sent. An unset mode is enforced as world.
    pub fn frame_mode(&self) -> Option<FrameMode> {
        self.frame
    }

    /// Creates both IPv4 stream sockets without connecting them.
    pub fn open(&mut self) -> Result<(), DriverError> {
        if !matches!(self.channels, Channels::Uninitialized) {
            return Ok(());
        }
        let command = open_socket(Channel::Command)?;
        let telemetry = open_socket(Channel::Telemetry)?;
        self.channels = Channels::SocketsOpen { command, telemetry };
        debug!("command and telemetry sockets created");
        Ok(())
    }

    /// Connects the command channel, then the telemetry channel. Either
    /// failure is fatal and leaves the driver uninitialized.
    pub async fn connect(&mut self) -> Result<(), DriverError> {
        self.config.validate().map_err(DriverError::Configuration)?;
        let command_addr = self.config.command_addr().map_err(DriverError::Configuration)?;
        let telemetry_addr = self
            .config
            .telemetry_addr()
            .map_err(DriverError::Configuration)?;

        let (command, telemetry) = match std::mem::replace(&mut self.channels, Channels::Uninitialized) {
            Channels::SocketsOpen { command, telemetry } => (command, telemetry),
            Channels::Uninitialized => (open_socket(Channel::Command)?, open_socket(Channel::Telemetry)?),
            connected @ Channels::Connected { .. } => {
                self.channels = connected;
                return Ok(());
            }
        };

        info!("Connecting command channel to {}", command_addr);
        let command = command
            .connect(command_addr)
            .await
            .map_err(|e| transport_failure(Channel::Command, Operation::Connect, &e))?;
        info!("Connecting telemetry channel to {}", telemetry_addr);
        let telemetry = telemetry
            .connect(telemetry_addr)
            .await
            .map_err(|e| transport_failure(Channel::Telemetry, Operation::Connect, &e))?;

        if let Err(e) = command.set_nodelay(true) {
            warn!("could not disable Nagle on the command channel: {}", e);
        }

        self.channels = Channels::Connected { command, telemetry };
        info!("Controller link established");
        Ok(())
    }

    pub async fn set_world_frame(&mut self) -> Result<(), DriverError> {
        self.set_frame(FrameMode::World).await
    }

    pub async fn set_joint_frame(&mut self) -> Result<(), DriverError> {
        self.set_frame(FrameMode::Joint).await
    }

    async fn set_frame(&mut self, mode: FrameMode) -> Result<(), DriverError> {
        self.send(ModeCommand(mode).encode()).await?;
        self.frame = Some(mode);
        info!("Frame mode set to {:?}", mode);
        Ok(())
    }

    /// Sends one motion command. Outside joint mode the target's x, y, z must
    /// lie inside the configured envelope or nothing is sent.
    pub async fn go_to_coordinates(
        &mut self,
        target: &Position,
        options: MotionOptions,
    ) -> Result<(), DriverError> {
        self.check_envelope(target)?;
        let message = MotionCommand::from_position(target, options).encode();
        self.send(&message).await
    }

    pub async fn go_to_joints(
        &mut self,
        target: &JointAngles,
        options: MotionOptions,
    ) -> Result<(), DriverError> {
        if self.frame != Some(FrameMode::Joint) {
            return Err(DriverError::Configuration(
                "joint targets require joint frame mode".to_string(),
            ));
        }
        let message = MotionCommand::from_joints(target, options).encode();
        self.send(&message).await
    }

    /// One read of at most `telemetry_buffer` bytes. A closed channel is
    /// reported as an aborted connection.
    pub async fn read_joint_angles(&mut self) -> Result<JointAngles, DriverError> {
        let mut buffer = vec![0u8; self.config.telemetry_buffer];
        let (_, telemetry) = self.streams()?;
        let n = telemetry
            .read(&mut buffer)
            .await
            .map_err(|e| transport_failure(Channel::Telemetry, Operation::Receive, &e))?;
        if n == 0 {
            let err = DriverError::Transport {
                channel: Channel::Telemetry,
                operation: Operation::Receive,
                code: SocketErrorCode::ConnectionAborted,
                detail: "controller closed the telemetry channel".to_string(),
            };
            error!("{}", err);
            return Err(err);
        }
        debug!("Received: {}", String::from_utf8_lossy(&buffer[..n]).trim_end());
        parse_joint_telemetry(&buffer[..n])
    }

    /// Parks the robot, waits for one telemetry message and closes both
    /// channels. Sockets are released even when parking fails; the parking
    /// error is still returned.
    pub async fn shutdown(&mut self) -> Result<(), DriverError> {
        if self.connection_state() != ConnectionState::Connected {
            self.channels = Channels::Uninitialized;
            self.frame = None;
            return Ok(());
        }

        let parked = self.park().await;
        if let Err(e) = &parked {
            error!("Failed to park robot before closing: {}", e);
        }

        if let Channels::Connected {
            mut command,
            mut telemetry,
        } = std::mem::replace(&mut self.channels, Channels::Uninitialized)
        {
            let _ = command.shutdown().await;
            let _ = telemetry.shutdown().await;
        }
        self.frame = None;
        info!("Controller link closed");
        parked
    }

    async fn park(&mut self) -> Result<(), DriverError> {
        match self.frame {
            Some(FrameMode::Joint) => {
                info!("Parking robot at joint pose {:?}", PARKED_JOINTS.to_array());
                self.go_to_joints(&PARKED_JOINTS, MotionOptions::default()).await?;
            }
            _ => {
                info!("Parking robot at {:?}", PARKED_POSITION.to_array());
                self.go_to_coordinates(&PARKED_POSITION, MotionOptions::default())
                    .await?;
            }
        }
        self.read_joint_angles().await.map(|_| ())
    }

    fn check_envelope(&self, target: &Position) -> Result<(), DriverError> {
        if self.frame == Some(FrameMode::Joint) {
            return Ok(());
        }
        if self.frame.is_none() {
            warn!("Motion requested before a frame mode was set; enforcing the world envelope");
        }
        self.config
            .envelope
            .check(target.x, target.y, target.z)
            .map_err(|violation| {
                error!("{}", violation);
                DriverError::EnvelopeViolation(violation)
            })
    }

    async fn send(&mut self, message: &str) -> Result<(), DriverError> {
        let (command, _) = self.streams()?;
        command
            .write_all(message.as_bytes())
            .await
            .map_err(|e| transport_failure(Channel::Command, Operation::Send, &e))?;
        debug!("Sent: {}", message);
        Ok(())
    }

    fn streams(&mut self) -> Result<(&mut TcpStream, &mut TcpStream), DriverError> {
        match &mut self.channels {
            Channels::Connected { command, telemetry } => Ok((command, telemetry)),
            _ => Err(DriverError::NotConnected),
        }
    }
}

impl Drop for FanucDriver {
    fn drop(&mut self) {
        if let Channels::Connected { .. } = self.channels {
            warn!("FanucDriver dropped while connected; sockets closed without parking the robot");
        }
    }
}

fn open_socket(channel: Channel) -> Result<TcpSocket, DriverError> {
    TcpSocket::new_v4().map_err(|e| transport_failure(channel, Operation::Open, &e))
}

fn transport_failure(channel: Channel, operation: Operation, err: &std::io::Error) -> DriverError {
    let err = DriverError::transport(channel, operation, err);
    error!("{}", err);
    err
}
