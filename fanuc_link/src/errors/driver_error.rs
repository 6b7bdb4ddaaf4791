use std::error::Error;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

use super::SocketErrorCode;
use crate::drivers::EnvelopeViolation;

/// Which of the two sockets an error occurred on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Command,
    Telemetry,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Open,
    Connect,
    Send,
    Receive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    Transport {
        channel: Channel,
        operation: Operation,
        code: SocketErrorCode,
        detail: String,
    },
    EnvelopeViolation(EnvelopeViolation),
    MalformedMessage(String),
    NotConnected,
    Configuration(String),
}

impl DriverError {
    pub fn transport(channel: Channel, operation: Operation, err: &io::Error) -> Self {
        DriverError::Transport {
            channel,
            operation,
            code: SocketErrorCode::from_io(err),
            detail: err.to_string(),
        }
    }

    /// Process exit status for a run that ended on this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DriverError::Transport { code, .. } => u8::try_from(code.code()).unwrap_or(1),
            DriverError::EnvelopeViolation(_) => 255,
            _ => 1,
        }
    }
}

impl Error for DriverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Command => write!(f, "command"),
            Channel::Telemetry => write!(f, "telemetry"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Open => write!(f, "open"),
            Operation::Connect => write!(f, "connect"),
            Operation::Send => write!(f, "send"),
            Operation::Receive => write!(f, "receive"),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DriverError::Transport { channel, operation, code, ref detail } => write!(
                f,
                "{} (failed to {} on the {} channel: {})",
                code, operation, channel, detail
            ),
            DriverError::EnvelopeViolation(ref violation) => write!(f, "{}", violation),
            DriverError::MalformedMessage(ref msg) => write!(f, "Malformed message: {}", msg),
            DriverError::NotConnected => write!(f, "Controller link is not connected"),
            DriverError::Configuration(ref msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}
