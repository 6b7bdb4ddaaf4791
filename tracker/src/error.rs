use std::error::Error;
use std::fmt;
use std::io;

use fanuc_link::DriverError;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
    Invalid(String),
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Could not read input: {}", e),
            ConfigError::Parse(msg) => write!(f, "Could not parse input: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Everything that can end a tracking run early.
#[derive(Debug)]
pub enum TrackerError {
    Config(ConfigError),
    Driver(DriverError),
}

impl TrackerError {
    pub fn exit_code(&self) -> u8 {
        match self {
            TrackerError::Config(_) => 2,
            TrackerError::Driver(e) => e.exit_code(),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TrackerError::Config(e) => Some(e),
            TrackerError::Driver(e) => Some(e),
        }
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Config(e) => write!(f, "{}", e),
            TrackerError::Driver(e) => write!(f, "{}", e),
        }
    }
}

impl From<ConfigError> for TrackerError {
    fn from(e: ConfigError) -> Self {
        TrackerError::Config(e)
    }
}

impl From<DriverError> for TrackerError {
    fn from(e: DriverError) -> Self {
        TrackerError::Driver(e)
    }
}
