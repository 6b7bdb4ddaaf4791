use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use super::SafetyEnvelope;

/// ```rust,ignore
/// // Point the link at a controller; ports default to 59002 / 59003
/// let mut config = FanucDriverConfig::default();
/// config.addr = "172.27.221.60".to_string();
///
/// if let Err(e) = config.validate() {
///     println!("Configuration error: {}", e);
///     return;
/// }
///
/// let command = config.command_addr()?;     // 172.27.221.60:59002
/// let telemetry = config.telemetry_addr()?; // 172.27.221.60:59003
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FanucDriverConfig {
    /// IPv4 address of the guidance server.
    pub addr: String,
    pub command_port: u16,
    pub telemetry_port: u16,
    /// Largest telemetry message accepted in a single read.
    pub telemetry_buffer: usize,
    pub envelope: SafetyEnvelope,
}

impl FanucDriverConfig {
    pub fn new(addr: String, command_port: u16, telemetry_port: u16) -> Self {
        Self {
            addr,
            command_port,
            telemetry_port,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.addr.is_empty() {
            return Err("Address cannot be empty.".to_string());
        }
        self.ip()?;
        if self.command_port == 0 || self.telemetry_port == 0 {
            return Err("Port numbers must be greater than 0.".to_string());
        }
        if self.command_port == self.telemetry_port {
            return Err("Command and telemetry ports must differ.".to_string());
        }
        if self.telemetry_buffer < 2 {
            return Err("Telemetry buffer must hold at least two bytes.".to_string());
        }
        self.envelope.validate()
    }

    pub fn command_addr(&self) -> Result<SocketAddr, String> {
        Ok(SocketAddr::V4(SocketAddrV4::new(self.ip()?, self.command_port)))
    }

    pub fn telemetry_addr(&self) -> Result<SocketAddr, String> {
        Ok(SocketAddr::V4(SocketAddrV4::new(self.ip()?, self.telemetry_port)))
    }

    fn ip(&self) -> Result<Ipv4Addr, String> {
        self.addr
            .parse::<Ipv4Addr>()
            .map_err(|_| format!("'{}' is not a valid IPv4 address.", self.addr))
    }
}

impl Default for FanucDriverConfig {
    fn default() -> Self {
        Self {
            addr: "172.27.221.60".to_string(),
            command_port: 59002,
            telemetry_port: 59003,
            telemetry_buffer: 64,
            envelope: SafetyEnvelope::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_lab_controller() {
        let config = FanucDriverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.command_addr().unwrap().to_string(), "172.27.221.60:59002");
        assert_eq!(config.telemetry_addr().unwrap().to_string(), "172.27.221.60:59003");
        assert_eq!(config.telemetry_buffer, 64);
    }

    #[test]
    fn validate_catches_bad_fields() {
        let mut config = FanucDriverConfig::new("robot.local".to_string(), 59002, 59003);
        assert!(config.validate().is_err());

        config.addr = "127.0.0.1".to_string();
        config.telemetry_port = 59002;
        assert!(config.validate().is_err());

        config.telemetry_port = 0;
        assert!(config.validate().is_err());

        config.telemetry_port = 59003;
        config.telemetry_buffer = 1;
        assert!(config.validate().is_err());
    }
}
