//! Configuration for the blocking HTTP transport

use std::time::Duration;

use crate::error::TransportError;

/// Configuration for [`UreqTransport`](crate::UreqTransport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Timeout for establishing a connection
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Timeout for each socket read
    /// Default: 10 seconds
    pub read_timeout: Duration,

    /// Timeout for each socket write
    /// Default: 10 seconds
    pub write_timeout: Duration,

    /// Value of the User-Agent header
    /// Default: "soaptrip/<crate version>"
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
            user_agent: concat!("soaptrip/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short timeouts for devices on the local network
    pub fn local_network() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.connect_timeout == Duration::ZERO {
            return Err(TransportError::Configuration(
                "Connect timeout must be greater than 0".to_string(),
            ));
        }

        if self.read_timeout == Duration::ZERO {
            return Err(TransportError::Configuration(
                "Read timeout must be greater than 0".to_string(),
            ));
        }

        if self.write_timeout == Duration::ZERO {
            return Err(TransportError::Configuration(
                "Write timeout must be greater than 0".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(TransportError::Configuration(
                "User agent must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TransportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(config.user_agent.starts_with("soaptrip/"));
        assert!(TransportConfig::local_network().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = TransportConfig {
            read_timeout: Duration::ZERO,
            ..Default::default()
        };

        match config.validate() {
            Err(TransportError::Configuration(msg)) => assert!(msg.contains("Read timeout")),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let config = TransportConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
