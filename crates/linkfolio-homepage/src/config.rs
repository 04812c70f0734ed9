//! Homepage server configuration

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP homepage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageConfig {
    /// Address the server listens on
    pub bind: SocketAddr,
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            // Localhost only unless asked otherwise
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

impl HomepageConfig {
    /// Set the listen address
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_localhost() {
        let config = HomepageConfig::default();
        assert_eq!(config.bind.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_with_bind() {
        let addr: SocketAddr = "0.0.0.0:3000".parse().unwrap();
        assert_eq!(HomepageConfig::default().with_bind(addr).bind, addr);
    }
}
