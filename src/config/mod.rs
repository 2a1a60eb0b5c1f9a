//! Configuration module for the contact desk.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::service::ServiceLatency;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Simulated delay of the in-memory contact service
    pub latency: ServiceLatency,
    /// Start with the sample contacts
    pub seed_contacts: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("CONTACTS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CONTACTS_BIND_ADDR format");

        let log_level = env::var("CONTACTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = ServiceLatency::default();
        let latency = ServiceLatency {
            read: millis_var("CONTACTS_READ_LATENCY_MS").unwrap_or(defaults.read),
            write: millis_var("CONTACTS_WRITE_LATENCY_MS").unwrap_or(defaults.write),
        };

        let seed_contacts = env::var("CONTACTS_SEED")
            .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            bind_addr,
            log_level,
            latency,
            seed_contacts,
        }
    }
}

fn millis_var(name: &str) -> Option<Duration> {
    let value = env::var(name).ok()?;
    match value.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a number of milliseconds", name, value);
            None
        }
    }
}
