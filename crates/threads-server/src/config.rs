//! Server configuration.

use crate::error::{Error, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use threads_core::ResetPolicy;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 4173;

/// Configuration for a Threads server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen address
    pub listen_addr: SocketAddr,

    /// Progress document location
    pub state_path: PathBuf,

    /// Directory holding the static frontend
    pub static_dir: PathBuf,

    /// What `POST /api/reset` clears
    pub reset_policy: ResetPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            state_path: PathBuf::from("./data/state.json"),
            static_dir: PathBuf::from("./public"),
            reset_policy: ResetPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// - `HOST`, `PORT`: listen address (`0.0.0.0:4173`)
    /// - `THREADS_STATE_PATH`: progress document (`./data/state.json`)
    /// - `THREADS_STATIC_DIR`: frontend assets (`./public`)
    /// - `THREADS_RESET_POLICY`: `everything` or `keep-custom`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = match var("HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .map_err(|_| Error::Config(format!("invalid HOST: {}", host)))?,
            None => defaults.listen_addr.ip(),
        };

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("invalid PORT: {}", port)))?,
            None => DEFAULT_PORT,
        };

        let reset_policy = match var("THREADS_RESET_POLICY") {
            Some(policy) => policy
                .parse()
                .map_err(|e: threads_core::Error| Error::Config(e.to_string()))?,
            None => defaults.reset_policy,
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            state_path: var("THREADS_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_path),
            static_dir: var("THREADS_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            reset_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:4173".parse().unwrap());
        assert_eq!(config.state_path, PathBuf::from("./data/state.json"));
        assert_eq!(config.reset_policy, ResetPolicy::Everything);
    }

    #[test]
    fn env_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("THREADS_STATE_PATH", "/var/lib/threads/state.json"),
            ("THREADS_STATIC_DIR", "/srv/threads"),
            ("THREADS_RESET_POLICY", "keep-custom"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.state_path, PathBuf::from("/var/lib/threads/state.json"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/threads"));
        assert_eq!(config.reset_policy, ResetPolicy::KeepCustomCatalog);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("HOST", "not a host")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("THREADS_RESET_POLICY", "nope")])).is_err());
    }
}
