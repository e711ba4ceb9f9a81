//! Runtime configuration for the server process.
//!
//! The deployment environment drives everything: `PORT` selects the listening
//! port (default 8000) and `APP_API_KEY` optionally enables API-key
//! authentication. Resolution happens exactly once at startup, against an
//! injected name→value lookup so tests never have to touch the real process
//! environment, and the result is immutable for the lifetime of the process.
//!
//! A malformed `PORT` is a startup failure: the process must exit before any
//! socket is bound rather than silently fall back to the default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Environment variable selecting the listening port.
pub const PORT_VAR: &str = "PORT";

/// Environment variable carrying the optional API key.
pub const API_KEY_VAR: &str = "APP_API_KEY";

/// Listening port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// Error produced by configuration resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `PORT` was set but does not parse as a port number.
    InvalidPort { value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort { value } => write!(
                f,
                "PORT={:?} is not a valid port number (expected an integer in 0..=65535)",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable runtime configuration, resolved once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Address the listener binds to. Always all interfaces.
    pub host: IpAddr,
    /// Listening port, from `PORT` or [`DEFAULT_PORT`].
    pub port: u16,
    /// When set, `/compute` requires a matching `X-API-Key` header.
    pub api_key: Option<String>,
}

impl RuntimeConfig {
    /// Resolves the configuration from a name→value lookup.
    ///
    /// `PORT` absent means [`DEFAULT_PORT`]; any present value must parse as
    /// a `u16` (zero included) or resolution fails. An empty `APP_API_KEY`
    /// counts as unset.
    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let api_key = lookup(API_KEY_VAR).filter(|key| !key.is_empty());

        Ok(RuntimeConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port,
            api_key,
        })
    }

    /// Resolves the configuration from the real process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// The socket address the server binds.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve_with(pairs: &[(&str, &str)]) -> Result<RuntimeConfig, ConfigError> {
        let vars = env(pairs);
        RuntimeConfig::resolve(|name| vars.get(name).cloned())
    }

    #[test]
    fn unset_port_defaults_to_8000() {
        let config = resolve_with(&[]).unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn port_override_is_honored() {
        let config = resolve_with(&[("PORT", "3000")]).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn port_zero_is_a_literal_value() {
        let config = resolve_with(&[("PORT", "0")]).unwrap();
        assert_eq!(config.port, 0);
    }

    #[test]
    fn malformed_port_fails_resolution() {
        let err = resolve_with(&[("PORT", "abc")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn negative_port_fails_resolution() {
        assert!(resolve_with(&[("PORT", "-1")]).is_err());
    }

    #[test]
    fn out_of_range_port_fails_resolution() {
        assert!(resolve_with(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn host_always_binds_all_interfaces() {
        for pairs in [vec![], vec![("PORT", "9100")]] {
            let config = resolve_with(&pairs).unwrap();
            assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let vars = env(&[("PORT", "4242"), ("APP_API_KEY", "secret")]);
        let first = RuntimeConfig::resolve(|name| vars.get(name).cloned()).unwrap();
        let second = RuntimeConfig::resolve(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn api_key_is_optional() {
        let config = resolve_with(&[]).unwrap();
        assert_eq!(config.api_key, None);

        let config = resolve_with(&[("APP_API_KEY", "secret")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let config = resolve_with(&[("APP_API_KEY", "")]).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn addr_combines_host_and_port() {
        let config = resolve_with(&[("PORT", "3000")]).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
    }
}
