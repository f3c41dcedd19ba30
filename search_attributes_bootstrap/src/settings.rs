//! Environment-driven configuration for the bootstrap hook.
//!
//! Everything is resolved once at boot. Bad numeric overrides are logged and
//! replaced with the default instead of aborting — a mistyped env var must not
//! keep the whole application from starting.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

pub const DEFAULT_ADDRESS: &str = "temporal:7233";
pub const DEFAULT_NAMESPACE: &str = "default";

const DEFAULT_ATTEMPTS: u32 = 30;
const DEFAULT_RETRY_DELAY_MS: u64 = 2000;

/// Resolved configuration for one run of the hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Frontend address, `host:port` or a full URL.
    pub address: String,
    /// Namespace whose search attributes are inspected and amended.
    pub namespace: String,
    /// How often to probe the cluster before giving up.
    pub attempts: u32,
    /// Pause between consecutive probes.
    pub retry_delay: Duration,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function. `from_env` goes
    /// through here; tests supply a closure over a map instead of mutating
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let address = lookup("TEMPORAL_ADDRESS")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let namespace = lookup("TEMPORAL_NAMESPACE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let attempts = parse_or_default(
            "TEMPORAL_CONNECT_ATTEMPTS",
            lookup("TEMPORAL_CONNECT_ATTEMPTS"),
            DEFAULT_ATTEMPTS,
        );
        let retry_delay_ms = parse_or_default(
            "TEMPORAL_CONNECT_RETRY_DELAY_MS",
            lookup("TEMPORAL_CONNECT_RETRY_DELAY_MS"),
            DEFAULT_RETRY_DELAY_MS,
        );

        Settings {
            address,
            namespace,
            attempts,
            retry_delay: Duration::from_millis(retry_delay_ms),
        }
    }

    /// The address as a URL usable for the gRPC channel. A bare `host:port`
    /// is promoted to `http://host:port`.
    pub fn server_url(&self) -> String {
        if self.address.contains("://") {
            self.address.clone()
        } else {
            format!("http://{}", self.address)
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    match raw {
        None => default,
        Some(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("ignoring unparsable {key}={value:?}, using default {default}");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_original_hook() {
        let settings = Settings::default();
        assert_eq!(settings.address, "temporal:7233");
        assert_eq!(settings.namespace, "default");
        assert_eq!(settings.attempts, 30);
        assert_eq!(settings.retry_delay, Duration::from_millis(2000));
    }

    #[test]
    fn env_overrides_are_honored() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("TEMPORAL_ADDRESS", "temporal.prod.internal:7233"),
            ("TEMPORAL_NAMESPACE", "bots"),
            ("TEMPORAL_CONNECT_ATTEMPTS", "5"),
            ("TEMPORAL_CONNECT_RETRY_DELAY_MS", "250"),
        ]));
        assert_eq!(settings.address, "temporal.prod.internal:7233");
        assert_eq!(settings.namespace, "bots");
        assert_eq!(settings.attempts, 5);
        assert_eq!(settings.retry_delay, Duration::from_millis(250));
    }

    #[test]
    fn empty_strings_fall_back_to_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("TEMPORAL_ADDRESS", ""),
            ("TEMPORAL_NAMESPACE", ""),
        ]));
        assert_eq!(settings.address, "temporal:7233");
        assert_eq!(settings.namespace, "default");
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("TEMPORAL_CONNECT_ATTEMPTS", "plenty"),
            ("TEMPORAL_CONNECT_RETRY_DELAY_MS", "-1"),
        ]));
        assert_eq!(settings.attempts, 30);
        assert_eq!(settings.retry_delay, Duration::from_millis(2000));
    }

    #[test]
    fn bare_host_port_is_promoted_to_http_url() {
        let settings = Settings::default();
        assert_eq!(settings.server_url(), "http://temporal:7233");

        let settings = Settings::from_lookup(lookup_from(&[(
            "TEMPORAL_ADDRESS",
            "https://temporal.example.com:7233",
        )]));
        assert_eq!(settings.server_url(), "https://temporal.example.com:7233");
    }
}
