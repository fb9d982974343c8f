use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use wssend_core::{parse_duration, ConfigError};

pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub path: String,
    /// `0` keeps the port from `base_url`.
    pub port: u16,
    /// `Duration::ZERO` leaves the dial unbounded.
    pub dial_timeout: Duration,
    /// `Duration::ZERO` waits for replies until the peer closes.
    pub read_timeout: Duration,
    pub insecure_skip_verify: bool,
    pub data: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            path: String::new(),
            port: 0,
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            insecure_skip_verify: false,
            data: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `WSSEND_*` environment variables.
    ///
    /// Empty or unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = ClientConfig::default();

        if let Some(v) = lookup("WSSEND_URL") {
            if !v.is_empty() {
                cfg.base_url = v;
            }
        }
        if let Some(v) = lookup("WSSEND_PATH") {
            if !v.is_empty() {
                cfg.path = v;
            }
        }
        if let Some(v) = lookup("WSSEND_PORT") {
            if let Ok(p) = v.parse::<u16>() {
                cfg.port = p;
            }
        }
        if let Some(v) = lookup("WSSEND_DIAL_TIMEOUT") {
            if let Ok(d) = parse_duration(&v) {
                cfg.dial_timeout = d;
            }
        }
        if let Some(v) = lookup("WSSEND_READ_TIMEOUT") {
            if let Ok(d) = parse_duration(&v) {
                cfg.read_timeout = d;
            }
        }
        if let Some(v) = lookup("WSSEND_INSECURE_SKIP_VERIFY") {
            if let Some(b) = parse_bool(&v) {
                cfg.insecure_skip_verify = b;
            }
        }

        cfg
    }

    /// Checks the fields every run needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingFlag("url"));
        }
        if self.path.is_empty() {
            return Err(ConfigError::MissingFlag("path"));
        }
        Ok(())
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
