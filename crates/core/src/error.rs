use thiserror::Error;

/// Problems with the operator's arguments or configuration.
///
/// The binary reports these with usage text and exit status 2.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("-{0} is required")]
    MissingFlag(&'static str),
    #[error("invalid data {0:?} (want Name=Value)")]
    InvalidPair(String),
    #[error("missing name in {0:?}")]
    MissingName(String),
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: &'static str },
}

/// Reasons a base URL cannot be turned into a WebSocket target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("url must include scheme, e.g. ws://host or wss://host")]
    MissingScheme,
    #[error("unsupported scheme {0:?} (use ws:// or wss://)")]
    UnsupportedScheme(String),
    #[error("url must include host")]
    MissingHost,
    #[error("parse url: {0}")]
    Parse(#[from] url::ParseError),
}
