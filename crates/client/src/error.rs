use std::time::Duration;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;
use wssend_core::UrlError;

/// Failures that end a run with a runtime error.
///
/// Read-side termination after the payload is sent is not an error; see
/// [`crate::ExchangeOutcome`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("-insecure-skip-verify is only valid with wss:// URLs")]
    SchemeMismatch,

    #[error("encode payload: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("dial {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: Box<WsError>,
    },

    #[error("dial {url}: timed out after {timeout:?}")]
    ConnectTimeout { url: String, timeout: Duration },

    #[error("send message: {0}")]
    Send(#[source] Box<WsError>),
}
