use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::{connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};
use wssend_core::is_secure;

use crate::error::ClientError;
use crate::tls::insecure_client_config;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Rejects `-insecure-skip-verify` for targets where it would be ignored.
pub fn check_tls_flag(url: &str, insecure_skip_verify: bool) -> Result<(), ClientError> {
    if insecure_skip_verify && !is_secure(url) {
        return Err(ClientError::SchemeMismatch);
    }
    Ok(())
}

/// Dials `url` and completes the WebSocket handshake.
///
/// `dial_timeout` bounds TCP connect, TLS and the upgrade together; zero
/// leaves it unbounded. Returns the stream and the handshake status line.
pub async fn connect(
    url: &str,
    dial_timeout: Duration,
    insecure_skip_verify: bool,
) -> Result<(WsStream, String), ClientError> {
    check_tls_flag(url, insecure_skip_verify)?;

    let connector = if insecure_skip_verify {
        debug!("certificate verification disabled");
        Some(Connector::Rustls(insecure_client_config()))
    } else {
        None
    };

    let dial = connect_async_tls_with_config(url, None, false, connector);
    let dialed = if dial_timeout.is_zero() {
        dial.await
    } else {
        match timeout(dial_timeout, dial).await {
            Ok(dialed) => dialed,
            Err(_) => {
                return Err(ClientError::ConnectTimeout {
                    url: url.to_string(),
                    timeout: dial_timeout,
                })
            }
        }
    };

    let (stream, response) = dialed.map_err(|source| ClientError::Connect {
        url: url.to_string(),
        source: Box::new(source),
    })?;

    let status = status_line(response.status());
    info!("connected: {}", status);
    Ok((stream, status))
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
