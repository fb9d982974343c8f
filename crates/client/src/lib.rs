pub mod config;
pub mod connector;
pub mod error;
pub mod exchange;
mod tls;

use std::io::Write;

use tracing::debug;
use wssend_core::{build_payload, build_url};

pub use config::ClientConfig;
pub use connector::{check_tls_flag, connect, WsStream};
pub use error::ClientError;
pub use exchange::{run_exchange, ExchangeOutcome, CLOSE_DEADLINE};

/// Connects, sends the configured payload once and prints replies to `out`.
///
/// Errors before the payload is written end the run; anything that stops the
/// reader afterwards is reported through [`ExchangeOutcome`]. The TLS flag is
/// checked by [`connect`] before any network activity.
pub async fn run<O>(config: &ClientConfig, out: O) -> Result<ExchangeOutcome, ClientError>
where
    O: Write + Send + 'static,
{
    let url = build_url(&config.base_url, &config.path, config.port)?;
    let payload = build_payload(&config.data)?;
    debug!(%url, members = config.data.len(), "payload ready");

    let (stream, _status) = connect(&url, config.dial_timeout, config.insecure_skip_verify).await?;
    run_exchange(stream, payload, config.read_timeout, out).await
}
