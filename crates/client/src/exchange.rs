use std::io::Write;
use std::time::Duration;

use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tracing::{debug, info, warn};
use wssend_core::render_frame;

use crate::error::ClientError;

/// How long the close frame may take to go out after the read timeout fires.
pub const CLOSE_DEADLINE: Duration = Duration::from_secs(1);

/// How a completed exchange ended. Every variant of read termination is a
/// normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOutcome {
    /// Text and binary frames printed.
    pub received: usize,
    /// Whether the read timeout fired and we started the close handshake.
    pub timed_out: bool,
    /// Why the receive loop stopped.
    pub termination: String,
}

struct ReceiveSummary {
    received: usize,
    termination: String,
}

/// Sends `payload` as one text frame, then prints replies to `out` until the
/// peer closes, a read fails, or `read_timeout` elapses (zero waits forever).
///
/// On timeout a normal close with reason `timeout` is sent and the receive
/// task is awaited until it observes the close.
pub async fn run_exchange<S, O>(
    stream: WebSocketStream<S>,
    payload: String,
    read_timeout: Duration,
    mut out: O,
) -> Result<ExchangeOutcome, ClientError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    O: Write + Send + 'static,
{
    let (mut write, read) = stream.split();

    write
        .send(Message::Text(payload.clone()))
        .await
        .map_err(|err| ClientError::Send(Box::new(err)))?;
    let _ = writeln!(out, "sent: {}", payload);
    let _ = out.flush();

    let mut receiver = tokio::spawn(receive_loop(read, out));

    let mut timed_out = false;
    let finished = if read_timeout.is_zero() {
        receiver.await
    } else {
        tokio::select! {
            finished = &mut receiver => finished,
            _ = sleep(read_timeout) => {
                timed_out = true;
                warn!("no more messages within {:?}; closing connection", read_timeout);
                let frame = CloseFrame {
                    code: CloseCode::Normal,
                    reason: "timeout".into(),
                };
                match timeout(CLOSE_DEADLINE, write.send(Message::Close(Some(frame)))).await {
                    Ok(Ok(())) => debug!("close frame sent"),
                    Ok(Err(err)) => debug!(error = %err, "close frame not sent"),
                    Err(_) => debug!("close frame not sent within {:?}", CLOSE_DEADLINE),
                }
                receiver.await
            }
        }
    };

    let summary = finished.unwrap_or_else(|err| ReceiveSummary {
        received: 0,
        termination: format!("receive task failed: {}", err),
    });

    Ok(ExchangeOutcome {
        received: summary.received,
        timed_out,
        termination: summary.termination,
    })
}

async fn receive_loop<S, O>(mut read: SplitStream<WebSocketStream<S>>, mut out: O) -> ReceiveSummary
where
    S: AsyncRead + AsyncWrite + Unpin,
    O: Write,
{
    let mut received = 0;
    // keep reading after a close so the library can flush its reply
    let mut closed: Option<String> = None;

    let termination = loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => {
                print_frame(&mut out, text.as_bytes());
                received += 1;
            }
            Some(Ok(Message::Binary(data))) => {
                print_frame(&mut out, &data);
                received += 1;
            }
            Some(Ok(Message::Close(frame))) => {
                let reason = describe_close(frame.as_ref());
                debug!("close received: {}", reason);
                closed = Some(reason);
            }
            Some(Ok(_)) => {}
            Some(Err(err)) => break closed.unwrap_or_else(|| err.to_string()),
            None => break closed.unwrap_or_else(|| "connection closed".to_string()),
        }
    };

    info!("read finished: {}", termination);
    ReceiveSummary { received, termination }
}

fn print_frame<O: Write>(out: &mut O, frame: &[u8]) {
    let _ = writeln!(out, "{}", render_frame(frame));
    let _ = out.flush();
}

fn describe_close(frame: Option<&CloseFrame<'_>>) -> String {
    match frame {
        Some(frame) if frame.reason.is_empty() => format!("close {}", u16::from(frame.code)),
        Some(frame) => format!("close {}: {}", u16::from(frame.code), frame.reason),
        None => "close (no status)".to_string(),
    }
}
