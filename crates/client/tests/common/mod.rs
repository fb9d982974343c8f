//! Shared helpers for the exchange tests: an in-process WebSocket peer and a
//! cloneable output buffer.

#![allow(dead_code)]

use std::future::Future;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};
use wssend_client::ClientConfig;

pub type PeerStream = WebSocketStream<TcpStream>;

/// Output sink the exchange can own while the test keeps a handle.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts one WebSocket client on a fresh local port and hands it to `handler`.
pub async fn spawn_peer<F, Fut>(handler: F) -> SocketAddr
where
    F: FnOnce(PeerStream) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let ws = accept_async(tcp).await.unwrap();
        handler(ws).await;
    });
    addr
}

/// Reads the client's first frame, which must be the text payload.
pub async fn read_payload(ws: &mut PeerStream) -> String {
    match ws.next().await {
        Some(Ok(Message::Text(text))) => text,
        other => panic!("expected text payload, got {:?}", other),
    }
}

/// Reads until the client goes away, returning the close frame it sent.
pub async fn drain(ws: &mut PeerStream) -> Option<CloseFrame<'static>> {
    let mut close = None;
    while let Some(Ok(msg)) = ws.next().await {
        if let Message::Close(frame) = msg {
            close = frame;
        }
    }
    close
}

/// Closes from the peer side and waits for the client's reply.
pub async fn close_and_drain(ws: &mut PeerStream) {
    let _ = ws.close(None).await;
    drain(ws).await;
}

pub fn config_for(addr: SocketAddr, read_timeout: Duration) -> ClientConfig {
    ClientConfig {
        base_url: format!("ws://{}", addr),
        path: "ws".to_string(),
        read_timeout,
        dial_timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    }
}
