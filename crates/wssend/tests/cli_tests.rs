//! Runs the built binary and checks what the operator sees: exit status,
//! stdout and stderr.

use std::process::Output;

use futures_util::StreamExt;
use tokio::net::TcpListener;
use tokio::process::Command;
use tokio_tungstenite::accept_async;

async fn wssend(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wssend"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("WSSEND_URL")
        .env_remove("WSSEND_PATH")
        .env_remove("WSSEND_PORT")
        .env_remove("WSSEND_DIAL_TIMEOUT")
        .env_remove("WSSEND_READ_TIMEOUT")
        .env_remove("WSSEND_INSECURE_SKIP_VERIFY")
        .output()
        .await
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[tokio::test]
async fn missing_url_exits_2_with_usage() {
    let out = wssend(&["-path", "/ws"]).await;
    assert_eq!(out.status.code(), Some(2));
    let err = stderr(&out);
    assert!(err.contains("argument error: -url is required"), "{}", err);
    assert!(err.contains("Usage:"), "{}", err);
}

#[tokio::test]
async fn malformed_pair_exits_2() {
    let out = wssend(&["-url", "ws://localhost", "-path", "/ws", "novalue"]).await;
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("argument error: invalid data \"novalue\""));
}

#[tokio::test]
async fn bad_flag_value_exits_2_as_argument_error() {
    let out = wssend(&["-url", "ws://localhost", "-path", "/ws", "-read-timeout", "soon"]).await;
    assert_eq!(out.status.code(), Some(2));
    let err = stderr(&out);
    assert!(err.starts_with("argument error: "), "{}", err);
    assert!(err.contains("Usage:"), "{}", err);
}

#[tokio::test]
async fn help_exits_0() {
    let out = wssend(&["-help"]).await;
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("-read-timeout"));
}

#[tokio::test]
async fn unsupported_scheme_exits_1() {
    let out = wssend(&["-url", "http://localhost", "-path", "/ws"]).await;
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error: unsupported scheme \"http\""), "{}", err);
    assert!(!err.contains("argument error"), "{}", err);
}

#[tokio::test]
async fn skip_verify_on_ws_exits_1() {
    let out = wssend(&["-url", "ws://127.0.0.1:1", "-path", "/ws", "-insecure-skip-verify"]).await;
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("only valid with wss://"));
    assert!(stdout(&out).is_empty());
}

#[tokio::test]
async fn read_timeout_closes_and_exits_0() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(tcp).await.unwrap();
        // stay silent; the client's close frame ends the stream
        while let Some(Ok(_)) = ws.next().await {}
    });

    let url = format!("ws://{}", addr);
    let out = wssend(&["-url", &url, "-path", "ws", "-read-timeout", "200ms", "k=v"]).await;

    assert_eq!(out.status.code(), Some(0));
    let printed = stdout(&out);
    assert!(printed.contains("sent: {\"k\":\"v\"}"), "{}", printed);
    assert!(!printed.contains("recv:"), "{}", printed);

    let err = stderr(&out);
    assert!(err.contains("connected: 101 Switching Protocols"), "{}", err);
    assert!(err.contains("no more messages within 200ms; closing connection"), "{}", err);
    assert!(err.contains("read finished: close 1000: timeout"), "{}", err);
}
