use std::ffi::OsString;
use std::fmt::Display;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use dotenvy::dotenv;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wssend_client::ClientConfig;
use wssend_core::{parse_duration, parse_pairs, ConfigError};

/// Long flags that may also be spelled with a single dash (`-url`).
const LONG_FLAGS: &[&str] = &[
    "url",
    "path",
    "port",
    "dial-timeout",
    "read-timeout",
    "insecure-skip-verify",
    "help",
    "version",
];

#[derive(Parser, Debug)]
#[command(
    name = "wssend",
    version,
    about = "Send one JSON message over a WebSocket and print the replies",
    override_usage = "wssend -url ws://host -path /ws [-port 8080] [-insecure-skip-verify] Name=Value [More=Data]"
)]
struct Cli {
    /// WebSocket base URL (e.g. ws://localhost:8080) [env: WSSEND_URL]
    #[arg(long = "url", value_name = "URL")]
    url: Option<String>,
    /// WebSocket path (e.g. /ws) [env: WSSEND_PATH]
    #[arg(long = "path", value_name = "PATH")]
    path: Option<String>,
    /// Port to override in the WebSocket URL
    #[arg(long = "port", value_name = "PORT")]
    port: Option<u16>,
    /// How long to wait when establishing the connection [default: 10s]
    #[arg(long = "dial-timeout", value_name = "DURATION", value_parser = parse_duration)]
    dial_timeout: Option<Duration>,
    /// How long to wait for responses after sending, 0 waits indefinitely [default: 10s]
    #[arg(long = "read-timeout", value_name = "DURATION", value_parser = parse_duration)]
    read_timeout: Option<Duration>,
    /// Skip TLS certificate verification (wss:// only; testing only)
    #[arg(
        long = "insecure-skip-verify",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    insecure_skip_verify: Option<bool>,
    /// Payload members
    #[arg(value_name = "NAME=VALUE")]
    data: Vec<String>,
}

impl Cli {
    /// Applies the flags on top of `base` and validates the result.
    fn into_config(self, mut base: ClientConfig) -> Result<ClientConfig, ConfigError> {
        if let Some(url) = self.url {
            base.base_url = url;
        }
        if let Some(path) = self.path {
            base.path = path;
        }
        if let Some(port) = self.port {
            base.port = port;
        }
        if let Some(d) = self.dial_timeout {
            base.dial_timeout = d;
        }
        if let Some(d) = self.read_timeout {
            base.read_timeout = d;
        }
        if let Some(skip) = self.insecure_skip_verify {
            base.insecure_skip_verify = skip;
        }
        base.validate()?;
        base.data = parse_pairs(&self.data)?;
        Ok(base)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => return usage_error(&clap_message(&err)),
    };

    init_tracing();

    let config = match cli.into_config(ClientConfig::from_env()) {
        Ok(config) => config,
        Err(err) => return usage_error(&err),
    };

    match wssend_client::run(&config, io::stdout()).await {
        Ok(outcome) => {
            debug!(
                received = outcome.received,
                timed_out = outcome.timed_out,
                "exchange complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn usage_error(err: &dyn Display) -> ExitCode {
    eprintln!("argument error: {}", err);
    eprintln!("{}", Cli::command().render_help());
    ExitCode::from(2)
}

/// First line of clap's rendered error without its own `error: ` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,tokio_tungstenite=warn,tungstenite=warn"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

/// Rewrites `-url x` / `-url=x` style flags into the `--url` form clap expects.
///
/// Only known long flags are touched, and nothing after `--`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut flags_done = false;
    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || flags_done {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            flags_done = true;
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-')?;
            if rest.starts_with('-') {
                return None;
            }
            let name = rest.split('=').next().unwrap_or(rest);
            LONG_FLAGS.contains(&name).then(|| OsString::from(format!("-{}", s)))
        });
        out.push(rewritten.unwrap_or(arg));
    }
    out
}
