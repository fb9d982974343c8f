use url::{ParseError, Url};

use crate::error::UrlError;

pub const SCHEME_WS: &str = "ws";
pub const SCHEME_WSS: &str = "wss";

/// Builds the full WebSocket URL from a base URL, a path and an optional
/// port override (`0` keeps the base URL's port).
///
/// The base URL must carry a `ws` or `wss` scheme and a host. The path is
/// given a leading `/` when it lacks one and replaces any path on the base.
pub fn build_url(raw_url: &str, path: &str, port: u16) -> Result<String, UrlError> {
    let mut url = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => return Err(UrlError::MissingScheme),
        Err(ParseError::EmptyHost) => {
            // url refuses special schemes without a host before we see the scheme
            return match scheme_prefix(raw_url) {
                Some(scheme) if !is_ws_scheme(&scheme) => Err(UrlError::UnsupportedScheme(scheme)),
                _ => Err(UrlError::MissingHost),
            };
        }
        Err(err) => return Err(UrlError::Parse(err)),
    };

    if !is_ws_scheme(url.scheme()) {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    if path.starts_with('/') {
        url.set_path(path);
    } else {
        url.set_path(&format!("/{}", path));
    }
    if port > 0 {
        url.set_port(Some(port)).map_err(|_| UrlError::MissingHost)?;
    }
    Ok(url.to_string())
}

/// Whether `url` uses the TLS WebSocket scheme.
pub fn is_secure(url: &str) -> bool {
    url.starts_with("wss://")
}

fn is_ws_scheme(scheme: &str) -> bool {
    scheme == SCHEME_WS || scheme == SCHEME_WSS
}

fn scheme_prefix(raw_url: &str) -> Option<String> {
    let (scheme, _) = raw_url.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then(|| scheme.to_ascii_lowercase())
}
