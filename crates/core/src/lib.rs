//! Pure building blocks for `wssend`: argument parsing, target URL and
//! payload construction, and rendering of received frames.

pub mod duration;
pub mod error;
pub mod pairs;
pub mod payload;
pub mod render;
pub mod target;

pub use duration::parse_duration;
pub use error::{ConfigError, UrlError};
pub use pairs::{parse_pair, parse_pairs};
pub use payload::build_payload;
pub use render::render_frame;
pub use target::{build_url, is_secure};
