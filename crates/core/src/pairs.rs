use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Parses one `Name=Value` token, splitting on the first `=` only.
///
/// The value may be empty or contain further `=` characters; the name must
/// not be blank.
pub fn parse_pair(arg: &str) -> Result<(String, String), ConfigError> {
    let Some((name, value)) = arg.split_once('=') else {
        return Err(ConfigError::InvalidPair(arg.to_string()));
    };
    if name.trim().is_empty() {
        return Err(ConfigError::MissingName(arg.to_string()));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Collects trailing `Name=Value` arguments into a map. Later duplicates win.
pub fn parse_pairs<I, S>(args: I) -> Result<BTreeMap<String, String>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut data = BTreeMap::new();
    for arg in args {
        let (name, value) = parse_pair(arg.as_ref())?;
        data.insert(name, value);
    }
    Ok(data)
}
