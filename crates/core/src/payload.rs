use std::collections::BTreeMap;

/// Serializes the key/value mapping into a flat JSON object string.
///
/// The map is sorted, so the encoded form does not depend on the order the
/// pairs were given in.
pub fn build_payload(data: &BTreeMap<String, String>) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}
