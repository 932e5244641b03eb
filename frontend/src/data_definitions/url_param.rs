//! URL parameter helpers and types.

use std::fmt::Display;

use common::url_state::ParamMap;
use serde::{Deserialize, Serialize};


/// The whole query string of the search route. The router needs `Display` and `From<&str>`
/// for a spread query segment.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SearchUrlParams(pub ParamMap);

impl From<ParamMap> for SearchUrlParams {
    fn from(value: ParamMap) -> Self {
        SearchUrlParams(value)
    }
}

// Display the params in a way that can be parsed by From<&str>
impl Display for SearchUrlParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = self
            .0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        write!(f, "{encoded}")
    }
}

impl From<&str> for SearchUrlParams {
    fn from(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        SearchUrlParams(params)
    }
}

/// Form-style decoding: `+` is a space. Invalid escapes are kept verbatim.
fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}
