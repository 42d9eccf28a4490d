/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Query-string helpers
//!
//! Filters and read parameters are handed around as JSON objects. These helpers
//! flatten such an object into key/value pairs and encode them the way a browser
//! form would. PostgREST operator syntax (`id=eq.1`) is left to the caller: the
//! values are emitted as given.

use serde_json::Value;
use url::form_urlencoded::Serializer;

/// Flattens a JSON object into query pairs
///
/// Strings are taken raw, numbers and booleans as their text, `null` as a key
/// without a value, arrays as repeated keys and nested objects as JSON text.
/// Anything that is not an object yields no pairs.
#[must_use]
pub fn query_pairs(data: &Value) -> Vec<(String, Option<String>)> {
    let Some(map) = data.as_object() else {
        return Vec::new();
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_text(item)));
                }
            }
            other => pairs.push((key.clone(), scalar_text(other))),
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Encodes a JSON object as an `application/x-www-form-urlencoded` query string
///
/// ```
/// use postgrest_client::utils::build_query_string;
/// use serde_json::json;
///
/// let qs = build_query_string(&json!({"id": "eq.7"}));
/// assert_eq!(qs, "id=eq.7");
/// ```
#[must_use]
pub fn build_query_string(data: &Value) -> String {
    let mut serializer = Serializer::new(String::new());
    for (key, value) in query_pairs(data) {
        match value {
            Some(v) => serializer.append_pair(&key, &v),
            None => serializer.append_key_only(&key),
        };
    }
    serializer.finish()
}

/// Appends the encoded filters to `url`, using `&` when a query is already present
#[must_use]
pub fn append_query(url: &str, filters: &Value) -> String {
    let query = build_query_string(filters);
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}
