//! Nested parameter flattening.
//!
//! The API expects nested request parameters in the bracket syntax used by
//! Rails-style form decoders:
//!
//! ```text
//! notes[customer]=alice&items[0][amount]=100&items[0][currency]=INR
//! ```
//!
//! [`normalize`] flattens a JSON object into that shape as an ordered list of
//! `(key, value)` pairs, ready for [`crate::to_query_string`] or
//! [`crate::to_form`].
//!
//! # Ordering
//!
//! Arrays are expanded in index order. Inside an object, scalar and array
//! children are emitted as they are visited, while nested objects are queued
//! and expanded afterwards (breadth-first), in the order they were queued.
//!
//! ```
//! use razorpay_core::params::encode;
//! use serde_json::json;
//!
//! let pairs = encode("a", &json!({"b": 1, "c": [2, 3]}));
//! assert_eq!(
//!     pairs,
//!     vec![
//!         ("a[b]".to_string(), "1".to_string()),
//!         ("a[c][0]".to_string(), "2".to_string()),
//!         ("a[c][1]".to_string(), "3".to_string()),
//!     ]
//! );
//! ```

use std::collections::VecDeque;

use serde_json::{Map, Value};

/// A single flattened `(wire key, value)` pair.
pub type Pair = (String, String);

/// Flatten every top-level entry of `params` into one ordered list of pairs.
#[must_use]
pub fn normalize(params: &Map<String, Value>) -> Vec<Pair> {
    params
        .iter()
        .flat_map(|(key, value)| encode(key, value))
        .collect()
}

/// Flatten a single value found under `key`.
///
/// - empty array: one `key[]` pair with an empty value
/// - array: each element under `key[index]`
/// - object: each entry under `key[child]`, nested objects expanded breadth-first
/// - scalar: one `key` pair holding the stringified value
#[must_use]
pub fn encode(key: &str, value: &Value) -> Vec<Pair> {
    match value {
        Value::Array(items) if items.is_empty() => vec![(format!("{key}[]"), String::new())],
        Value::Array(items) => items
            .iter()
            .enumerate()
            .flat_map(|(index, item)| encode(&format!("{key}[{index}]"), item))
            .collect(),
        Value::Object(map) => encode_object(key, map),
        scalar => vec![(key.to_owned(), stringify(scalar))],
    }
}

fn encode_object(key: &str, map: &Map<String, Value>) -> Vec<Pair> {
    let mut pairs = Vec::new();
    let mut pending = VecDeque::from([(key.to_owned(), map)]);

    while let Some((parent, map)) = pending.pop_front() {
        for (child_key, child) in map {
            let wire_key = format!("{parent}[{child_key}]");
            match child {
                Value::Object(nested) => pending.push_back((wire_key, nested)),
                other => pairs.extend(encode(&wire_key, other)),
            }
        }
    }

    pairs
}

/// Wire representation of a scalar. `null` becomes the empty string.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
