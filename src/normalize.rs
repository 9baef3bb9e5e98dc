//! Canonicalization of PYON text.
//!
//! Two encodings of the same dict can differ only in key order and
//! whitespace. [`normalize`] collapses both: it decodes, sorts every dict
//! level by key, and re-encodes in the canonical single-line form, so equal
//! values always normalize to byte-identical text. [`sort_keys_recursive`]
//! is the value-level half for callers that already hold a [`Value`].
//!
//! ```rust
//! use serde_pyon::normalize;
//!
//! assert_eq!(normalize("{'b': 2, 'a': 1}").unwrap(), "{'a': 1, 'b': 2}");
//! assert_eq!(normalize("{'a':1,'b':2}").unwrap(), "{'a': 1, 'b': 2}");
//! ```

use std::cmp::Ordering;

use crate::{decode, encode, HashableValue, Result, Value};

/// Rewrites every dict in the value so its keys appear in ascending order.
///
/// Recurses into dict values and list and tuple elements. Set members keep
/// their insertion order. Keys order the way Python sorts them: numbers
/// (bools, ints, floats) compare numerically with each other, strings
/// lexicographically, tuples elementwise; any other pairing of key types
/// has no defined order. Numerically equal keys of different types, such
/// as `1` and `1.0`, keep a fixed bool-int-float order so the canonical
/// text never depends on insertion order.
///
/// # Errors
///
/// Returns [`Error::IncomparableKeys`](crate::Error::IncomparableKeys) when
/// a dict mixes key types with no defined order, such as a string key
/// alongside an integer key.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{decode, encode, sort_keys_recursive};
///
/// let value = decode("{'b': {'d': 1, 'c': 2}, 'a': 3}").unwrap();
/// let sorted = sort_keys_recursive(value).unwrap();
/// assert_eq!(encode(&sorted), "{'a': 3, 'b': {'c': 2, 'd': 1}}");
///
/// let mixed = decode("{'a': 1, 2: 3}").unwrap();
/// assert!(sort_keys_recursive(mixed).is_err());
/// ```
pub fn sort_keys_recursive(value: Value) -> Result<Value> {
    match value {
        Value::List(items) => {
            let items = items
                .into_iter()
                .map(sort_keys_recursive)
                .collect::<Result<_>>()?;
            Ok(Value::List(items))
        }
        Value::Tuple(items) => {
            let items = items
                .into_iter()
                .map(sort_keys_recursive)
                .collect::<Result<_>>()?;
            Ok(Value::Tuple(items))
        }
        Value::Dict(dict) => {
            let mut entries: Vec<(HashableValue, Value)> = Vec::with_capacity(dict.len());
            for (key, val) in dict {
                entries.push((key, sort_keys_recursive(val)?));
            }
            Ok(Value::Dict(sort_entries(entries)?.into_iter().collect()))
        }
        other => Ok(other),
    }
}

/// Stable merge sort for dict entries whose key comparison can fail.
///
/// `slice::sort_by` requires a total order and std's sort panics when it
/// detects an inconsistent comparator, so an error from
/// [`HashableValue::try_cmp`] stops the sort and propagates instead of
/// being masked as `Equal`.
fn sort_entries(entries: Vec<(HashableValue, Value)>) -> Result<Vec<(HashableValue, Value)>> {
    if entries.len() <= 1 {
        return Ok(entries);
    }

    let mut front = entries;
    let back = front.split_off(front.len() / 2);
    let front = sort_entries(front)?;
    let back = sort_entries(back)?;

    let mut merged = Vec::with_capacity(front.len() + back.len());
    let mut front = front.into_iter().peekable();
    let mut back = back.into_iter().peekable();
    loop {
        // equal keys take from the front run, keeping the sort stable
        let from_front = match (front.peek(), back.peek()) {
            (Some(a), Some(b)) => a.0.try_cmp(&b.0)? != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if from_front {
            merged.extend(front.next());
        } else {
            merged.extend(back.next());
        }
    }
    Ok(merged)
}

/// Decodes, sorts keys recursively, and re-encodes single-line.
///
/// Text that does not decode as PYON is returned unchanged; normalization
/// runs over mixed columns where most cells are plain strings. The output
/// for decodable input is canonical, so the function is idempotent and two
/// encodings of equal dicts normalize to identical text.
///
/// # Errors
///
/// Returns [`Error::IncomparableKeys`](crate::Error::IncomparableKeys) when
/// the decoded value mixes unorderable key types. Decode failures are not
/// errors here; they select the pass-through path.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::normalize;
///
/// assert_eq!(normalize("{'b': 2, 'a': 1}").unwrap(), "{'a': 1, 'b': 2}");
/// assert_eq!(normalize("not pyon at all").unwrap(), "not pyon at all");
/// assert!(normalize("{'a': 1, 2: 3}").is_err());
/// ```
pub fn normalize(text: &str) -> Result<String> {
    let value = match decode(text) {
        Ok(value) => value,
        Err(_) => return Ok(text.to_string()),
    };
    Ok(encode(&sort_keys_recursive(value)?))
}
