//! Query string decoding for the `query_string` modifier.
//!
//! Bracketed keys build nested structures: `a[]=1&a[]=2` yields a sequence,
//! `a[x]=1` a mapping. Appending to a mapping uses the next free integer key.

use envres_domain::{Mapping, Value};
use url::Url;

/// Extracts the query component of `text`.
///
/// A parsable absolute URL yields its query, or the empty string when it has
/// none. Anything else is taken as a raw query, minus a leading `...?` and a
/// trailing `#...`.
#[must_use]
pub fn query_component(text: &str) -> String {
    if let Ok(url) = Url::parse(text) {
        return url.query().unwrap_or_default().to_string();
    }

    let query = text.split_once('?').map_or(text, |(_, query)| query);
    let query = query.split_once('#').map_or(query, |(query, _)| query);
    query.to_string()
}

/// Decodes an `application/x-www-form-urlencoded` string into a mapping.
/// Later duplicates overwrite earlier ones.
#[must_use]
pub fn parse_query(query: &str) -> Mapping {
    let mut result = Mapping::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let Some((base, segments)) = split_key(&key) else {
            continue;
        };
        let slot = result.entry(base.to_string()).or_default();
        assign(slot, &segments, value.into_owned());
    }

    result
}

/// Splits `a[b][]` into `("a", [Some("b"), None])`. Empty base names are
/// skipped. An unclosed bracket makes the whole key literal.
fn split_key(key: &str) -> Option<(&str, Vec<Option<String>>)> {
    let Some(open) = key.find('[') else {
        return (!key.is_empty()).then_some((key, Vec::new()));
    };
    if open == 0 {
        return None;
    }
    if !key[open..].contains(']') {
        return Some((key, Vec::new()));
    }

    let base = &key[..open];
    let mut segments = Vec::new();
    let mut rest = &key[open..];

    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            break;
        };
        let segment = &inner[..close];
        segments.push((!segment.is_empty()).then(|| segment.to_string()));
        rest = &inner[close + 1..];
    }

    Some((base, segments))
}

fn assign(slot: &mut Value, segments: &[Option<String>], value: String) {
    let Some((segment, rest)) = segments.split_first() else {
        *slot = Value::String(value);
        return;
    };

    match segment {
        None => {
            let mut child = Value::Null;
            assign(&mut child, rest, value);
            match slot {
                Value::Sequence(items) => items.push(child),
                Value::Mapping(map) => {
                    map.insert(next_index(map).to_string(), child);
                }
                other => *other = Value::Sequence(vec![child]),
            }
        }
        Some(key) => {
            let mut map = into_mapping(std::mem::take(slot));
            assign(map.entry(key.clone()).or_default(), rest, value);
            *slot = Value::Mapping(map);
        }
    }
}

fn into_mapping(value: Value) -> Mapping {
    match value {
        Value::Mapping(map) => map,
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        _ => Mapping::new(),
    }
}

fn next_index(map: &Mapping) -> i64 {
    map.keys()
        .filter_map(|key| key.parse::<i64>().ok())
        .filter(|index| *index >= 0)
        .max()
        .map_or(0, |index| index + 1)
}
