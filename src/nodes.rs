//! Bounded search through loosely structured innertube response trees.
//!
//! Innertube wraps everything in nested renderer objects, and the wrapping
//! changes between payload versions: a field that sits four levels deep
//! today may sit six levels deep tomorrow under a renamed intermediate
//! renderer. Rather than chase exact paths, callers name the *key* they are
//! after and let [`find_node`] hunt for the first object that carries it,
//! within a depth budget that keeps a renamed tree from turning into a full
//! scan.
//!
//! Where a path *is* stable, use [`serde_json::Value::pointer`] directly;
//! these helpers exist for the shapes that move.

use eyre::eyre;
use serde_json::Value;

/// Searches `data[key]` for the first object that carries `target` as a key.
///
/// The search is depth-first and returns the *containing* object, so the
/// caller indexes into it with `target` to reach the field itself. Depth is
/// counted in edges from the start node: with `max_depth` 0 only the start
/// node itself is inspected. Array elements cost one level just like object
/// values.
///
/// Returns `None` when `data[key]` is absent or nothing within the budget
/// carries the target key.
pub fn find_node<'a>(
    data: &'a Value,
    key: &str,
    target: &str,
    max_depth: usize,
) -> Option<&'a Value> {
    search(data.get(key)?, target, max_depth)
}

/// Like [`find_node`], but a miss is an error naming what was being located.
pub fn require_node<'a>(
    data: &'a Value,
    key: &str,
    target: &str,
    max_depth: usize,
) -> eyre::Result<&'a Value> {
    find_node(data, key, target, max_depth).ok_or_else(|| {
        eyre!("no node carrying `{target}` within {max_depth} levels of `{key}` in this response")
    })
}

/// Collects every object under `data[key]` that carries `target` as a key.
///
/// Matches are returned in visit order. The search does not descend into a
/// matched object, so a list of sibling wrappers (the common innertube
/// layout for item collections) comes back as exactly those wrappers.
pub fn collect_nodes<'a>(
    data: &'a Value,
    key: &str,
    target: &str,
    max_depth: usize,
) -> Vec<&'a Value> {
    let mut found = Vec::new();
    if let Some(start) = data.get(key) {
        collect(start, target, max_depth, &mut found);
    }
    found
}

fn search<'a>(node: &'a Value, target: &str, budget: usize) -> Option<&'a Value> {
    match node {
        Value::Object(map) => {
            if map.contains_key(target) {
                return Some(node);
            }
            if budget == 0 {
                return None;
            }
            map.values().find_map(|child| search(child, target, budget - 1))
        }
        Value::Array(items) => {
            if budget == 0 {
                return None;
            }
            items.iter().find_map(|child| search(child, target, budget - 1))
        }
        _ => None,
    }
}

fn collect<'a>(node: &'a Value, target: &str, budget: usize, found: &mut Vec<&'a Value>) {
    match node {
        Value::Object(map) => {
            if map.contains_key(target) {
                found.push(node);
                return;
            }
            if budget > 0 {
                for child in map.values() {
                    collect(child, target, budget - 1, found);
                }
            }
        }
        Value::Array(items) => {
            if budget > 0 {
                for child in items {
                    collect(child, target, budget - 1, found);
                }
            }
        }
        _ => {}
    }
}

/// Renders one of innertube's two text encodings to a plain string.
///
/// Text nodes come as either `{"simpleText": "..."}` or
/// `{"runs": [{"text": "..."}, ...]}`; the latter is concatenated in order.
/// Returns `None` for anything else. A `runs` entry without a `text` makes
/// the whole node `None` rather than a partial string.
pub fn text_of(node: &Value) -> Option<String> {
    if let Some(simple) = node.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_owned());
    }
    let runs = node.get("runs")?.as_array()?;
    let mut out = String::new();
    for run in runs {
        out.push_str(run.get("text")?.as_str()?);
    }
    Some(out)
}
