//! Unknown-key tracking.
//!
//! Types are decoded through [`serde_ignored`], which reports every document
//! key the type's `Deserialize` impl skipped. Aliases, `skip_serializing`
//! and friends are honoured because nothing is re-encoded.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// A mapping entry.
    Key(String),
    /// A sequence element.
    Index(usize),
    /// The content of an enum variant tag.
    Variant,
}

/// Location of a key relative to the node that was decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldPath(Vec<Segment>);

impl FieldPath {
    fn from_ignored(path: &serde_ignored::Path<'_>) -> Self {
        let mut segments = Vec::new();
        collect(path, &mut segments);
        Self(segments)
    }

    #[cfg(test)]
    pub(crate) fn segments(&self) -> &[Segment] {
        &self.0
    }
}

fn collect(path: &serde_ignored::Path<'_>, out: &mut Vec<Segment>) {
    use serde_ignored::Path;

    match path {
        Path::Root => {},
        Path::Seq { parent, index } => {
            collect(parent, out);
            out.push(Segment::Index(*index));
        },
        Path::Map { parent, key } => {
            collect(parent, out);
            out.push(Segment::Key(key.clone()));
        },
        Path::NewtypeVariant { parent } => {
            collect(parent, out);
            out.push(Segment::Variant);
        },
        Path::Some { parent } | Path::NewtypeStruct { parent } => collect(parent, out),
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                },
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Variant => continue,
            }
            first = false;
        }
        Ok(())
    }
}

/// Renders a mapping key as a path segment.
pub(crate) fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_string(),
        _ => "<complex key>".to_string(),
    }
}

/// Decodes `node` as a `T`, returning the keys `T` skipped.
pub(crate) fn deserialize_tracked<T: DeserializeOwned>(
    node: &Value,
) -> Result<(T, Vec<FieldPath>), serde_yaml::Error> {
    let mut ignored = Vec::new();
    let value = serde_ignored::deserialize(node, |path| {
        ignored.push(FieldPath::from_ignored(&path));
    })?;
    Ok((value, ignored))
}

/// Removes the entry at `path` from `node`. Missing entries are left alone.
pub(crate) fn remove(node: &mut Value, path: &FieldPath) {
    let Some((Segment::Key(last), parents)) = path.0.split_last() else {
        return;
    };

    let mut current = node;
    for segment in parents {
        match step(current, segment) {
            Some(next) => current = next,
            None => return,
        }
    }
    if let Value::Mapping(map) = untag(current) {
        map.remove(last.as_str());
    }
}

fn step<'v>(node: &'v mut Value, segment: &Segment) -> Option<&'v mut Value> {
    match (segment, node) {
        (Segment::Variant, Value::Tagged(tagged)) => Some(&mut tagged.value),
        (Segment::Variant, _) => None,
        (segment, Value::Tagged(tagged)) => step(&mut tagged.value, segment),
        (Segment::Key(key), Value::Mapping(map)) => map.get_mut(key.as_str()),
        (Segment::Index(index), Value::Sequence(items)) => items.get_mut(*index),
        _ => None,
    }
}

fn untag(node: &mut Value) -> &mut Value {
    match node {
        Value::Tagged(tagged) => untag(&mut tagged.value),
        other => other,
    }
}

/// Drops every mapping key that is not a string, at any depth, and returns
/// where they were.
pub(crate) fn drop_non_string_keys(node: &mut Value) -> Vec<FieldPath> {
    let mut dropped = Vec::new();
    drop_in(node, &mut Vec::new(), &mut dropped);
    dropped
}

fn drop_in(node: &mut Value, path: &mut Vec<Segment>, dropped: &mut Vec<FieldPath>) {
    match node {
        Value::Mapping(map) => {
            let entries = std::mem::take(map);
            let mut kept = Mapping::with_capacity(entries.len());
            for (key, mut value) in entries {
                if !matches!(key, Value::String(_)) {
                    let mut at = path.clone();
                    at.push(Segment::Key(key_label(&key)));
                    dropped.push(FieldPath(at));
                    continue;
                }
                path.push(Segment::Key(key_label(&key)));
                drop_in(&mut value, path, dropped);
                path.pop();
                kept.insert(key, value);
            }
            *map = kept;
        },
        Value::Sequence(items) => {
            for (idx, item) in items.iter_mut().enumerate() {
                path.push(Segment::Index(idx));
                drop_in(item, path, dropped);
                path.pop();
            }
        },
        Value::Tagged(tagged) => {
            path.push(Segment::Variant);
            drop_in(&mut tagged.value, path, dropped);
            path.pop();
        },
        _ => {},
    }
}

/// Returns `true` if any mapping under `node` has a key that is not a string.
pub(crate) fn has_non_string_keys(node: &Value) -> bool {
    match node {
        Value::Mapping(map) => map
            .iter()
            .any(|(key, value)| !matches!(key, Value::String(_)) || has_non_string_keys(value)),
        Value::Sequence(items) => items.iter().any(has_non_string_keys),
        Value::Tagged(tagged) => has_non_string_keys(&tagged.value),
        _ => false,
    }
}
