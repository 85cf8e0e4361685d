//! Attribute records attached to nodes, edges and the graph itself.

use crate::FxIndexMap;
use crate::error::{GraphError, Result};
use serde_json::Value;

/// An open, insertion-ordered bag of named values.
pub type Attrs = FxIndexMap<String, Value>;

/// Builds an [`Attrs`] record from `(name, value)` pairs.
pub fn attrs<K, V, I>(entries: I) -> Attrs
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Converts a JSON object into an attribute record.
///
/// Anything other than an object is rejected; `null` is accepted as an empty record.
pub fn attrs_from_json(value: Value) -> Result<Attrs> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(Attrs::default()),
        other => Err(GraphError::invalid(format!(
            "attributes must be a JSON object, got {other}"
        ))),
    }
}

pub fn attrs_to_json(attrs: &Attrs) -> Value {
    Value::Object(
        attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    )
}

/// Update-not-replace: incoming entries overwrite same-named entries, others are kept.
pub(crate) fn merge_into(target: &mut Attrs, incoming: Attrs) {
    for (k, v) in incoming {
        target.insert(k, v);
    }
}

/// Layers per-item attributes over a shared base; the item wins on conflicts.
pub(crate) fn layered(common: &Attrs, own: Attrs) -> Attrs {
    if common.is_empty() {
        return own;
    }
    let mut out = common.clone();
    merge_into(&mut out, own);
    out
}

/// Numeric weight stored under `key`; missing or non-numeric values weigh 1.
pub(crate) fn weight_of(attrs: &Attrs, key: &str) -> f64 {
    attrs.get(key).and_then(Value::as_f64).unwrap_or(1.0)
}
