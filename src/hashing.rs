//! Manifest Hashing - Canonical JSON + SHA-256
//!
//! Backs the idempotence guarantee: two passes over an unmodified card tree
//! must yield byte-identical canonical manifests and therefore equal hashes.
//! Nothing time-based or random ever enters a manifest.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 of raw bytes as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Canonical JSON: object keys sorted recursively, no whitespace. Array
/// order is preserved (it is meaningful - traversal order).
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::to_value(value)?;
    serde_json::to_string(&sort_keys(&value))
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        _ => value.clone(),
    }
}

/// Hash of a manifest's canonical JSON form.
pub fn compute_manifest_hash<T: Serialize>(manifest: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(manifest)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_keys_recursively() {
        let obj = json!({"z": 1, "a": {"m": 2, "b": 3}});
        assert_eq!(canonical_json(&obj).unwrap(), r#"{"a":{"b":3,"m":2},"z":1}"#);
    }

    #[test]
    fn canonical_json_keeps_array_order() {
        let obj = json!({"paths": ["b.json", "a.json"]});
        assert_eq!(canonical_json(&obj).unwrap(), r#"{"paths":["b.json","a.json"]}"#);
    }

    #[test]
    fn hash_is_stable() {
        let manifest = json!({"files": {"data/foo/item/bar.json": "x"}});
        assert_eq!(
            compute_manifest_hash(&manifest).unwrap(),
            compute_manifest_hash(&manifest).unwrap()
        );
    }

    #[test]
    fn key_order_does_not_affect_hash() {
        let a = json!({"tags": {}, "files": {}});
        let b = json!({"files": {}, "tags": {}});
        assert_eq!(
            compute_manifest_hash(&a).unwrap(),
            compute_manifest_hash(&b).unwrap()
        );
    }
}
