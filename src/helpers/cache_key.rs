//! Deterministic fingerprints for cached queries.

use std::collections::BTreeMap;
use serde_json::Value;
use sha2::{Digest, Sha256};
use crate::config::constants::CACHE_KEY_HEX_LEN;

/// Derives a short cache key from an identifier and a set of named parameters.
///
/// Parameters are collected into a sorted map before hashing, so the order in
/// which they are supplied does not matter. Nested JSON objects are sorted by
/// `serde_json` itself.
pub fn generate_cache_key<K, I>(identifier: &str, params: I) -> String
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    let params: BTreeMap<String, Value> = params
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect();

    // (identifier, params) as a JSON array keeps a parameter named like the
    // identifier slot from colliding with it.
    let canonical = serde_json::json!([identifier, params]).to_string();

    let hash = Sha256::digest(canonical.as_bytes());
    let mut key = hex::encode(hash);
    key.truncate(CACHE_KEY_HEX_LEN);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_key_shape() {
        let key = generate_cache_key("octo/repo", [("state", json!("open"))]);
        assert_eq!(key.len(), 16);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_order_insensitive() {
        let a = generate_cache_key(
            "octo/repo",
            vec![("state", json!("open")), ("labels", json!(["bug"])), ("max", json!(30))],
        );
        let b = generate_cache_key(
            "octo/repo",
            vec![("max", json!(30)), ("state", json!("open")), ("labels", json!(["bug"]))],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_sensitive_to_every_value() {
        let base = generate_cache_key("octo/repo", [("state", json!("open")), ("max", json!(30))]);

        assert_ne!(base, generate_cache_key("octo/repo", [("state", json!("closed")), ("max", json!(30))]));
        assert_ne!(base, generate_cache_key("octo/repo", [("state", json!("open")), ("max", json!(31))]));
        assert_ne!(base, generate_cache_key("octo/other", [("state", json!("open")), ("max", json!(30))]));
        assert_ne!(base, generate_cache_key("octo/repo", [("state", json!("open"))]));
    }

    #[test]
    fn test_no_params() {
        let empty: Vec<(String, Value)> = vec![];
        assert_eq!(generate_cache_key("octo/repo", empty.clone()), generate_cache_key("octo/repo", empty));
    }

    proptest! {
        #[test]
        fn prop_permutation_yields_same_key(
            identifier in "[a-z]{1,8}/[a-z]{1,8}",
            params in proptest::collection::btree_map("[a-z_]{1,10}", any::<i64>(), 0..8),
        ) {
            let forward: Vec<(String, Value)> = params.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
            let mut reversed = forward.clone();
            reversed.reverse();

            prop_assert_eq!(
                generate_cache_key(&identifier, forward),
                generate_cache_key(&identifier, reversed)
            );
        }

        #[test]
        fn prop_changed_value_changes_key(
            identifier in "[a-z]{1,8}/[a-z]{1,8}",
            name in "[a-z_]{1,10}",
            value in any::<i64>(),
        ) {
            let other = value.wrapping_add(1);
            prop_assert_ne!(
                generate_cache_key(&identifier, [(name.clone(), json!(value))]),
                generate_cache_key(&identifier, [(name, json!(other))])
            );
        }
    }
}
