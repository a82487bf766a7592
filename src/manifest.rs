use num::BigUint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::crypto::group::Exponent;
use crate::crypto::hash::hash_to_exponent;

/// An election manifest, carried as an opaque JSON document.  This layer
/// does not interpret its contents; it only needs a canonical content
/// hash to bind the manifest into the election context.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(pub serde_json::Value);

impl Manifest {
    /// The canonical hash of the manifest: SHA-256 over the compact JSON
    /// encoding with object keys in sorted order, reduced into the
    /// exponent field.  `serde_json::Value` keeps object keys sorted, so
    /// two manifests that differ only in key order hash identically.
    pub fn crypto_hash(&self) -> Exponent {
        let canonical =
            serde_json::to_vec(&self.0).expect("JSON value serialization cannot fail");
        let digest = Sha256::digest(&canonical);
        hash_to_exponent(BigUint::from_bytes_be(&digest))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_is_deterministic() {
        let manifest = Manifest(json!({"name": "Midterm", "contests": [1, 2, 3]}));
        assert_eq!(manifest.crypto_hash(), manifest.crypto_hash());
    }

    #[test]
    fn hash_ignores_key_order() {
        let a: Manifest = serde_json::from_str(r#"{"name": "X", "contests": []}"#).unwrap();
        let b: Manifest = serde_json::from_str(r#"{"contests": [], "name": "X"}"#).unwrap();
        assert_eq!(a.crypto_hash(), b.crypto_hash());
    }

    #[test]
    fn hash_distinguishes_content() {
        let a = Manifest(json!({"name": "X"}));
        let b = Manifest(json!({"name": "Y"}));
        assert_ne!(a.crypto_hash(), b.crypto_hash());
    }
}
