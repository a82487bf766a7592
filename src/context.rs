use num::BigUint;

use crate::codec;
use crate::crypto::group::{generator, prime, Element, Exponent};
use crate::crypto::hash::{hash_to_exponent, hash_uints};
use crate::errors::{Error, Result};
use crate::manifest::Manifest;
use crate::schema::ElectionContextRecord;

/// The public cryptographic context of one election.  Built once per
/// request from trusted wire values, or derived from a manifest and key
/// material; immutable either way.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ElectionContext {
    pub number_of_guardians: u32,
    pub quorum: u32,
    pub elgamal_public_key: Element,
    pub commitment_hash: Exponent,
    pub manifest_hash: Exponent,
    pub crypto_base_hash: Exponent,
    pub crypto_extended_base_hash: Exponent,
}

impl ElectionContext {
    /// Decode a context from a trusted wire record.  Every numeric field
    /// must be in range; the hashes are carried as-is, not recomputed.
    pub fn from_wire(record: &ElectionContextRecord) -> Result<ElectionContext> {
        check_quorum(record.number_of_guardians, record.quorum)?;

        Ok(ElectionContext {
            number_of_guardians: record.number_of_guardians,
            quorum: record.quorum,
            elgamal_public_key: codec::decode_mod_p(
                "context.elgamal_public_key",
                &record.elgamal_public_key,
            )?,
            commitment_hash: codec::decode_mod_q(
                "context.commitment_hash",
                &record.commitment_hash,
            )?,
            manifest_hash: codec::decode_mod_q("context.manifest_hash", &record.manifest_hash)?,
            crypto_base_hash: codec::decode_mod_q(
                "context.crypto_base_hash",
                &record.crypto_base_hash,
            )?,
            crypto_extended_base_hash: codec::decode_mod_q(
                "context.crypto_extended_base_hash",
                &record.crypto_extended_base_hash,
            )?,
        })
    }

    /// Build a context from its inputs, computing the manifest hash (when
    /// a manifest is given), the base hash and the extended base hash.
    /// Exactly one of `manifest` and `manifest_hash` must be supplied.
    /// The derivation is a pure function of its arguments: identical
    /// inputs produce identical contexts.
    pub fn derive(
        elgamal_public_key: Element,
        commitment_hash: Exponent,
        number_of_guardians: u32,
        quorum: u32,
        manifest: Option<&Manifest>,
        manifest_hash: Option<Exponent>,
    ) -> Result<ElectionContext> {
        check_quorum(number_of_guardians, quorum)?;

        let manifest_hash = match (manifest, manifest_hash) {
            (Some(manifest), None) => manifest.crypto_hash(),
            (None, Some(hash)) => hash,
            _ => return Err(Error::AmbiguousManifestInput),
        };

        let crypto_base_hash = compute_base_hash(number_of_guardians, quorum, &manifest_hash);
        let crypto_extended_base_hash =
            compute_extended_base_hash(&crypto_base_hash, &commitment_hash);

        Ok(ElectionContext {
            number_of_guardians,
            quorum,
            elgamal_public_key,
            commitment_hash,
            manifest_hash,
            crypto_base_hash,
            crypto_extended_base_hash,
        })
    }

    /// Re-encode this context to its wire form.
    pub fn to_wire(&self) -> ElectionContextRecord {
        ElectionContextRecord {
            number_of_guardians: self.number_of_guardians,
            quorum: self.quorum,
            elgamal_public_key: codec::encode_mod_p(&self.elgamal_public_key),
            commitment_hash: codec::encode_mod_q(&self.commitment_hash),
            manifest_hash: codec::encode_mod_q(&self.manifest_hash),
            crypto_base_hash: codec::encode_mod_q(&self.crypto_base_hash),
            crypto_extended_base_hash: codec::encode_mod_q(&self.crypto_extended_base_hash),
        }
    }
}

fn check_quorum(number_of_guardians: u32, quorum: u32) -> Result<()> {
    if quorum >= 1 && quorum <= number_of_guardians {
        Ok(())
    } else {
        Err(Error::InvalidContext {
            number_of_guardians,
            quorum,
        })
    }
}

/// The base hash `Q = H(p, g, n, k, manifest_hash)`.
fn compute_base_hash(number_of_guardians: u32, quorum: u32, manifest_hash: &Exponent) -> Exponent {
    hash_to_exponent(hash_uints(&[
        prime(),
        generator().as_uint(),
        &BigUint::from(number_of_guardians),
        &BigUint::from(quorum),
        manifest_hash.as_uint(),
    ]))
}

/// The extended base hash `Q̅ = H(Q, commitment_hash)`.
fn compute_extended_base_hash(base_hash: &Exponent, commitment_hash: &Exponent) -> Exponent {
    hash_to_exponent(hash_uints(&[base_hash.as_uint(), commitment_hash.as_uint()]))
}
