use num::BigUint;
use sha2::{Digest, Sha256};

use crate::crypto::elgamal::Message;
use crate::crypto::group::Exponent;

/// Hash a sequence of big integers by chaining their big-endian byte
/// encodings through SHA-256.
pub fn hash_uints(xs: &[&BigUint]) -> BigUint {
    let digest = xs
        .iter()
        .map(|x| x.to_bytes_be())
        .fold(Sha256::new(), |h, bytes| h.chain_update(bytes))
        .finalize();

    BigUint::from_bytes_be(digest.as_slice())
}

/// The challenge `c = H(Q̅, A, B, a, b)` for a Chaum-Pedersen proof about
/// `message = (A, B)` with commitment `(a, b)`.
pub fn hash_umc(extended_base_hash: &BigUint, message: &Message, commitment: &Message) -> BigUint {
    hash_uints(&[
        extended_base_hash,
        message.public_key.as_uint(),
        message.ciphertext.as_uint(),
        commitment.public_key.as_uint(),
        commitment.ciphertext.as_uint(),
    ])
}

/// Reduce a raw hash output into the exponent field.
pub fn hash_to_exponent(hash: BigUint) -> Exponent {
    Exponent::new(hash)
}
