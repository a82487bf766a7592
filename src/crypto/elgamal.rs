use num::BigUint;

use crate::crypto::group::{generator, Element, Exponent};

/// A message that has been encrypted using exponential ElGamal.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Message {
    /// The pad `a = g^r`, where `r` is the randomly generated one-time
    /// secret.
    pub public_key: Element,

    /// The encoding `b = g^m h^r`, where `m` is the cleartext and `h` is
    /// the recipient public key being used for encryption.
    pub ciphertext: Element,
}

impl Message {
    /// Encrypt `m` under `public_key`, using `one_time_secret` as the
    /// randomness `r`.
    pub fn encrypt(public_key: &Element, m: &BigUint, one_time_secret: &Exponent) -> Message {
        let g = generator();
        let h = public_key;
        let r = one_time_secret;

        // Exponential ElGamal: the message is encoded in the exponent of g.
        Message {
            public_key: g.pow(r),
            ciphertext: &g.pow_uint(m) * &h.pow(r),
        }
    }

    /// One guardian's partial decryption `M_i = a^{s_i}` of this message,
    /// where `s_i` is that guardian's secret exponent.  Combining a quorum
    /// of partials recovers `h^r`, which cancels the pad out of `b`.
    pub fn partial_decrypt(&self, secret_key: &Exponent) -> Element {
        self.public_key.pow(secret_key)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::crypto::group::gen_pow;

    /// With a single key holder, the partial decryption is the full pad:
    /// `b / a^s = g^m`.
    #[test]
    fn partial_decrypt_cancels_pad() {
        let secret_key: Exponent = Exponent::new(22757_u32.into());
        let public_key = gen_pow(&secret_key);

        let m = BigUint::from(3_u32);
        let message = Message::encrypt(&public_key, &m, &Exponent::new(41235_u32.into()));

        let share = message.partial_decrypt(&secret_key);
        assert_eq!(
            message.ciphertext,
            &share * &generator().pow_uint(&m),
            "share times g^m should reassemble the ciphertext"
        );
    }
}
