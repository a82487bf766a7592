use num::BigUint;

use crate::crypto::elgamal::Message;
use crate::crypto::group::{generator, Element, Exponent};

/// A proof transcript from the Chaum-Pedersen protocol.
///
/// The guardian service uses it in its `exp` form: a proof that a partial
/// decryption `M_i` really is `a^{s_i}` for the secret key `s_i` behind the
/// guardian's public key `K_i`.  The `zero` form (a message is an
/// encryption of zero) is the underlying primitive; `exp` is the same
/// relation with the roles of the inputs shuffled.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Proof {
    pub commitment: Message,
    pub challenge: Exponent,
    pub response: Exponent,
}

/// The result of checking proof validity.
#[derive(Debug)]
pub struct Status {
    pub challenge: bool,
    pub response: ResponseStatus,
}

/// The result of checking transcript validity.
#[derive(Debug)]
pub struct ResponseStatus {
    pub public_key: bool,
    pub ciphertext: bool,
}

impl Proof {
    /// Use this `Proof` to establish that `message` is an encryption of
    /// zero under `public_key`.
    pub fn check_zero(
        &self,
        public_key: &Element,
        message: &Message,
        gen_challenge: impl FnOnce(&Message, &Message) -> BigUint,
    ) -> Status {
        let expected = Exponent::new(gen_challenge(message, &self.commitment));
        Status {
            challenge: self.challenge == expected,
            response: self.transcript_zero(public_key, message),
        }
    }

    /// Check validity of this transcript for proving that `message` is an
    /// encryption of zero.
    pub fn transcript_zero(&self, public_key: &Element, message: &Message) -> ResponseStatus {
        let g = generator();
        let h = public_key;
        let a = &message.public_key;
        let b = &message.ciphertext;
        let alpha = &self.commitment.public_key;
        let beta = &self.commitment.ciphertext;
        let c = &self.challenge;
        let u = &self.response;

        // The verifier accepts if g^u = α ⋅ a^c and h^u = β ⋅ b^c.
        ResponseStatus {
            public_key: g.pow(u) == alpha * &a.pow(c),
            ciphertext: h.pow(u) == beta * &b.pow(c),
        }
    }

    /// Construct a proof that `message` is an encryption of zero.  This
    /// requires knowing the `one_time_secret` that was used to construct
    /// `message`.
    pub fn prove_zero(
        public_key: &Element,
        message: &Message,
        one_time_secret: &Exponent,
        one_time_exponent: &Exponent,
        gen_challenge: impl FnOnce(&Message, &Message) -> BigUint,
    ) -> Proof {
        let g = generator();
        let h = public_key;
        let r = one_time_secret;
        let t = one_time_exponent;

        // Commit to the pair (α, β) = (g^t, h^t).
        let commitment = Message {
            public_key: g.pow(t),
            ciphertext: h.pow(t),
        };
        let challenge = Exponent::new(gen_challenge(message, &commitment));

        // Respond with u = t + cr mod q.
        let response = t + &(&challenge * r);

        Proof {
            commitment,
            challenge,
            response,
        }
    }

    /// Use this `Proof` to establish that `result = base^secret_key`,
    /// where `secret_key` is the secret key corresponding to `public_key`.
    pub fn check_exp(
        &self,
        public_key: &Element,
        base: &Element,
        result: &Element,
        gen_challenge: impl FnOnce(&Message, &Message) -> BigUint,
    ) -> Status {
        // See `transcript_exp` for the reduction to the zero form.
        self.check_zero(
            base,
            &Message {
                public_key: public_key.clone(),
                ciphertext: result.clone(),
            },
            gen_challenge,
        )
    }

    /// Check validity of this transcript for proving that
    /// `result = base^secret_key`.
    pub fn transcript_exp(
        &self,
        public_key: &Element,
        base: &Element,
        result: &Element,
    ) -> ResponseStatus {
        // A proof that the pair (K_i, M_i) is an encryption of zero under
        // key `A` is exactly a proof that M_i = A^{s_i}: both amount to
        // checking g^u = a ⋅ K_i^c and A^u = b ⋅ M_i^c.
        self.transcript_zero(
            base,
            &Message {
                public_key: public_key.clone(),
                ciphertext: result.clone(),
            },
        )
    }

    /// Construct a proof that `result = base^secret_key`, where
    /// `secret_key` is the secret key corresponding to `public_key`.
    pub fn prove_exp(
        public_key: &Element,
        secret_key: &Exponent,
        base: &Element,
        result: &Element,
        one_time_exponent: &Exponent,
        gen_challenge: impl FnOnce(&Message, &Message) -> BigUint,
    ) -> Proof {
        // In the zero formulation the long-term secret key plays the role
        // of the one-time secret used to encrypt the zero message.
        Self::prove_zero(
            base,
            &Message {
                public_key: public_key.clone(),
                ciphertext: result.clone(),
            },
            secret_key,
            one_time_exponent,
            gen_challenge,
        )
    }
}

impl Status {
    pub fn is_ok(&self) -> bool {
        self.challenge && self.response.is_ok()
    }
}

impl ResponseStatus {
    pub fn is_ok(&self) -> bool {
        self.public_key && self.ciphertext
    }
}

#[cfg(test)]
mod test {
    use super::Proof;
    use crate::crypto::elgamal::Message;
    use crate::crypto::group::{gen_pow, Element, Exponent};
    use crate::crypto::hash::hash_umc;
    use num::BigUint;

    fn extended_base_hash() -> BigUint {
        31337_u32.into()
    }

    /// Encrypt a zero, construct a Chaum-Pedersen proof that it's zero, and
    /// check the proof.
    #[test]
    fn prove_check_zero() {
        let secret_key = Exponent::new(18181_u32.into());
        let public_key = gen_pow(&secret_key);
        let extended_base_hash = extended_base_hash();

        let one_time_secret = Exponent::new(2140_u32.into());
        let message = Message::encrypt(&public_key, &0_u32.into(), &one_time_secret);
        let one_time_exponent = Exponent::new(3048_u32.into());
        let proof = Proof::prove_zero(
            &public_key,
            &message,
            &one_time_secret,
            &one_time_exponent,
            |msg, comm| hash_umc(&extended_base_hash, msg, comm),
        );

        let status = proof.check_zero(&public_key, &message, |msg, comm| {
            hash_umc(&extended_base_hash, msg, comm)
        });
        dbg!(&status);
        assert!(status.is_ok());
    }

    /// Generate a key pair, raise a value to the secret key, construct a
    /// Chaum-Pedersen proof the exponentiation was done correctly, and
    /// check the proof.
    #[test]
    fn prove_check_exp() {
        let extended_base_hash = extended_base_hash();

        let secret_key = Exponent::new(22757_u32.into());
        let public_key = gen_pow(&secret_key);

        let base = Element::new(3_u32.into());
        let result = base.pow(&secret_key);
        let one_time_exponent = Exponent::new(26480_u32.into());
        let proof = Proof::prove_exp(
            &public_key,
            &secret_key,
            &base,
            &result,
            &one_time_exponent,
            |msg, comm| hash_umc(&extended_base_hash, msg, comm),
        );

        let status = proof.check_exp(&public_key, &base, &result, |msg, comm| {
            hash_umc(&extended_base_hash, msg, comm)
        });
        dbg!(&status);
        assert!(status.is_ok());
    }

    /// Generate a key pair, raise a value to some other exponent, construct
    /// an invalid Chaum-Pedersen proof claiming that the exponentiation was
    /// done correctly, and check the proof.
    #[test]
    #[should_panic]
    fn prove_check_exp_fail() {
        let extended_base_hash = extended_base_hash();

        let secret_key = Exponent::new(22757_u32.into());
        let public_key = gen_pow(&secret_key);
        let other_exponent = Exponent::new(19315_u32.into());

        let base = Element::new(3_u32.into());
        let result = base.pow(&other_exponent);
        let one_time_exponent = Exponent::new(26480_u32.into());
        let proof = Proof::prove_exp(
            &public_key,
            &secret_key,
            &base,
            &result,
            &one_time_exponent,
            |msg, comm| hash_umc(&extended_base_hash, msg, comm),
        );

        let status = proof.check_exp(&public_key, &base, &result, |msg, comm| {
            hash_umc(&extended_base_hash, msg, comm)
        });
        dbg!(&status);
        assert!(status.is_ok());
    }
}
