use std::fmt;

use crate::codec;
use crate::context::ElectionContext;
use crate::crypto::group::{gen_pow, Element, Exponent};
use crate::errors::{Error, Result};
use crate::schema::ElectionKeyPairRecord;

/// A guardian's secret exponent.  Wrapped so that it cannot leak through
/// `Debug` output or serialization, and so the value is cleared when the
/// request that carried it ends.
pub struct SecretExponent(Exponent);

impl SecretExponent {
    pub fn new(exponent: Exponent) -> SecretExponent {
        SecretExponent(exponent)
    }

    pub fn expose(&self) -> &Exponent {
        &self.0
    }
}

impl fmt::Debug for SecretExponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretExponent(<redacted>)")
    }
}

impl Drop for SecretExponent {
    fn drop(&mut self) {
        self.0 = Exponent::zero();
    }
}

/// The secret polynomial backing a guardian's key share.  Like the secret
/// exponent, the coefficients are redacted from `Debug` and cleared on
/// drop.
pub struct SecretPolynomial(Vec<Exponent>);

impl SecretPolynomial {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn coefficients(&self) -> &[Exponent] {
        &self.0
    }
}

impl fmt::Debug for SecretPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretPolynomial(<{} coefficients redacted>)", self.0.len())
    }
}

impl Drop for SecretPolynomial {
    fn drop(&mut self) {
        for coefficient in &mut self.0 {
            *coefficient = Exponent::zero();
        }
    }
}

/// One guardian's key material for an election, reconstructed from the
/// wire for the duration of a single request.  Never persisted.
#[derive(Debug)]
pub struct GuardianKeyPair {
    pub guardian_id: String,
    pub sequence_order: u32,
    secret_key: SecretExponent,
    pub public_key: Element,
    pub polynomial: SecretPolynomial,
}

impl GuardianKeyPair {
    /// Rebuild the key pair from its wire record, validating structure
    /// and the key consistency relation `public_key = g^secret mod p`.
    /// A mismatched pair would produce shares that no verifier accepts,
    /// so the mismatch is a hard error here.  When a context is supplied,
    /// the polynomial length is cross-checked against its quorum.
    pub fn reconstruct(
        record: &ElectionKeyPairRecord,
        context: Option<&ElectionContext>,
    ) -> Result<GuardianKeyPair> {
        if record.owner_id.is_empty() {
            return Err(Error::MalformedGuardian {
                reason: "owner_id must not be empty".to_owned(),
            });
        }
        if record.sequence_order < 1 {
            return Err(Error::MalformedGuardian {
                reason: format!(
                    "sequence_order must be 1-indexed, got {}",
                    record.sequence_order
                ),
            });
        }

        let secret_key = codec::decode_mod_q(
            "guardian.key_pair.secret_key",
            &record.key_pair.secret_key,
        )?;
        let public_key = codec::decode_mod_p(
            "guardian.key_pair.public_key",
            &record.key_pair.public_key,
        )?;

        let coefficients = record
            .polynomial
            .coefficients
            .iter()
            .map(|raw| codec::decode_mod_q("guardian.polynomial.coefficients", raw))
            .collect::<Result<Vec<_>>>()?;

        if let Some(context) = context {
            if coefficients.len() != context.quorum as usize {
                return Err(Error::MalformedGuardian {
                    reason: format!(
                        "polynomial has {} coefficients, quorum is {}",
                        coefficients.len(),
                        context.quorum
                    ),
                });
            }
        }

        if gen_pow(&secret_key) != public_key {
            return Err(Error::InconsistentKeyPair {
                guardian_id: record.owner_id.clone(),
            });
        }

        Ok(GuardianKeyPair {
            guardian_id: record.owner_id.clone(),
            sequence_order: record.sequence_order,
            secret_key: SecretExponent::new(secret_key),
            public_key,
            polynomial: SecretPolynomial(coefficients),
        })
    }

    pub fn secret_key(&self) -> &Exponent {
        self.secret_key.expose()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::ElectionContext;
    use crate::crypto::group::gen_pow;
    use crate::schema::{ElGamalKeyPairRecord, ElectionPolynomialRecord};

    fn wire_key_pair() -> ElectionKeyPairRecord {
        let secret_key = Exponent::new(22757_u32.into());
        let public_key = gen_pow(&secret_key);
        ElectionKeyPairRecord {
            owner_id: "guardian-1".to_owned(),
            sequence_order: 1,
            key_pair: ElGamalKeyPairRecord {
                secret_key: "22757".to_owned(),
                public_key: public_key.as_uint().to_str_radix(10),
            },
            polynomial: ElectionPolynomialRecord {
                coefficients: vec!["22757".to_owned(), "4242".to_owned()],
            },
        }
    }

    fn context(quorum: u32) -> ElectionContext {
        ElectionContext::from_wire(&crate::schema::ElectionContextRecord {
            number_of_guardians: 3,
            quorum,
            elgamal_public_key: "1033".to_owned(),
            commitment_hash: "77777".to_owned(),
            manifest_hash: "12345".to_owned(),
            crypto_base_hash: "23456".to_owned(),
            crypto_extended_base_hash: "34567".to_owned(),
        })
        .unwrap()
    }

    #[test]
    fn reconstruct_valid_key_pair() {
        let key_pair = GuardianKeyPair::reconstruct(&wire_key_pair(), Some(&context(2))).unwrap();
        assert_eq!(key_pair.guardian_id, "guardian-1");
        assert_eq!(key_pair.sequence_order, 1);
        assert_eq!(key_pair.polynomial.len(), 2);
        assert_eq!(gen_pow(key_pair.secret_key()), key_pair.public_key);
    }

    #[test]
    fn reconstruct_rejects_mismatched_public_key() {
        let mut record = wire_key_pair();
        record.key_pair.public_key = gen_pow(&Exponent::new(99_u32.into()))
            .as_uint()
            .to_str_radix(10);
        assert!(matches!(
            GuardianKeyPair::reconstruct(&record, None),
            Err(Error::InconsistentKeyPair { guardian_id }) if guardian_id == "guardian-1"
        ));
    }

    #[test]
    fn reconstruct_rejects_empty_owner_and_zero_sequence() {
        let mut record = wire_key_pair();
        record.owner_id = String::new();
        assert!(matches!(
            GuardianKeyPair::reconstruct(&record, None),
            Err(Error::MalformedGuardian { .. })
        ));

        let mut record = wire_key_pair();
        record.sequence_order = 0;
        assert!(matches!(
            GuardianKeyPair::reconstruct(&record, None),
            Err(Error::MalformedGuardian { .. })
        ));
    }

    #[test]
    fn reconstruct_cross_checks_polynomial_length() {
        let record = wire_key_pair();
        assert!(GuardianKeyPair::reconstruct(&record, Some(&context(2))).is_ok());
        assert!(matches!(
            GuardianKeyPair::reconstruct(&record, Some(&context(3))),
            Err(Error::MalformedGuardian { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let key_pair = GuardianKeyPair::reconstruct(&wire_key_pair(), None).unwrap();
        let debug = format!("{:?}", key_pair);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("22757"), "secret leaked: {debug}");
        assert!(!debug.contains("4242"), "coefficient leaked: {debug}");
    }
}
