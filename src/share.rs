use rand::Rng;

use crate::ballot::SubmittedBallot;
use crate::codec;
use crate::context::ElectionContext;
use crate::crypto::chaum_pedersen;
use crate::crypto::group::{random_exponent, Element};
use crate::crypto::hash::hash_umc;
use crate::guardian::GuardianKeyPair;
use crate::schema::{BallotShareRecord, ContestShareRecord, SelectionShareRecord, ShareProofRecord};

/// One selection's partial decryption `M_i = a^{s_i}` together with a
/// Chaum-Pedersen proof that it was formed with the secret key behind the
/// guardian's public key.
#[derive(Debug, Clone)]
pub struct SelectionShare {
    pub object_id: String,
    pub share: Element,
    pub proof: chaum_pedersen::Proof,
}

#[derive(Debug, Clone)]
pub struct ContestShare {
    pub object_id: String,
    pub selections: Vec<SelectionShare>,
}

/// One guardian's decryption share for one ballot.  Immutable once
/// produced; this service returns it to the caller and keeps nothing.
#[derive(Debug, Clone)]
pub struct DecryptionShare {
    pub guardian_id: String,
    pub ballot_id: String,
    pub contests: Vec<ContestShare>,
}

impl DecryptionShare {
    pub fn to_wire(&self) -> BallotShareRecord {
        BallotShareRecord {
            guardian_id: self.guardian_id.clone(),
            ballot_id: self.ballot_id.clone(),
            contests: self
                .contests
                .iter()
                .map(|contest| ContestShareRecord {
                    object_id: contest.object_id.clone(),
                    selections: contest
                        .selections
                        .iter()
                        .map(|selection| SelectionShareRecord {
                            object_id: selection.object_id.clone(),
                            guardian_id: self.guardian_id.clone(),
                            share: codec::encode_mod_p(&selection.share),
                            proof: ShareProofRecord {
                                pad: codec::encode_mod_p(&selection.proof.commitment.public_key),
                                data: codec::encode_mod_p(&selection.proof.commitment.ciphertext),
                                challenge: codec::encode_mod_q(&selection.proof.challenge),
                                response: codec::encode_mod_q(&selection.proof.response),
                            },
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Compute this guardian's decryption share for a single ballot: one
/// partial decryption and proof per selection.  Each proof is verified
/// against the guardian's public key before the share is accepted; a
/// transcript that does not verify is reported as a computation failure
/// rather than returned to the caller.
pub fn compute_ballot_share(
    rng: &mut impl Rng,
    key_pair: &GuardianKeyPair,
    context: &ElectionContext,
    ballot: &SubmittedBallot,
) -> std::result::Result<DecryptionShare, String> {
    let extended_base_hash = context.crypto_extended_base_hash.as_uint();

    let contests = ballot
        .contests
        .iter()
        .map(|contest| {
            let selections = contest
                .selections
                .iter()
                .map(|selection| {
                    let message = &selection.message;
                    let share = message.partial_decrypt(key_pair.secret_key());

                    let proof = chaum_pedersen::Proof::prove_exp(
                        &key_pair.public_key,
                        key_pair.secret_key(),
                        &message.public_key,
                        &share,
                        &random_exponent(rng),
                        |msg, comm| hash_umc(extended_base_hash, msg, comm),
                    );

                    let status = proof.check_exp(
                        &key_pair.public_key,
                        &message.public_key,
                        &share,
                        |msg, comm| hash_umc(extended_base_hash, msg, comm),
                    );
                    if !status.is_ok() {
                        return Err(format!(
                            "share proof failed verification for selection `{}`",
                            selection.object_id
                        ));
                    }

                    Ok(SelectionShare {
                        object_id: selection.object_id.clone(),
                        share,
                        proof,
                    })
                })
                .collect::<std::result::Result<Vec<_>, String>>()?;

            Ok(ContestShare {
                object_id: contest.object_id.clone(),
                selections,
            })
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;

    Ok(DecryptionShare {
        guardian_id: key_pair.guardian_id.clone(),
        ballot_id: ballot.ballot_id.clone(),
        contests,
    })
}
