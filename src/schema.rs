//! Wire records for the guardian service.  Every numeric group value
//! crosses the boundary as a canonical base-10 string; decoding into the
//! typed crypto layer happens in `codec`, `context`, `guardian` and
//! `ballot`, never here.  Unknown fields are rejected so that a
//! wrong-shaped payload fails deterministically at deserialization.

use serde::{Deserialize, Serialize};

/// The public parameters of an election: keys, hashes, guardian count and
/// quorum.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElectionContextRecord {
    /// The number of guardians `n` that hold key shares.
    pub number_of_guardians: u32,

    /// The quorum `k` of guardians necessary to decrypt.  Must satisfy
    /// `1 <= k <= n`.
    pub quorum: u32,

    /// The joint public key `K`.
    pub elgamal_public_key: String,

    /// The hash of the public commitments the guardians made to each
    /// other during the key ceremony.
    pub commitment_hash: String,

    /// The hash of the election manifest.
    pub manifest_hash: String,

    /// The base hash `Q`.
    pub crypto_base_hash: String,

    /// The extended base hash `Q̅`.
    pub crypto_extended_base_hash: String,
}

/// One guardian's ElGamal key pair as it appears on the wire.  The secret
/// key is present because the caller is the guardian itself; it never
/// appears in any response.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElGamalKeyPairRecord {
    pub secret_key: String,
    pub public_key: String,
}

/// The secret polynomial backing a guardian's key share, one coefficient
/// per quorum position.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElectionPolynomialRecord {
    pub coefficients: Vec<String>,
}

/// A guardian's key material for one election.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElectionKeyPairRecord {
    /// The id of the guardian that owns this key pair.
    pub owner_id: String,

    /// The guardian's 1-indexed position among the guardians; also the
    /// evaluation point of the other guardians' polynomials for its
    /// backup shares.
    pub sequence_order: u32,

    pub key_pair: ElGamalKeyPairRecord,

    pub polynomial: ElectionPolynomialRecord,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardianRecord {
    pub election_key_pair: ElectionKeyPairRecord,
}

/// An ElGamal ciphertext `(pad, data) = (g^r, g^m h^r)`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElGamalCiphertextRecord {
    pub pad: String,
    pub data: String,
}

/// One encrypted selection of a submitted ballot.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionRecord {
    pub object_id: String,
    pub ciphertext: ElGamalCiphertextRecord,
}

/// One contest of a submitted ballot.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContestRecord {
    pub object_id: String,
    pub ballot_selections: Vec<SelectionRecord>,
}

/// An encrypted ballot as sealed by the upstream encryption service.
/// This layer validates its numeric fields and otherwise passes it
/// through opaque.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmittedBallotRecord {
    pub object_id: String,
    pub style_id: String,
    pub contests: Vec<ContestRecord>,
}

/// A request for this guardian's decryption share of one or more ballots.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecryptBallotSharesRequest {
    pub guardian: GuardianRecord,
    pub context: ElectionContextRecord,
    pub encrypted_ballots: Vec<SubmittedBallotRecord>,
}

/// The commitment and response of a Chaum-Pedersen exponentiation proof.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShareProofRecord {
    pub pad: String,
    pub data: String,
    pub challenge: String,
    pub response: String,
}

/// One selection's partial decryption `M_i` with its proof.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionShareRecord {
    pub object_id: String,
    pub guardian_id: String,
    pub share: String,
    pub proof: ShareProofRecord,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContestShareRecord {
    pub object_id: String,
    pub selections: Vec<SelectionShareRecord>,
}

/// This guardian's decryption share for one ballot.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BallotShareRecord {
    pub guardian_id: String,
    pub ballot_id: String,
    pub contests: Vec<ContestShareRecord>,
}

/// The response to `DecryptBallotSharesRequest`: exactly one share per
/// submitted ballot, in submission order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecryptBallotSharesResponse {
    pub shares: Vec<BallotShareRecord>,
}

/// A request to build an election context from public key material and a
/// manifest (or its precomputed hash).  Exactly one of `manifest` and
/// `manifest_hash` must be present.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MakeElectionContextRequest {
    pub elgamal_public_key: String,
    pub commitment_hash: String,
    pub number_of_guardians: u32,
    pub quorum: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<serde_json::Value>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MakeElectionContextResponse {
    pub context: ElectionContextRecord,
}
