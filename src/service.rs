//! Request handlers.  Each handler is a pure function of its request (plus
//! the shared scheduler); all state lives in the request and dies with it.

use tracing::info;

use crate::ballot;
use crate::codec;
use crate::context::ElectionContext;
use crate::errors::Result;
use crate::guardian::GuardianKeyPair;
use crate::manifest::Manifest;
use crate::scheduler::Scheduler;
use crate::schema::{
    DecryptBallotSharesRequest, DecryptBallotSharesResponse, MakeElectionContextRequest,
    MakeElectionContextResponse,
};

/// Compute this guardian's decryption shares for a batch of encrypted
/// ballots.  The response carries one share per submitted ballot, in
/// submission order; any invalid input or failed computation rejects the
/// whole request.
pub fn decrypt_ballot_shares(
    scheduler: &Scheduler,
    request: &DecryptBallotSharesRequest,
) -> Result<DecryptBallotSharesResponse> {
    let context = ElectionContext::from_wire(&request.context)?;
    let key_pair =
        GuardianKeyPair::reconstruct(&request.guardian.election_key_pair, Some(&context))?;
    let ballots = ballot::load_batch(&request.encrypted_ballots)?;

    info!(
        guardian_id = %key_pair.guardian_id,
        ballots = ballots.len(),
        "decrypt ballot shares"
    );

    let shares = scheduler.compute_batch(&key_pair, &context, &ballots)?;

    Ok(DecryptBallotSharesResponse {
        shares: shares.iter().map(|share| share.to_wire()).collect(),
    })
}

/// Build an election context from key material and either a manifest or a
/// precomputed manifest hash.  Deterministic: the same request always
/// yields the same context.
pub fn make_election_context(
    request: &MakeElectionContextRequest,
) -> Result<MakeElectionContextResponse> {
    let elgamal_public_key =
        codec::decode_mod_p("request.elgamal_public_key", &request.elgamal_public_key)?;
    let commitment_hash = codec::decode_mod_q("request.commitment_hash", &request.commitment_hash)?;

    let manifest = request.manifest.clone().map(Manifest);
    let manifest_hash = request
        .manifest_hash
        .as_deref()
        .map(|raw| codec::decode_mod_q("request.manifest_hash", raw))
        .transpose()?;

    let context = ElectionContext::derive(
        elgamal_public_key,
        commitment_hash,
        request.number_of_guardians,
        request.quorum,
        manifest.as_ref(),
        manifest_hash,
    )?;

    Ok(MakeElectionContextResponse {
        context: context.to_wire(),
    })
}
