use thiserror::Error;

/// Everything that can go wrong between receiving a wire request and
/// returning a batch of decryption shares.  Messages never contain secret
/// key material; offending values are echoed back only for public fields.
#[derive(Debug, Error)]
pub enum Error {
    /// A numeric field failed to parse, or parsed to a value outside the
    /// group or field it belongs to.
    #[error("field `{field}`: {value:?} is not a valid element of the group")]
    MalformedElement { field: String, value: String },

    /// The quorum/guardian-count relation does not hold.
    #[error(
        "invalid election context: quorum {quorum} must satisfy \
         1 <= quorum <= {number_of_guardians}"
    )]
    InvalidContext {
        number_of_guardians: u32,
        quorum: u32,
    },

    /// Context derivation was given both a manifest and a manifest hash,
    /// or neither.
    #[error("exactly one of manifest or manifest hash must be supplied")]
    AmbiguousManifestInput,

    /// The supplied public key is not `g^secret mod p` for the supplied
    /// secret exponent.
    #[error("guardian `{guardian_id}`: public key does not match the secret exponent")]
    InconsistentKeyPair { guardian_id: String },

    /// A guardian record failed structural validation before any key
    /// consistency check was attempted.
    #[error("malformed guardian record: {reason}")]
    MalformedGuardian { reason: String },

    /// One ballot in the batch failed structural validation.  The whole
    /// batch is rejected; no shares are returned.
    #[error("ballot {index} (`{ballot_id}`) is malformed: {reason}")]
    MalformedBallot {
        index: usize,
        ballot_id: String,
        reason: String,
    },

    /// The share computation for one ballot failed after validation.  The
    /// whole batch is rejected; no shares are returned.
    #[error("share computation failed for ballot {index} (`{ballot_id}`): {cause}")]
    ShareComputation {
        index: usize,
        ballot_id: String,
        cause: String,
    },

    /// The scheduler is already running its configured maximum of
    /// concurrent batches.  Callers may retry with backoff.
    #[error("scheduler at capacity: {pending} of {limit} batches in flight")]
    CapacityExceeded { pending: usize, limit: usize },

    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, Error>;
