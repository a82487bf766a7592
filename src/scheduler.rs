use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::ballot::SubmittedBallot;
use crate::context::ElectionContext;
use crate::errors::{Error, Result};
use crate::guardian::GuardianKeyPair;
use crate::share::{self, DecryptionShare};

/// Sizing for the shared worker pool.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Worker threads in the pool.  Zero means one per available core.
    pub worker_threads: usize,

    /// How many batches may be in flight at once before new submissions
    /// are rejected with `CapacityExceeded`.  A bound is required: an
    /// unbounded queue would let concurrent large batches grow memory
    /// without limit.
    pub max_pending_batches: usize,
}

impl Default for SchedulerConfig {
    fn default() -> SchedulerConfig {
        SchedulerConfig {
            worker_threads: 0,
            max_pending_batches: 8,
        }
    }
}

/// The shared scheduler for per-ballot share computations.  Constructed
/// once at service startup and handed by reference into each request;
/// tests build their own isolated instance.  Batches from concurrent
/// requests interleave on the same pool, but each batch joins on all of
/// its own tasks before returning.
pub struct Scheduler {
    pool: rayon::ThreadPool,
    pending: AtomicUsize,
    max_pending: usize,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Result<Scheduler> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build()
            .map_err(|err| Error::WorkerPool(err.to_string()))?;

        Ok(Scheduler {
            pool,
            pending: AtomicUsize::new(0),
            max_pending: config.max_pending_batches,
        })
    }

    /// Compute one decryption share per ballot, fanning the ballots out
    /// across the pool and assembling the results strictly by input
    /// index: `output[i]` is the share for `ballots[i]` no matter which
    /// task finished first.  Any single failure aborts the whole batch;
    /// a short response is never returned.
    pub fn compute_batch(
        &self,
        key_pair: &GuardianKeyPair,
        context: &ElectionContext,
        ballots: &[SubmittedBallot],
    ) -> Result<Vec<DecryptionShare>> {
        let _permit = self.admit()?;

        debug!(
            guardian_id = %key_pair.guardian_id,
            ballots = ballots.len(),
            "computing decryption shares"
        );

        let shares = self.pool.install(|| {
            ballots
                .par_iter()
                .enumerate()
                .map(|(index, ballot)| {
                    let mut rng = rand::thread_rng();
                    share::compute_ballot_share(&mut rng, key_pair, context, ballot).map_err(
                        |cause| Error::ShareComputation {
                            index,
                            ballot_id: ballot.ballot_id.clone(),
                            cause,
                        },
                    )
                })
                .collect::<Result<Vec<_>>>()
        });

        match &shares {
            Ok(shares) => debug!(
                guardian_id = %key_pair.guardian_id,
                shares = shares.len(),
                "batch complete"
            ),
            Err(err) => warn!(guardian_id = %key_pair.guardian_id, %err, "batch aborted"),
        }

        shares
    }

    fn admit(&self) -> Result<BatchPermit<'_>> {
        self.pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pending| {
                (pending < self.max_pending).then(|| pending + 1)
            })
            .map_err(|pending| Error::CapacityExceeded {
                pending,
                limit: self.max_pending,
            })?;

        Ok(BatchPermit(&self.pending))
    }
}

/// Releases the batch's slot when the computation ends, normally or not.
struct BatchPermit<'a>(&'a AtomicUsize);

impl Drop for BatchPermit<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
