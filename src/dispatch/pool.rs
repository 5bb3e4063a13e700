//! Active job pool
//!
//! Admission control and completion detection for outstanding load jobs.
//! The job service exposes no blocking-queue primitive, so the pool bounds
//! concurrency itself: `admit` refuses to grow past the capacity until a
//! drain sweep has resolved at least one in-flight attempt, and `drain_all`
//! repeats sweeps until nothing is outstanding.
//!
//! A sweep visits every in-flight attempt, not just the oldest: completion
//! order is independent of submission order.

use crate::cluster::{JobConnector, JobStatus, LoadSpec};
use crate::dispatch::attempt::{CountingRetry, JobAttempt};
use crate::error::Result;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Default pause between sweep passes that made no progress
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Capacity-bounded set of in-flight job attempts
pub struct ActiveJobPool {
    in_flight: Vec<JobAttempt>,
    capacity: usize,
    retries: u32,
    poll_interval: Duration,
    completed: u64,
    abandoned: u64,
}

impl ActiveJobPool {
    /// Create a pool with the given concurrency ceiling and per-attempt
    /// submission budget
    pub fn new(capacity: usize, retries: u32) -> Self {
        Self {
            in_flight: Vec::new(),
            capacity,
            retries,
            poll_interval: DEFAULT_POLL_INTERVAL,
            completed: 0,
            abandoned: 0,
        }
    }

    /// Override the pause between no-progress sweep passes.
    /// `Duration::ZERO` disables the pause.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Admit one load job, blocking until a slot is free.
    ///
    /// Opens a fresh session for the attempt and submits immediately.
    /// Failure to open the session is structural and propagates; a failed
    /// submission is absorbed into the attempt's retry accounting.
    pub fn admit(&mut self, connector: &dyn JobConnector, spec: LoadSpec) -> Result<()> {
        if self.in_flight.len() >= self.capacity {
            self.wait_for_slot()?;
        }

        let client = connector.connect()?;
        let mut attempt = JobAttempt::new(spec, CountingRetry::new(self.retries), client);
        attempt.submit();
        self.in_flight.push(attempt);
        Ok(())
    }

    /// Sweep until at least one attempt has been resolved.
    ///
    /// Blocks the caller; pauses between passes that removed nothing so the
    /// status polling does not hammer the service. Never returns without
    /// having removed an attempt, which is what bounds `admit` to the
    /// capacity. There is no deadline: a job stuck in Running forever blocks
    /// here forever.
    fn wait_for_slot(&mut self) -> Result<()> {
        debug_assert!(!self.in_flight.is_empty());
        loop {
            if self.sweep()? > 0 {
                return Ok(());
            }
            if !self.poll_interval.is_zero() {
                thread::sleep(self.poll_interval);
            }
        }
    }

    /// One full pass over the in-flight attempts, returning how many were
    /// resolved.
    ///
    /// The collection is taken and survivors re-inserted, so removal never
    /// happens mid-iteration. Completed and canceled attempts are released;
    /// failed ones are resubmitted until their budget runs out, then
    /// released and counted as abandoned.
    fn sweep(&mut self) -> Result<usize> {
        let mut removed = 0;
        let pending = std::mem::take(&mut self.in_flight);

        for mut attempt in pending {
            match attempt.check()? {
                JobStatus::Created | JobStatus::Running => {
                    self.in_flight.push(attempt);
                }
                JobStatus::Completed | JobStatus::Canceled => {
                    debug!("load job for {} finished", attempt.path());
                    attempt.finish()?;
                    self.completed += 1;
                    removed += 1;
                }
                JobStatus::Failed => {
                    if attempt.submit() {
                        self.in_flight.push(attempt);
                    } else {
                        info!("abandoning load of {}", attempt.path());
                        attempt.finish()?;
                        self.abandoned += 1;
                        removed += 1;
                    }
                }
            }
        }

        Ok(removed)
    }

    /// Drive every outstanding attempt to a terminal state
    pub fn drain_all(&mut self) -> Result<()> {
        while !self.in_flight.is_empty() {
            self.wait_for_slot()?;
        }
        Ok(())
    }

    /// Number of attempts currently in flight
    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    /// Check if nothing is outstanding
    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Jobs that reached Completed or Canceled
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Jobs abandoned after exhausting their submission budget
    pub fn abandoned(&self) -> u64 {
        self.abandoned
    }
}
