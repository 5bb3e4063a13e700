//! A single retryable load job
//!
//! A `JobAttempt` tracks one file's load request across submissions: it owns
//! the session used to talk to the job service, a budget of submission
//! attempts, and the id of the most recent submission. Submission failures
//! and execution failures are treated alike - both consume one unit of the
//! budget, and the file is abandoned when the budget runs out.

use crate::cluster::{JobClient, JobId, JobStatus, LoadSpec};
use crate::error::JobResult;
use tracing::{debug, warn};

/// Budgeted attempt counter
///
/// `attempt()` grants permission for one more try while the budget lasts.
#[derive(Debug, Clone)]
pub struct CountingRetry {
    max_attempts: u32,
    attempted: u32,
}

impl CountingRetry {
    /// Create a counter allowing `max_attempts` tries in total
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            attempted: 0,
        }
    }

    /// Consume one unit of the budget. Returns false once exhausted.
    pub fn attempt(&mut self) -> bool {
        if self.attempted < self.max_attempts {
            self.attempted += 1;
            true
        } else {
            false
        }
    }

    /// Number of tries consumed so far
    pub fn attempted(&self) -> u32 {
        self.attempted
    }
}

/// One file's load job, tracked from submission to a terminal state
pub struct JobAttempt {
    spec: LoadSpec,
    retry: CountingRetry,
    client: Box<dyn JobClient>,
    job_id: Option<JobId>,
}

impl JobAttempt {
    /// Wrap a load spec with a retry budget and an exclusively owned session
    pub fn new(spec: LoadSpec, retry: CountingRetry, client: Box<dyn JobClient>) -> Self {
        Self {
            spec,
            retry,
            client,
            job_id: None,
        }
    }

    /// Submit (or resubmit) the job.
    ///
    /// Consumes one unit of the retry budget; returns false ("give up")
    /// without a remote call once the budget is exhausted. A transport
    /// failure still counts as an attempt: the job id stays absent and the
    /// next `check` reports Failed without a remote call.
    pub fn submit(&mut self) -> bool {
        if !self.retry.attempt() {
            warn!("giving up on {} after {} attempts", self.spec.path, self.retry.attempted());
            return false;
        }

        self.job_id = None;
        match self.client.submit(&self.spec) {
            Ok(job_id) => {
                debug!("submitted load job {} for {}", job_id, self.spec.path);
                self.job_id = Some(job_id);
            }
            Err(e) => {
                // Counted as a failed attempt; picked up by the next check.
                warn!("failed to submit load job for {}: {}", self.spec.path, e);
            }
        }
        true
    }

    /// Query the current status of the most recent submission.
    ///
    /// Reports Failed without a remote call when no job id is held, and on a
    /// transport error while querying (assume failure rather than hang on an
    /// unreachable service). A protocol error is fatal and propagates.
    pub fn check(&self) -> JobResult<JobStatus> {
        let job_id = match self.job_id {
            Some(id) => id,
            None => return Ok(JobStatus::Failed),
        };

        match self.client.status(job_id) {
            Ok(status) => Ok(status),
            Err(e) if e.is_transient() => {
                warn!("failed to get status for job {}: {}", job_id, e);
                Ok(JobStatus::Failed)
            }
            Err(e) => Err(e),
        }
    }

    /// Release the session.
    ///
    /// Consumes the attempt, so release happens at most once; the pool calls
    /// this on every terminal path, including give-up. Close failures
    /// propagate to surface potential leaks on the remote side.
    pub fn finish(mut self) -> JobResult<()> {
        self.client.close()
    }

    /// Path this attempt is loading
    pub fn path(&self) -> &str {
        &self.spec.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scripted session: submissions and polls pop from fixed scripts,
    /// closes are counted.
    struct ScriptedClient {
        submits: RefCell<Vec<JobResult<JobId>>>,
        polls: RefCell<Vec<JobResult<JobStatus>>>,
        closes: Rc<RefCell<u32>>,
    }

    impl JobClient for ScriptedClient {
        fn submit(&self, _spec: &LoadSpec) -> JobResult<JobId> {
            self.submits.borrow_mut().remove(0)
        }

        fn status(&self, _job_id: JobId) -> JobResult<JobStatus> {
            self.polls.borrow_mut().remove(0)
        }

        fn close(&mut self) -> JobResult<()> {
            *self.closes.borrow_mut() += 1;
            Ok(())
        }
    }

    fn attempt_with(
        submits: Vec<JobResult<JobId>>,
        polls: Vec<JobResult<JobStatus>>,
    ) -> (JobAttempt, Rc<RefCell<u32>>) {
        let closes = Rc::new(RefCell::new(0));
        let client = ScriptedClient {
            submits: RefCell::new(submits),
            polls: RefCell::new(polls),
            closes: Rc::clone(&closes),
        };
        let attempt = JobAttempt::new(
            LoadSpec::new("/data/file", 1),
            CountingRetry::new(3),
            Box::new(client),
        );
        (attempt, closes)
    }

    #[test]
    fn test_counting_retry_budget() {
        let mut retry = CountingRetry::new(3);
        assert!(retry.attempt());
        assert!(retry.attempt());
        assert!(retry.attempt());
        assert!(!retry.attempt());
        assert!(!retry.attempt());
        assert_eq!(retry.attempted(), 3);
    }

    #[test]
    fn test_submit_failure_counts_against_budget() {
        let transport = || Err(JobError::Transport("unreachable".into()));
        let (mut attempt, closes) = attempt_with(vec![transport(), transport(), transport()], vec![]);

        // Three failing submissions consume the whole budget; the fourth
        // call gives up without a remote call.
        assert!(attempt.submit());
        assert_eq!(attempt.check().unwrap(), JobStatus::Failed);
        assert!(attempt.submit());
        assert!(attempt.submit());
        assert!(!attempt.submit());

        attempt.finish().unwrap();
        assert_eq!(*closes.borrow(), 1);
    }

    #[test]
    fn test_check_without_id_reports_failed_locally() {
        // No poll scripted: a remote call would panic the test
        let (attempt, _closes) = attempt_with(vec![], vec![]);
        assert_eq!(attempt.check().unwrap(), JobStatus::Failed);
    }

    #[test]
    fn test_poll_transport_error_maps_to_failed() {
        let (mut attempt, _closes) = attempt_with(
            vec![Ok(JobId(7))],
            vec![Err(JobError::Transport("timeout".into()))],
        );
        assert!(attempt.submit());
        assert_eq!(attempt.check().unwrap(), JobStatus::Failed);
    }

    #[test]
    fn test_unexpected_status_propagates() {
        let (mut attempt, _closes) = attempt_with(
            vec![Ok(JobId(7))],
            vec![Err(JobError::UnexpectedStatus { value: "PAUSED".into() })],
        );
        assert!(attempt.submit());
        assert!(matches!(
            attempt.check(),
            Err(JobError::UnexpectedStatus { .. })
        ));
    }

    #[test]
    fn test_successful_lifecycle_closes_once() {
        let (mut attempt, closes) = attempt_with(
            vec![Ok(JobId(1))],
            vec![Ok(JobStatus::Running), Ok(JobStatus::Completed)],
        );
        assert!(attempt.submit());
        assert_eq!(attempt.check().unwrap(), JobStatus::Running);
        assert_eq!(attempt.check().unwrap(), JobStatus::Completed);
        attempt.finish().unwrap();
        assert_eq!(*closes.borrow(), 1);
    }
}
