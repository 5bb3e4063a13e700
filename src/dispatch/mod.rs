//! Dispatch core
//!
//! Drives one load run end to end: walk the file tree under the root,
//! admit one load job per file that is not already resident (blocking when
//! the active job pool is full), then drain every outstanding job to a
//! terminal state.
//!
//! ```text
//! MetadataClient ──stat/list──▶ LoadDriver ──admit──▶ ActiveJobPool
//!                                                        │ submit/poll
//!                                                        ▼
//!                                              JobClient (one session
//!                                               per JobAttempt)
//! ```

pub mod attempt;
pub mod pool;

pub use attempt::{CountingRetry, JobAttempt};
pub use pool::ActiveJobPool;

use crate::cluster::{JobConnector, LoadSpec, MetadataClient, PathStatus};
use crate::config::LoadConfig;
use crate::error::Result;
use std::time::{Duration, Instant};
use tracing::debug;

/// Counters reported after a load run
///
/// These are summary counters only: per-file outcome is observable from the
/// printed lines, and overall success from the process exit status.
#[derive(Debug, Clone, Default)]
pub struct DispatchStats {
    /// Files for which a load job was admitted
    pub queued: u64,
    /// Files skipped because they were already fully resident
    pub skipped: u64,
    /// Jobs that reached Completed or Canceled
    pub completed: u64,
    /// Jobs abandoned after exhausting their submission budget
    pub abandoned: u64,
    /// Wall-clock time of the whole run
    pub duration: Duration,
}

/// Top-level driver for one load run
pub struct LoadDriver {
    meta: Box<dyn MetadataClient>,
    connector: Box<dyn JobConnector>,
    pool: ActiveJobPool,
    root: String,
    replication: u32,
    queued: u64,
    skipped: u64,
}

impl LoadDriver {
    /// Create a driver from validated configuration and the two remote
    /// capabilities it consumes
    pub fn new(
        config: &LoadConfig,
        meta: Box<dyn MetadataClient>,
        connector: Box<dyn JobConnector>,
    ) -> Self {
        Self {
            meta,
            connector,
            pool: ActiveJobPool::new(config.active_jobs, config.retries),
            root: config.path.clone(),
            replication: config.replication,
            queued: 0,
            skipped: 0,
        }
    }

    /// Override the pool's pause between no-progress sweep passes
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.pool = self.pool.with_poll_interval(interval);
        self
    }

    /// Walk the root and drive every admitted job to a terminal state.
    ///
    /// Metadata errors and session-setup errors abort the run and propagate
    /// unmodified; per-file job failures are absorbed into retry accounting
    /// and surface only in the abandoned counter.
    pub fn run(&mut self) -> Result<DispatchStats> {
        let start = Instant::now();

        let root = self.root.clone();
        self.load(&root)?;

        // Wait for the remaining jobs to complete.
        self.pool.drain_all()?;

        Ok(DispatchStats {
            queued: self.queued,
            skipped: self.skipped,
            completed: self.pool.completed(),
            abandoned: self.pool.abandoned(),
            duration: start.elapsed(),
        })
    }

    /// Depth-first walk: directories recurse in listing order, files become
    /// load candidates
    fn load(&mut self, path: &str) -> Result<()> {
        let status = self.meta.status(path)?;
        if status.is_dir() {
            self.load_dir(path)
        } else {
            self.enqueue(&status)
        }
    }

    fn load_dir(&mut self, path: &str) -> Result<()> {
        debug!("listing {}", path);
        for child in self.meta.list(path)? {
            if child.is_dir() {
                self.load_dir(&child.path)?;
            } else {
                self.enqueue(&child)?;
            }
        }
        Ok(())
    }

    /// Skip a fully resident file, otherwise admit a load job for it.
    /// Admission may block inside the pool until a slot frees; that is the
    /// mechanism by which traversal throttles itself to the ceiling.
    fn enqueue(&mut self, status: &PathStatus) -> Result<()> {
        if status.fully_resident() {
            println!("{} is already fully loaded", status.path);
            self.skipped += 1;
            return Ok(());
        }

        self.pool.admit(
            &*self.connector,
            LoadSpec::new(&status.path, self.replication),
        )?;
        println!("{} loading", status.path);
        self.queued += 1;
        Ok(())
    }
}
