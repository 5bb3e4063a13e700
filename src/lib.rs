//! distload - Distributed Load Driver
//!
//! A tool that pulls a file tree into cluster cache: it walks the tree via
//! the storage gateway's metadata API, submits one asynchronous load job per
//! file to the cluster's job service, and drives every job to a terminal
//! state while capping how many are outstanding at once.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Cluster Gateway                        │
//! │   metadata API (stat/list)      job service (load jobs)  │
//! └──────────┬─────────────────────────────────┬─────────────┘
//!            │ stat / list                     │ submit / poll / close
//!            ▼                                 ▼
//! ┌──────────────────────┐        ┌──────────────────────────┐
//! │     LoadDriver       │ admit  │      ActiveJobPool       │
//! │  depth-first walk,   ├───────▶│  capacity-bounded set of │
//! │  skip fully resident │ blocks │  JobAttempts, drain      │
//! │  files               │ if full│  sweeps, retry budget    │
//! └──────────────────────┘        └──────────────────────────┘
//! ```
//!
//! The job service exposes only a pull-style status query, so admission
//! control and completion detection are implemented by polling: when the
//! pool is full, the driver sweeps every in-flight attempt until at least
//! one resolves, and the run ends by sweeping until none remain. Transient
//! submission and polling failures are retried per attempt (3 submissions by
//! default); a file whose budget runs out is abandoned without failing the
//! run.
//!
//! # Example
//!
//! ```bash
//! # Load a directory tree, default 1000 outstanding jobs
//! distload /data/warehouse
//!
//! # Two replicas per file, small job ceiling
//! distload --replication 2 --active-jobs 50 /data/hot
//! ```

pub mod cluster;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod progress;

pub use cluster::{
    HttpJobConnector, HttpMetadataClient, JobClient, JobConnector, JobId, JobStatus, LoadSpec,
    MetadataClient, PathKind, PathStatus,
};
pub use config::{CliArgs, LoadConfig};
pub use dispatch::{ActiveJobPool, DispatchStats, LoadDriver};
pub use error::{JobError, LoadError, Result, StorageError};
