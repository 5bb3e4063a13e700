//! Cluster-facing data types
//!
//! These types cross the boundary between the dispatch core and the remote
//! services: path metadata returned by the storage gateway, and the job
//! identifiers/statuses tracked while driving load jobs to completion.

use serde::{Deserialize, Serialize};

/// Kind of a path in the storage tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// Metadata for one path, as reported by the storage gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStatus {
    /// Absolute path within the cluster namespace
    pub path: String,

    /// File or directory
    pub kind: PathKind,

    /// Fraction of the file already resident in cluster cache, 0-100.
    /// Directories always report 0.
    #[serde(default)]
    pub residency_percent: u8,
}

impl PathStatus {
    /// Check if this path is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == PathKind::Directory
    }

    /// Check if this file is already fully resident (nothing to load)
    pub fn fully_resident(&self) -> bool {
        self.residency_percent >= 100
    }
}

/// Identifier of a job assigned by the job service on submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a remote load job
///
/// `Created` and `Running` are non-terminal (keep polling). `Completed` and
/// `Canceled` end the attempt successfully. `Failed` is retryable until the
/// attempt's budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Created,
    Running,
    Completed,
    Canceled,
    Failed,
}

impl JobStatus {
    /// Parse a status name as reported by the job service.
    ///
    /// Returns None for names this client does not know; callers must treat
    /// that as a protocol error, not as any particular status.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "CREATED" => Some(JobStatus::Created),
            "RUNNING" => Some(JobStatus::Running),
            "COMPLETED" => Some(JobStatus::Completed),
            "CANCELED" => Some(JobStatus::Canceled),
            "FAILED" => Some(JobStatus::Failed),
            _ => None,
        }
    }

    /// Check if this status ends the attempt without a resubmission
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Canceled)
    }
}

/// Description of one load job: which file, how many replicas.
///
/// Immutable once created. The replication factor is forwarded opaquely to
/// the job service; how many blocks a load copies is the remote job's
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSpec {
    /// File to load
    pub path: String,

    /// Replicas per block
    pub replication: u32,
}

impl LoadSpec {
    /// Create a load spec for one file
    pub fn new(path: impl Into<String>, replication: u32) -> Self {
        Self {
            path: path.into(),
            replication,
        }
    }
}
