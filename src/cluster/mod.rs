//! Remote-side interface boundary
//!
//! The dispatcher consumes two remote capabilities: the storage system's
//! metadata provider (stat/list) and the job-execution service
//! (submit/poll/close). Both are modeled as traits so the dispatch core
//! stays independent of the wire; the concrete implementations here speak
//! the gateway's REST/JSON binding over blocking HTTP.

pub mod jobs;
pub mod metadata;
pub mod types;

pub use jobs::{HttpJobConnector, JobClient, JobConnector};
pub use metadata::{HttpMetadataClient, MetadataClient};
pub use types::{JobId, JobStatus, LoadSpec, PathKind, PathStatus};
