//! Job service client
//!
//! Each job attempt exclusively owns one session with the job-execution
//! service: a `JobConnector` opens a fresh session per attempt, and the
//! resulting `JobClient` is released exactly once when the attempt reaches a
//! terminal state. Submission and status polling fail with transport errors
//! that the dispatch core absorbs into retry accounting; failing to release
//! a session propagates, since it can leak resources on the remote side.

use crate::cluster::types::{JobId, JobStatus, LoadSpec};
use crate::error::{JobError, JobResult};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// One session with the job-execution service
pub trait JobClient {
    /// Submit a load job, returning its id
    fn submit(&self, spec: &LoadSpec) -> JobResult<JobId>;

    /// Query the current status of a submitted job
    fn status(&self, job_id: JobId) -> JobResult<JobStatus>;

    /// Release the session. Must be called exactly once; errors propagate
    /// as a resource-leak signal.
    fn close(&mut self) -> JobResult<()>;
}

/// Factory opening one fresh session per job attempt
pub trait JobConnector {
    /// Open a new session with the job service
    fn connect(&self) -> JobResult<Box<dyn JobClient>>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    session_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    job_id: JobId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    status: String,
}

/// Connector speaking the gateway's REST binding
pub struct HttpJobConnector {
    http: Client,
    base: Url,
}

impl HttpJobConnector {
    /// Create a connector against the given gateway endpoint
    pub fn new(base: Url, timeout: Duration) -> JobResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JobError::SessionFailed(e.to_string()))?;
        Ok(Self { http, base })
    }
}

impl JobConnector for HttpJobConnector {
    fn connect(&self) -> JobResult<Box<dyn JobClient>> {
        let url = self
            .base
            .join("api/v1/sessions")
            .map_err(|e| JobError::SessionFailed(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .send()
            .map_err(|e| JobError::SessionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JobError::SessionFailed(format!("HTTP {}", response.status())));
        }

        let session: SessionResponse = response
            .json()
            .map_err(|e| JobError::SessionFailed(e.to_string()))?;

        Ok(Box::new(HttpJobClient {
            http: self.http.clone(),
            base: self.base.clone(),
            session_id: session.session_id,
            closed: false,
        }))
    }
}

/// One REST session with the job service
pub struct HttpJobClient {
    http: Client,
    base: Url,
    session_id: String,
    closed: bool,
}

impl HttpJobClient {
    fn session_url(&self, suffix: &str) -> JobResult<Url> {
        self.base
            .join(&format!("api/v1/sessions/{}{}", self.session_id, suffix))
            .map_err(|e| JobError::Transport(e.to_string()))
    }
}

impl JobClient for HttpJobClient {
    fn submit(&self, spec: &LoadSpec) -> JobResult<JobId> {
        let url = self.session_url("/jobs")?;
        let response = self
            .http
            .post(url)
            .json(spec)
            .send()
            .map_err(|e| JobError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JobError::Transport(format!("HTTP {}", response.status())));
        }

        let submitted: SubmitResponse = response
            .json()
            .map_err(|e| JobError::Transport(e.to_string()))?;
        Ok(submitted.job_id)
    }

    fn status(&self, job_id: JobId) -> JobResult<JobStatus> {
        let url = self.session_url(&format!("/jobs/{job_id}"))?;
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| JobError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JobError::Transport(format!("HTTP {}", response.status())));
        }

        let body: StatusResponse = response
            .json()
            .map_err(|e| JobError::Transport(e.to_string()))?;

        // An unknown status name is a protocol error, not a transient
        // failure: fail loudly rather than guess.
        JobStatus::parse(&body.status).ok_or(JobError::UnexpectedStatus { value: body.status })
    }

    fn close(&mut self) -> JobResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let url = self.session_url("")?;
        let response = self
            .http
            .delete(url)
            .send()
            .map_err(|e| JobError::CloseFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JobError::CloseFailed(format!("HTTP {}", response.status())));
        }
        Ok(())
    }
}

impl Drop for HttpJobClient {
    fn drop(&mut self) {
        // Backstop for abort paths only; the normal path releases through
        // close(), which reports failures to the caller.
        if !self.closed {
            if let Err(e) = self.close() {
                warn!("failed to release job session {}: {}", self.session_id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_protocol_error() {
        // the mapping status() relies on: parse returns None, never a guess
        assert!(JobStatus::parse("PAUSED").is_none());
        let err = JobStatus::parse("PAUSED")
            .ok_or(JobError::UnexpectedStatus { value: "PAUSED".into() })
            .unwrap_err();
        assert!(matches!(err, JobError::UnexpectedStatus { .. }));
    }

    #[test]
    fn test_submit_response_decoding() {
        let decoded: SubmitResponse = serde_json::from_str(r#"{"jobId": 42}"#).unwrap();
        assert_eq!(decoded.job_id, JobId(42));

        let status: StatusResponse = serde_json::from_str(r#"{"status": "RUNNING"}"#).unwrap();
        assert_eq!(JobStatus::parse(&status.status), Some(JobStatus::Running));
    }
}
