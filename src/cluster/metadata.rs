//! Storage metadata provider
//!
//! The tree walker consumes two capabilities from the storage system: stat a
//! single path and list a directory's immediate children. Both fail with
//! structural errors that abort the whole dispatch.

use crate::cluster::types::PathStatus;
use crate::error::{StorageError, StorageResult};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

/// Metadata listing capability of the storage system
pub trait MetadataClient {
    /// Fetch metadata for one path
    fn status(&self, path: &str) -> StorageResult<PathStatus>;

    /// List the immediate children of a directory, in listing order
    fn list(&self, path: &str) -> StorageResult<Vec<PathStatus>>;
}

/// Metadata client speaking the gateway's REST binding
pub struct HttpMetadataClient {
    http: Client,
    base: Url,
}

impl HttpMetadataClient {
    /// Create a client against the given gateway endpoint
    pub fn new(base: Url, timeout: Duration) -> StorageResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Transport(e.to_string()))?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, op: &str, path: &str) -> StorageResult<Url> {
        let mut url = self
            .base
            .join(&format!("api/v1/paths/{op}"))
            .map_err(|e| StorageError::Transport(e.to_string()))?;
        url.query_pairs_mut().append_pair("path", path);
        Ok(url)
    }

    /// Map an error response to the structural error taxonomy
    fn check(path: &str, status: StatusCode) -> StorageResult<()> {
        match status {
            StatusCode::NOT_FOUND => Err(StorageError::NotFound { path: path.into() }),
            StatusCode::FORBIDDEN => Err(StorageError::PermissionDenied { path: path.into() }),
            s if !s.is_success() => Err(StorageError::Transport(format!("HTTP {s}"))),
            _ => Ok(()),
        }
    }
}

impl MetadataClient for HttpMetadataClient {
    fn status(&self, path: &str) -> StorageResult<PathStatus> {
        let url = self.endpoint("status", path)?;
        let response = self.http.get(url).send().map_err(|e| StorageError::StatFailed {
            path: path.into(),
            reason: e.to_string(),
        })?;

        Self::check(path, response.status())?;

        response.json().map_err(|e| StorageError::StatFailed {
            path: path.into(),
            reason: e.to_string(),
        })
    }

    fn list(&self, path: &str) -> StorageResult<Vec<PathStatus>> {
        let url = self.endpoint("list", path)?;
        let response = self.http.get(url).send().map_err(|e| StorageError::ListFailed {
            path: path.into(),
            reason: e.to_string(),
        })?;

        Self::check(path, response.status())?;

        response.json().map_err(|e| StorageError::ListFailed {
            path: path.into(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_mapping() {
        assert!(matches!(
            HttpMetadataClient::check("/p", StatusCode::NOT_FOUND),
            Err(StorageError::NotFound { .. })
        ));
        assert!(matches!(
            HttpMetadataClient::check("/p", StatusCode::FORBIDDEN),
            Err(StorageError::PermissionDenied { .. })
        ));
        assert!(matches!(
            HttpMetadataClient::check("/p", StatusCode::BAD_GATEWAY),
            Err(StorageError::Transport(_))
        ));
        assert!(HttpMetadataClient::check("/p", StatusCode::OK).is_ok());
    }

    #[test]
    fn test_endpoint_url() {
        let client = HttpMetadataClient::new(
            Url::parse("http://gateway:39999").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        let url = client.endpoint("status", "/data/a b").unwrap();
        assert_eq!(url.path(), "/api/v1/paths/status");
        assert!(url.query().unwrap().contains("path=%2Fdata%2Fa+b"));
    }
}
