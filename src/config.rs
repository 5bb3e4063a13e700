//! Configuration types for distload
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Default replication factor for loaded files
pub const DEFAULT_REPLICATION: u32 = 1;

/// Default ceiling on concurrently outstanding load jobs
pub const DEFAULT_ACTIVE_JOBS: usize = 1000;

/// Default submission attempts per file before the job is abandoned
pub const DEFAULT_RETRIES: u32 = 3;

/// Load a file or directory tree into cluster cache
#[derive(Parser, Debug, Clone)]
#[command(
    name = "distload",
    version,
    about = "Loads a file or all files in a directory tree into cluster cache",
    long_about = "Walks a file tree in the cluster and submits one asynchronous load job per\n\
                  file to the job service, skipping files that are already fully resident.\n\n\
                  The number of outstanding jobs is capped; traversal throttles itself when\n\
                  the cap is reached and the command returns once every job is terminal.",
    after_help = "EXAMPLES:\n    \
        distload /data/warehouse\n    \
        distload --replication 2 /data/warehouse/2026\n    \
        distload --active-jobs 50 --endpoint http://gateway:39999 /data/hot"
)]
pub struct CliArgs {
    /// Path of the file or directory to load
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Number of block replicas of each loaded file
    #[arg(long, default_value_t = DEFAULT_REPLICATION, value_name = "NUM")]
    pub replication: u32,

    /// Maximum number of active outgoing jobs
    #[arg(long = "active-jobs", default_value_t = DEFAULT_ACTIVE_JOBS, value_name = "NUM")]
    pub active_jobs: usize,

    /// Submission attempts per file before giving up
    #[arg(long, default_value_t = DEFAULT_RETRIES, value_name = "NUM")]
    pub retries: u32,

    /// Cluster gateway endpoint
    #[arg(long, default_value = "http://localhost:39999", value_name = "URL")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    pub timeout: u32,

    /// Quiet mode - suppress the header and summary block
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (show per-attempt retry activity)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Root path to load
    pub path: String,

    /// Replicas per loaded file, forwarded opaquely to the load job
    pub replication: u32,

    /// Concurrency ceiling for outstanding jobs
    pub active_jobs: usize,

    /// Submission attempts per file
    pub retries: u32,

    /// Parsed gateway endpoint
    pub endpoint: Url,

    /// Per-request timeout
    pub timeout: Duration,

    /// Suppress header/summary output
    pub quiet: bool,
}

impl LoadConfig {
    /// Validate CLI arguments and build the runtime configuration
    pub fn from_args(args: CliArgs) -> std::result::Result<Self, ConfigError> {
        if args.replication < 1 {
            return Err(ConfigError::InvalidReplication {
                value: args.replication as u64,
            });
        }

        if args.active_jobs < 1 {
            return Err(ConfigError::InvalidActiveJobs {
                value: args.active_jobs as u64,
            });
        }

        if args.retries < 1 {
            return Err(ConfigError::InvalidRetries {
                value: args.retries as u64,
            });
        }

        let endpoint = Url::parse(&args.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            url: args.endpoint.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                url: args.endpoint,
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        Ok(Self {
            path: args.path,
            replication: args.replication,
            active_jobs: args.active_jobs,
            retries: args.retries,
            endpoint,
            timeout: Duration::from_secs(args.timeout as u64),
            quiet: args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            path: "/data".into(),
            replication: DEFAULT_REPLICATION,
            active_jobs: DEFAULT_ACTIVE_JOBS,
            retries: DEFAULT_RETRIES,
            endpoint: "http://localhost:39999".into(),
            timeout: 30,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_defaults_validate() {
        let config = LoadConfig::from_args(base_args()).unwrap();
        assert_eq!(config.replication, 1);
        assert_eq!(config.active_jobs, 1000);
        assert_eq!(config.retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_zero_replication_rejected() {
        let mut args = base_args();
        args.replication = 0;
        assert!(matches!(
            LoadConfig::from_args(args),
            Err(ConfigError::InvalidReplication { .. })
        ));
    }

    #[test]
    fn test_zero_active_jobs_rejected() {
        let mut args = base_args();
        args.active_jobs = 0;
        assert!(matches!(
            LoadConfig::from_args(args),
            Err(ConfigError::InvalidActiveJobs { .. })
        ));
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let mut args = base_args();
        args.endpoint = "not a url".into();
        assert!(matches!(
            LoadConfig::from_args(args),
            Err(ConfigError::InvalidEndpoint { .. })
        ));

        let mut args = base_args();
        args.endpoint = "ftp://gateway:21".into();
        assert!(matches!(
            LoadConfig::from_args(args),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }
}
