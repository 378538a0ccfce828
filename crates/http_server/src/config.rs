//! Server configuration, built from command line flags.
//!
//! ```bash
//! carbon-route-server --directory /tmp/files --addr 127.0.0.1:4221
//! HTTP_DIRECTORY=/tmp/files carbon-route-server --legacy-status
//! ```

use std::{
    net::SocketAddr,
    path::PathBuf,
};

use clap::Parser;

pub use crate::http::parser::Limits;
use crate::HttpServerError;

/// How the router reports unknown routes, missing files and unsupported methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// `404 Not Found` for unknown routes and missing files, `405 Method Not Allowed` for
    /// methods other than GET and POST
    #[default]
    Corrected,
    /// Byte-for-byte the legacy wire behavior: `400 Not Found`, and a plain `200 OK` for
    /// any method other than GET and POST
    Legacy,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "carbon-route-server")]
#[command(about = "A tiny HTTP/1.1 server with echo, user-agent and file routes")]
#[command(version)]
pub struct Args {
    /// Directory the `/files` route reads from and writes to
    #[arg(long, default_value = ".", env = "HTTP_DIRECTORY")]
    pub directory: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:4221", env = "HTTP_ADDR")]
    pub addr: SocketAddr,

    /// Answer with the legacy status codes, odd ones included
    #[arg(long)]
    pub legacy_status: bool,

    /// Largest accepted request line plus headers, in bytes
    #[arg(long, default_value_t = Limits::DEFAULT_HEAD_BYTES)]
    pub max_head_bytes: usize,

    /// Largest accepted request body, in bytes
    #[arg(long, default_value_t = Limits::DEFAULT_BODY_BYTES)]
    pub max_body_bytes: u64,
}

impl Args {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            addr: self.addr,
            directory: self.directory,
            policy: if self.legacy_status {
                StatusPolicy::Legacy
            } else {
                StatusPolicy::Corrected
            },
            limits: Limits {
                head_bytes: self.max_head_bytes,
                body_bytes: self.max_body_bytes,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub directory: PathBuf,
    pub policy: StatusPolicy,
    pub limits: Limits,
}

impl ServerConfig {
    /// Checks that the served directory exists
    pub fn validate(&self) -> Result<(), HttpServerError> {
        if !self.directory.is_dir() {
            return Err(HttpServerError::InvalidDirectory(self.directory.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Args::try_parse_from(["carbon-route-server"])
            .unwrap()
            .into_config();
        assert_eq!(config.addr, "0.0.0.0:4221".parse().unwrap());
        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.policy, StatusPolicy::Corrected);
        assert_eq!(config.limits, Limits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn flags() {
        let config = Args::try_parse_from([
            "carbon-route-server",
            "--directory",
            "/tmp",
            "--addr",
            "127.0.0.1:8080",
            "--legacy-status",
            "--max-body-bytes",
            "10",
        ])
        .unwrap()
        .into_config();
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.directory, PathBuf::from("/tmp"));
        assert_eq!(config.policy, StatusPolicy::Legacy);
        assert_eq!(config.limits.body_bytes, 10);
    }

    #[test]
    fn missing_directory_is_rejected() {
        let config = ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            directory: PathBuf::from("/definitely/not/a/real/dir"),
            policy: StatusPolicy::default(),
            limits: Limits::default(),
        };
        assert!(matches!(
            config.validate(),
            Err(HttpServerError::InvalidDirectory(_))
        ));
    }
}
