//! Server configuration.
//!
//! Built once at startup from command-line arguments and environment
//! variables; nothing is read or written afterwards.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5050;

/// Default listen address (all interfaces).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default interpreter hosting the scanner.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Runtime configuration for the scan server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,

    /// Listen port.
    pub port: u16,

    /// Absolute path of the scanner project root.
    pub scanner_root: PathBuf,

    /// Interpreter path or name.
    pub interpreter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            scanner_root: PathBuf::from("."),
            interpreter: DEFAULT_INTERPRETER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Create a config with the scanner root resolved against the current
    /// working directory. `None` means the working directory itself.
    pub fn new(scanner_root: Option<&Path>) -> Result<Self> {
        Ok(Self {
            scanner_root: resolve_root(scanner_root)?,
            ..Self::default()
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| Error::Config(format!("Invalid listen address {:?}: {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// URL of the scan endpoint, as announced at startup.
    pub fn scan_url(&self) -> String {
        format!("http://{}:{}/scan", self.host, self.port)
    }
}

/// Resolve the scanner root to an absolute path.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| Error::Config(format!("Could not determine working directory: {}", e)))?;

    Ok(match root {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd,
    })
}
