//! Scan request application service.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::ScanRequest;
use crate::error::Result;
use crate::ports::VulnerabilityScannerPort;

/// Application service turning scan requests into scanner invocations.
///
/// Holds no per-request state: every call builds its own options record
/// from the request and hands a single-target list to the scanner.
pub struct ScanService<S: VulnerabilityScannerPort> {
    scanner: S,
}

impl<S: VulnerabilityScannerPort> ScanService<S> {
    /// Create a new scan service with the given scanner.
    pub fn new(scanner: S) -> Self {
        Self { scanner }
    }

    /// Returns the underlying scanner.
    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    /// Run a scan for the request and return the scanner's result unchanged.
    pub async fn scan(&self, request: &ScanRequest) -> Result<Value> {
        let options = request.options();
        let targets = vec![request.target.clone()];

        info!(
            host = %request.target,
            profile = %request.profile(),
            "Starting scan"
        );
        debug!(?options, "Scan options");

        let started = Instant::now();
        let result = self.scanner.run_scan(&targets, &options).await?;

        info!(
            host = %request.target,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scan finished"
        );

        Ok(result)
    }
}
