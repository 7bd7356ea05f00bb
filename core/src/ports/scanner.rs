//! Vulnerability scanner port (interface).

use serde_json::Value;

use crate::domain::ScanOptions;
use crate::error::Result;

/// Port for running a vulnerability scan.
///
/// This trait is the seam to the external scanning engine. The engine owns
/// port scanning, vulnerability detection and its own threading; callers only
/// hand it targets and an options record and get back an opaque JSON value.
pub trait VulnerabilityScannerPort: Send + Sync {
    /// Scan `targets` with `options`, resolving once the scan has finished.
    fn run_scan(
        &self,
        targets: &[String],
        options: &ScanOptions,
    ) -> impl std::future::Future<Output = Result<Value>> + Send;
}
