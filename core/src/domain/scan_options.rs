//! Scan profile and the options record handed to the external scanner.

use serde::Serialize;

// ============================================================================
// ScanProfile
// ============================================================================

/// Breadth of a scan, selected by the request's `quick` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanProfile {
    /// Narrow port range, short timeout, many threads.
    #[default]
    Quick,
    /// Wider port range, longer timeout, fewer threads.
    Full,
}

impl ScanProfile {
    /// Select the profile for a `quick` flag.
    pub fn from_quick(quick: bool) -> Self {
        if quick {
            ScanProfile::Quick
        } else {
            ScanProfile::Full
        }
    }

    pub fn is_quick(&self) -> bool {
        matches!(self, ScanProfile::Quick)
    }

    /// Port range passed to the scanner, in `start-end` form.
    pub fn port_range(&self) -> &'static str {
        match self {
            ScanProfile::Quick => "1-100",
            ScanProfile::Full => "1-1000",
        }
    }

    /// Per-connection timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        match self {
            ScanProfile::Quick => 2,
            ScanProfile::Full => 3,
        }
    }

    pub fn max_threads(&self) -> u32 {
        match self {
            ScanProfile::Quick => 100,
            ScanProfile::Full => 50,
        }
    }
}

impl std::fmt::Display for ScanProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanProfile::Quick => write!(f, "quick"),
            ScanProfile::Full => write!(f, "full"),
        }
    }
}

// ============================================================================
// ScanOptions
// ============================================================================

/// Options record for a single scan.
///
/// Serialized with the field names the external scanner reads, so the JSON
/// form of this struct is the scanner's `options` argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOptions {
    pub port_scan: bool,
    pub vulnerability_scan: bool,
    pub web_test: bool,
    pub port_range: String,
    /// Seconds.
    pub timeout: u64,
    pub max_threads: u32,
    /// Always `None`; the result is returned to the caller instead of written to disk.
    pub output_file: Option<String>,
    pub output_format: String,
}

impl ScanOptions {
    /// Build the options for a profile. Nothing else influences the record.
    pub fn for_profile(profile: ScanProfile) -> Self {
        Self {
            port_scan: true,
            vulnerability_scan: true,
            web_test: false,
            port_range: profile.port_range().to_string(),
            timeout: profile.timeout_secs(),
            max_threads: profile.max_threads(),
            output_file: None,
            output_format: "json".to_string(),
        }
    }

    pub fn for_quick(quick: bool) -> Self {
        Self::for_profile(ScanProfile::from_quick(quick))
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::for_profile(ScanProfile::default())
    }
}
