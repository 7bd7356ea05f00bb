//! Domain layer - Pure business logic and data models.
//!
//! This module contains the request and options value objects.
//! These types have no I/O dependencies and can be tested in isolation.

mod scan_options;
mod scan_request;

// Re-export all domain types
pub use scan_options::{ScanOptions, ScanProfile};
pub use scan_request::{ScanRequest, DEFAULT_TARGET};
