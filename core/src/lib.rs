//! ScanRelay Core Library
//!
//! Bridges HTTP scan requests to an external vulnerability scanner.
//! Provides functionality to:
//! - Extract a scan request (target, quick flag) from request input
//! - Build the fixed options record for a scan profile
//! - Run the external scanner and return its result as opaque JSON
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Request and options value objects
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{ScanOptions, ScanProfile, ScanRequest, DEFAULT_TARGET};

// Re-export other commonly used types
pub use adapters::ProcessScanner;
pub use application::ScanService;
pub use config::ServerConfig;
pub use error::{Error, Result};
pub use ports::VulnerabilityScannerPort;
