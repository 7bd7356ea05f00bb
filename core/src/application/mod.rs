//! Application layer - Use case services.
//!
//! This module contains application services that orchestrate domain logic
//! and use ports for external interactions.

mod scan_service;

pub use scan_service::ScanService;
