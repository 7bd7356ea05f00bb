//! Vulnerability scanner adapters.
//!
//! The external scanner is a Python project exposing
//! `main.VulnerabilityScanner`; it is driven through a child interpreter.

mod bridge;
mod process;

pub use process::{find_executable, ProcessScanner};
