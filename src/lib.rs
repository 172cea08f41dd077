//! # rtail - Last Lines of Large Files
//!
//! Prints the final lines of a text file by reading it backward in fixed-size
//! chunks, so memory use depends on the chunk size and the longest line rather
//! than on the size of the file.
//!
//! ## Features
//!
//! - **Bounded Memory**: Reverse chunked scan with a configurable window (8 KiB default)
//! - **Mixed Terminators**: `\n`, `\r\n` and bare `\r` in any combination
//! - **Cancellation**: Long scans stop promptly when a token fires
//! - **Admission Control**: A caller-owned gate bounds concurrent extractions
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Defaults and optional TOML configuration
//! - [`file_handler`] - The chunked reverse reader and line splitting
//! - [`tail`] - Request validation, admission and file lifetime
//! - [`output`] - Console formatting

// Core modules
pub mod config;
pub mod error;
pub mod file_handler;

// Caller-facing components
pub mod output;
pub mod tail;

// Re-export commonly used types for convenience
pub use error::{Result, RtailError};

// Public API surface for external usage
pub use config::TailConfig;
pub use file_handler::LastLinesReader;
pub use tail::{ExtractionGate, TailOutput, TailRequest, TailService};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
