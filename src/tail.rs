//! Request handling around the last-lines reader.
//!
//! `TailService` validates a request, waits for admission, opens the file
//! and runs the reader. The file handle lives only inside one call and is
//! dropped on every exit path, including errors and cancellation.

pub mod gate;

pub use gate::{ExtractionGate, ExtractionPermit};

use crate::config::TailConfig;
use crate::error::{Result, RtailError};
use crate::file_handler::{validate_line_count, validate_metadata, validate_path, LastLinesReader};
use std::path::PathBuf;
use tokio::fs::File;
use tokio_util::sync::CancellationToken;

/// One request for the last lines of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailRequest {
    pub path: PathBuf,
    pub line_count: usize,
    /// Passed through to the output untouched
    pub number_lines: bool,
}

impl TailRequest {
    pub fn new(path: impl Into<PathBuf>, line_count: usize) -> Self {
        Self {
            path: path.into(),
            line_count,
            number_lines: false,
        }
    }

    pub fn with_line_numbers(mut self, number_lines: bool) -> Self {
        self.number_lines = number_lines;
        self
    }
}

/// Lines extracted for a request, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailOutput {
    pub lines: Vec<String>,
    pub number_lines: bool,
}

/// Validates and runs tail requests under a shared admission gate
#[derive(Debug, Clone)]
pub struct TailService {
    config: TailConfig,
    gate: ExtractionGate,
}

impl TailService {
    pub fn new(config: TailConfig, gate: ExtractionGate) -> Self {
        Self { config, gate }
    }

    pub fn config(&self) -> &TailConfig {
        &self.config
    }

    /// Extract the last `request.line_count` lines of `request.path`
    ///
    /// # Errors
    /// * `InvalidArgument` - blank path, line count out of range, not a regular file
    /// * `NotFound` / `AccessDenied` - the file cannot be opened or read
    /// * `Cancelled` - `cancel` fired while waiting for admission or scanning
    /// * `Unexpected` - any other I/O failure
    pub async fn tail(&self, request: &TailRequest, cancel: &CancellationToken) -> Result<TailOutput> {
        validate_path(&request.path)?;
        validate_line_count(request.line_count, self.config.max_line_count)?;
        let reader = LastLinesReader::new(request.line_count, self.config.chunk_size)?;

        let _permit = self.gate.acquire(cancel).await?;
        log::debug!(
            "tailing {} lines of {}",
            request.line_count,
            request.path.display()
        );

        let mut file = File::open(&request.path)
            .await
            .map_err(|e| RtailError::from_io(&request.path, e))?;
        let metadata = file
            .metadata()
            .await
            .map_err(|e| RtailError::from_io(&request.path, e))?;
        validate_metadata(&request.path, &metadata)?;

        let lines = reader
            .read(&mut file, cancel)
            .await
            .map_err(|e| match e {
                RtailError::Unexpected { source, .. } => RtailError::from_io(&request.path, source),
                other => other,
            })?;

        log::debug!(
            "read {} lines from {}",
            lines.len(),
            request.path.display()
        );

        Ok(TailOutput {
            lines,
            number_lines: request.number_lines,
        })
    }
}
