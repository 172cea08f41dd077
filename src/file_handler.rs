//! File handling for last-lines extraction.
//!
//! This module provides the core reading functionality for rtail: a chunked
//! reverse reader that bounds memory by chunk size rather than file size, the
//! forward splitter used when a file fits in one chunk, and request validation.

pub mod last_lines;
pub mod lines;
pub mod validation;

pub use last_lines::{LastLinesReader, DEFAULT_CHUNK_SIZE};
pub use lines::split_lines;
pub use validation::{validate_line_count, validate_metadata, validate_path};
