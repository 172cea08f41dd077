//! Validation utilities run before a file is tailed.
//!
//! These checks reject bad requests before any file handle is opened, and
//! classify the file itself once it has been opened.

use crate::error::{Result, RtailError};
use std::fs::Metadata;
use std::path::Path;

/// Validate that a path was actually supplied
///
/// # Error Cases
/// - Path is empty or consists only of whitespace
pub fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(RtailError::invalid_argument("file path must not be empty"));
    }
    Ok(())
}

/// Validate a requested line count against the configured ceiling
///
/// # Error Cases
/// - `requested` is zero
/// - `requested` is greater than `limit`
pub fn validate_line_count(requested: usize, limit: usize) -> Result<()> {
    if requested == 0 {
        return Err(RtailError::invalid_argument(format!(
            "line count must be between 1 and {}, got 0",
            limit
        )));
    }

    if requested > limit {
        return Err(RtailError::invalid_argument(format!(
            "line count must be between 1 and {}, got {}",
            limit, requested
        )));
    }

    Ok(())
}

/// Validate that an opened path refers to a regular file
///
/// # Error Cases
/// - Path points to a directory or other non-regular file
pub fn validate_metadata(path: &Path, metadata: &Metadata) -> Result<()> {
    if !metadata.is_file() {
        return Err(RtailError::invalid_argument(format!(
            "path is not a regular file: {}",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Create a test file with specific content
    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content)
            .expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path(Path::new("/var/log/syslog")).is_ok());

        for blank in ["", "   ", "\t"] {
            match validate_path(Path::new(blank)) {
                Err(RtailError::InvalidArgument { message }) => {
                    assert!(message.contains("must not be empty"));
                }
                other => panic!("Expected InvalidArgument for {blank:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_line_count_bounds() {
        assert!(validate_line_count(1, 100).is_ok());
        assert!(validate_line_count(100, 100).is_ok());

        match validate_line_count(0, 100) {
            Err(RtailError::InvalidArgument { message }) => assert!(message.contains("got 0")),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }

        match validate_line_count(101, 100) {
            Err(RtailError::InvalidArgument { message }) => {
                assert!(message.contains("100"));
                assert!(message.contains("101"));
            }
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_regular_file() {
        let test_file = create_test_file(b"Line 1\nLine 2\n");
        let metadata = std::fs::metadata(test_file.path()).unwrap();
        assert!(validate_metadata(test_file.path(), &metadata).is_ok());
    }

    #[test]
    fn test_validate_empty_file_is_allowed() {
        let empty_file = create_test_file(&[]);
        let metadata = std::fs::metadata(empty_file.path()).unwrap();
        assert!(validate_metadata(empty_file.path(), &metadata).is_ok());
    }

    #[test]
    fn test_validate_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let metadata = std::fs::metadata(temp_dir.path()).unwrap();

        match validate_metadata(temp_dir.path(), &metadata) {
            Err(RtailError::InvalidArgument { message }) => {
                assert!(message.contains("not a regular file"));
            }
            other => panic!("Expected InvalidArgument for directory, got {other:?}"),
        }
    }
}
