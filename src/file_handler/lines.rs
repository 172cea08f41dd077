//! Line splitting for content that fits in a single chunk.
//!
//! Terminators are `\n`, `\r\n` and bare `\r`. A terminator at the very end of
//! the content does not open an extra empty line, while blank lines between
//! terminators are kept.

use memchr::memchr2;

/// Split `bytes` into lines with terminators stripped
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;

    while let Some(offset) = memchr2(b'\n', b'\r', &bytes[start..]) {
        let end = start + offset;
        lines.push(&bytes[start..end]);
        start = end + 1;

        // CR LF is a single terminator
        if bytes[end] == b'\r' && bytes.get(start) == Some(&b'\n') {
            start += 1;
        }
    }

    if start < bytes.len() {
        lines.push(&bytes[start..]);
    }

    lines
}

/// Return the final `count` lines of `bytes`, decoded, in file order
pub fn last_lines(bytes: &[u8], count: usize) -> Vec<String> {
    let lines = split_lines(bytes);
    let skip = lines.len().saturating_sub(count);
    lines[skip..].iter().map(|line| decode_line(line)).collect()
}

/// Decode raw line bytes, replacing invalid UTF-8 with U+FFFD
pub fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
