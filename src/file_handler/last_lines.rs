//! Chunked reverse reader that extracts the last lines of a file.
//!
//! Small inputs (no larger than one chunk) are read in one go and split
//! forward. Larger inputs are read backward one chunk at a time, so memory
//! stays bounded by the chunk size plus the longest line regardless of how
//! big the file is.

use crate::error::{Result, RtailError};
use crate::file_handler::lines;
use memchr::memrchr2;
use std::collections::VecDeque;
use std::io::SeekFrom;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};
use tokio_util::sync::CancellationToken;

/// Default read window in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Reader for the trailing `line_count` lines of a seekable source
///
/// The reader holds no per-call state, so one instance can serve any number
/// of concurrent reads over different sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastLinesReader {
    line_count: usize,
    chunk_size: usize,
}

impl LastLinesReader {
    /// Create a reader for `line_count` lines using `chunk_size` byte windows
    ///
    /// # Errors
    /// * `InvalidArgument` if either value is zero
    pub fn new(line_count: usize, chunk_size: usize) -> Result<Self> {
        if line_count == 0 {
            return Err(RtailError::invalid_argument(
                "line count must be greater than zero",
            ));
        }
        if chunk_size == 0 {
            return Err(RtailError::invalid_argument(
                "chunk size must be greater than zero",
            ));
        }

        Ok(Self {
            line_count,
            chunk_size,
        })
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read the last lines of `source` in file order, terminators stripped
    ///
    /// # Returns
    /// * At most `line_count` lines; fewer if the source has fewer
    /// * Empty vector for an empty source
    ///
    /// # Errors
    /// * `Cancelled` if `cancel` fires before the scan completes
    /// * `Unexpected` for seek or read failures
    pub async fn read<R>(&self, source: &mut R, cancel: &CancellationToken) -> Result<Vec<String>>
    where
        R: AsyncRead + AsyncSeek + Unpin,
    {
        if cancel.is_cancelled() {
            return Err(RtailError::Cancelled);
        }

        let length = source.seek(SeekFrom::End(0)).await?;

        if length <= self.chunk_size as u64 {
            log::debug!("direct read of {} bytes", length);
            self.read_direct(source, length, cancel).await
        } else {
            log::debug!(
                "reverse scan of {} bytes in {} byte chunks",
                length,
                self.chunk_size
            );
            self.read_reverse(source, length, cancel).await
        }
    }

    async fn read_direct<R>(
        &self,
        source: &mut R,
        length: u64,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>>
    where
        R: AsyncRead + AsyncSeek + Unpin,
    {
        source.seek(SeekFrom::Start(0)).await?;

        let mut content = Vec::with_capacity(length as usize);
        (&mut *source).take(length).read_to_end(&mut content).await?;

        if cancel.is_cancelled() {
            return Err(RtailError::Cancelled);
        }

        Ok(lines::last_lines(&content, self.line_count))
    }

    async fn read_reverse<R>(
        &self,
        source: &mut R,
        length: u64,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>>
    where
        R: AsyncRead + AsyncSeek + Unpin,
    {
        let mut scan = ReverseScan::new(self.line_count);
        let mut window = vec![0u8; self.chunk_size];
        let mut position = length;

        while position > 0 && !scan.is_complete() {
            if cancel.is_cancelled() {
                log::warn!("reverse scan cancelled at byte {}", position);
                return Err(RtailError::Cancelled);
            }

            let read_size = (self.chunk_size as u64).min(position) as usize;
            position -= read_size as u64;

            source.seek(SeekFrom::Start(position)).await?;
            source.read_exact(&mut window[..read_size]).await?;
            log::trace!("scanning {} bytes at offset {}", read_size, position);

            scan.feed(&window[..read_size]);
        }

        if cancel.is_cancelled() {
            log::warn!("reverse scan cancelled after final chunk");
            return Err(RtailError::Cancelled);
        }

        Ok(scan.finish())
    }
}

/// Backward line assembly state for one read
struct ReverseScan {
    wanted: usize,
    /// Completed lines, oldest first
    lines: VecDeque<String>,
    /// Bytes of the line being assembled, in reverse order
    pending: Vec<u8>,
    /// No terminator seen yet, so `pending` is the text after the last one
    at_tail: bool,
    /// The last terminator consumed was LF with nothing between it and the cursor
    after_lf: bool,
}

impl ReverseScan {
    fn new(wanted: usize) -> Self {
        Self {
            wanted,
            lines: VecDeque::with_capacity(wanted.min(1024)),
            pending: Vec::new(),
            at_tail: true,
            after_lf: false,
        }
    }

    fn is_complete(&self) -> bool {
        self.lines.len() >= self.wanted
    }

    /// Consume a window that sits directly before everything fed so far
    fn feed(&mut self, window: &[u8]) {
        let mut end = window.len();

        while end > 0 && !self.is_complete() {
            match memrchr2(b'\n', b'\r', &window[..end]) {
                Some(pos) => {
                    let segment = &window[pos + 1..end];
                    let terminator = window[pos];

                    if terminator == b'\r' && self.after_lf && segment.is_empty() {
                        // CR of a CR LF pair, already counted with its LF
                        self.after_lf = false;
                    } else {
                        self.pending.extend(segment.iter().rev());
                        self.complete_line();
                        self.after_lf = terminator == b'\n';
                    }
                    end = pos;
                }
                None => {
                    self.pending.extend(window[..end].iter().rev());
                    self.after_lf = false;
                    end = 0;
                }
            }
        }
    }

    fn complete_line(&mut self) {
        // A terminator at end of file closes no line of its own
        if self.at_tail && self.pending.is_empty() {
            self.at_tail = false;
            return;
        }
        self.at_tail = false;
        self.push_pending();
    }

    fn push_pending(&mut self) {
        self.pending.reverse();
        self.lines.push_front(lines::decode_line(&self.pending));
        self.pending.clear();
    }

    /// Called once the cursor reaches the start of the source or enough lines are found
    fn finish(mut self) -> Vec<String> {
        if !self.is_complete() && (!self.at_tail || !self.pending.is_empty()) {
            self.push_pending();
        }
        self.lines.into()
    }
}
