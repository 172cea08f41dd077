//! Admission control for concurrent extractions.
//!
//! The gate is created once by the caller and cloned into whatever needs it;
//! all clones draw from the same pool of permits.

use crate::error::{Result, RtailError};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Counting gate that bounds how many extractions run at once
#[derive(Debug, Clone)]
pub struct ExtractionGate {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

/// Permit held for the duration of one extraction; released on drop
#[derive(Debug)]
pub struct ExtractionPermit {
    _permit: OwnedSemaphorePermit,
}

impl ExtractionGate {
    /// Create a gate admitting at most `limit` extractions at a time
    pub fn new(limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(RtailError::invalid_argument(
                "concurrency limit must be greater than zero",
            ));
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Permits not currently held
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait for a permit
    ///
    /// # Errors
    /// * `Cancelled` if `cancel` fires while waiting or the gate was closed
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<ExtractionPermit> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RtailError::Cancelled),
            permit = Arc::clone(&self.semaphore).acquire_owned() => match permit {
                Ok(permit) => Ok(ExtractionPermit { _permit: permit }),
                Err(_) => {
                    log::warn!("extraction gate closed while waiting for a permit");
                    Err(RtailError::Cancelled)
                }
            },
        }
    }

    /// Stop admitting new extractions; pending waiters fail with `Cancelled`
    pub fn close(&self) {
        self.semaphore.close();
    }
}
