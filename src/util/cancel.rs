//! Cooperative cancellation for generation runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::errors::GenerateError;

/// A cloneable flag checked between scan jobs and between folded tuples.
///
/// Cancelling never interrupts a file read in progress; the run stops at the
/// next check and returns [`GenerateError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    /// Request cancellation. All clones observe it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with `Cancelled` if cancellation was requested.
    pub fn check(&self) -> Result<(), GenerateError> {
        if self.is_cancelled() {
            Err(GenerateError::Cancelled)
        } else {
            Ok(())
        }
    }
}
