//! Cancellation support for scans.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A cancellation handle shared between the interrupt listener and the
/// workers. Workers check `is_cancelled()` before each file.
#[derive(Debug, Clone, Default)]
pub struct ScanCancellation {
    flag: Arc<AtomicBool>,
}

impl ScanCancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
