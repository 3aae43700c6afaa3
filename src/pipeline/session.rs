//! In-progress token shared by the analysis entry points.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Flag marking an analysis as running.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct InProgress {
    flag: Arc<AtomicBool>,
}

impl InProgress {
    /// Create a cleared flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag, failing if it is already set.
    ///
    /// The flag is cleared when the returned guard drops, including during
    /// unwinding.
    pub fn acquire(&self) -> Result<InFlight> {
        self.flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::AnalysisInProgress)?;
        Ok(InFlight {
            flag: Arc::clone(&self.flag),
        })
    }

    /// Check if an analysis is running.
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Guard held while an analysis runs.
#[derive(Debug)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
