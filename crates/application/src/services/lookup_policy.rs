use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Process-wide switch deciding whether cache misses may go upstream.
///
/// Shared as `Arc<LookupPolicy>` between the query path (many readers) and
/// the admin console (the writer). Queries already in flight may see either
/// value across a toggle; cached answers are never affected.
#[derive(Debug)]
pub struct LookupPolicy {
    enabled: AtomicBool,
}

impl LookupPolicy {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Returns the previous value.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        let previous = self.enabled.swap(enabled, Ordering::AcqRel);
        if previous != enabled {
            info!(enabled, "Upstream lookups toggled");
        }
        previous
    }
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}
