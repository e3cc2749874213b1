// ============================================================================
// Sequence Allocator
// Global admission ordering for all instruments
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

/// Wait-free allocator of strictly increasing sequence numbers.
///
/// Every admitted order anywhere in the system gets its sequence from one
/// shared allocator, regardless of instrument or submitting thread, so the
/// price-time tie-break is total and deterministic. A wall-clock timestamp
/// is not good enough here: two orders admitted in the same clock tick
/// would collide. Allocation is a single `fetch_add`, independent of any
/// per-instrument critical section.
#[derive(Debug)]
pub struct SequenceAllocator {
    next: AtomicU64,
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Allocate the next sequence number. Never reused, even if the order
    /// it was allocated for is subsequently rejected.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::AcqRel)
    }
}

impl Default for SequenceAllocator {
    fn default() -> Self {
        Self::new()
    }
}
