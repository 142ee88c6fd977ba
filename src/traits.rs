//! Trait seams between the scanner and its collaborators.

use num_bigint::BigUint;

/// Receives one observation per fruitless window as a scan advances.
///
/// Implementations must tolerate concurrent calls: the parallel scanner
/// reports windows from several workers with no ordering guarantee.
pub trait ProgressSink: Send + Sync {
    fn window_scanned(&self, window_start: &BigUint, window_end: &BigUint);
}

/// Logs each scanned window at `info`.
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn window_scanned(&self, window_start: &BigUint, window_end: &BigUint) {
        tracing::info!("scanned window {:x} - {:x}", window_start, window_end);
    }
}

/// Discards progress; for tests and benches.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn window_scanned(&self, _window_start: &BigUint, _window_end: &BigUint) {}
}
