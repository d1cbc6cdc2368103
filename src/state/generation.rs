//! Sequencing of generate requests

use std::collections::BTreeSet;

/// Tracks issued generate requests so only the newest one is ever displayed
#[derive(Debug, Default)]
pub struct GenerationTracker {
    latest: u64,
    in_flight: BTreeSet<u64>,
}

impl GenerationTracker {
    /// Issue a new sequence number and mark it in flight
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.in_flight.insert(self.latest);
        self.latest
    }

    /// Whether `seq` is still the most recently issued request
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }

    /// Mark a request as finished (completed, failed or aborted)
    pub fn settle(&mut self, seq: u64) {
        self.in_flight.remove(&seq);
    }

    /// True while any generate request is outstanding
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
