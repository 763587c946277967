//! Mock delay provider

use crate::delay::DelayNs;

/// Records requested delays instead of waiting
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
    suspensions: u32,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total simulated time spent suspended
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }

    /// Number of suspend requests received
    pub fn suspensions(&self) -> u32 {
        self.suspensions
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.suspensions += 1;
    }

    fn delay_us(&mut self, us: u32) {
        self.total_ns += u64::from(us) * 1_000;
        self.suspensions += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
        self.suspensions += 1;
    }
}
