//! Scalars shared between the synchronous task and the background loop
//!
//! The synchronous task preempts the background loop at any instruction, so
//! every value crossing that boundary goes through an atomic. No ordering
//! between distinct values is promised: a reader may see a new voltage next
//! to an old current.

use core::sync::atomic::{AtomicU32, Ordering};

/// Sentinel the acquisition layer returns when no new sample is available
pub const NO_VALUE: f32 = -10000.0;

/// Lock-free `f32` cell
#[derive(Debug)]
pub struct SharedF32 {
    bits: AtomicU32,
}

impl SharedF32 {
    pub const fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Store `reading` unless it is [`NO_VALUE`], keeping the last good value.
    ///
    /// Returns whether the cell was updated.
    pub fn update_if_valid(&self, reading: f32) -> bool {
        if reading == NO_VALUE {
            false
        } else {
            self.store(reading);
            true
        }
    }
}

impl Default for SharedF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}
