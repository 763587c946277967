//! Free-running counters used to timestamp tick phases

/// Reads a free-running counter. Must be callable from interrupt context.
pub type TimestampFn = fn() -> u32;

/// Cortex-M DWT cycle counter
#[cfg(feature = "cortex-m")]
pub mod dwt {
    use cortex_m::peripheral::{DCB, DWT};

    /// Turn on the trace unit and the cycle counter.
    ///
    /// Call once during bring-up before using [`cycle_count`] as a
    /// profiling clock.
    pub fn enable_cycle_counter(dcb: &mut DCB, dwt: &mut DWT) {
        dcb.enable_trace();
        DWT::unlock();
        dwt.set_cycle_count(0);
        dwt.enable_cycle_counter();
    }

    /// Current core cycle count
    pub fn cycle_count() -> u32 {
        DWT::cycle_count()
    }
}
