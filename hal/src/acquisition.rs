//! Acquisition subsystem abstraction

use crate::error::HalResult;

/// How the acquisition subsystem decides when to dispatch samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Dispatch from the subsystem's own DMA interrupt
    #[default]
    Interrupt,
    /// Dispatch only when told to, once per trigger
    ExternallyTriggered,
}

#[cfg(feature = "defmt")]
impl defmt::Format for DispatchMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Interrupt => defmt::write!(fmt, "Interrupt"),
            Self::ExternallyTriggered => defmt::write!(fmt, "ExternallyTriggered"),
        }
    }
}

/// ADC sampling and dispatch subsystem.
///
/// Raw samples accumulate in DMA buffers; a dispatch converts them into the
/// measurement values the control routine reads.
pub trait Acquisition {
    /// Whether sampling is already running
    fn is_started(&self) -> bool;

    /// Select the dispatch mode. Only meaningful before [`Acquisition::start`].
    fn set_dispatch_mode(&mut self, mode: DispatchMode);

    /// Number of base-period samples that make up one dispatch
    fn set_repetition_factor(&mut self, factor: u32);

    /// Start sampling
    fn start(&mut self) -> HalResult<()>;

    /// Convert every accumulated raw sample.
    ///
    /// Called from interrupt context; must not block.
    fn run_full_dispatch(&mut self);
}
