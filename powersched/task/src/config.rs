//! Scheduler configuration

use hal::IrqHook;
#[cfg(feature = "timing")]
use hal::TimestampFn;
use powersched_core::InterruptSource;

/// Configuration for a [`Scheduler`](crate::Scheduler).
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Name used in log output
    pub name: &'static str,
    /// Source selected at construction, may be changed before `define`
    pub source: InterruptSource,
    /// Trampoline registered with the timing hardware; it must forward to
    /// [`SharedScheduler::on_tick`](crate::SharedScheduler::on_tick).
    /// `define` is refused until one is set.
    pub tick_hook: Option<IrqHook>,
    /// Free-running counter timestamping tick phases
    #[cfg(feature = "timing")]
    pub clock: Option<TimestampFn>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            name: "powersched",
            source: InterruptSource::Uninitialized,
            tick_hook: None,
            #[cfg(feature = "timing")]
            clock: None,
        }
    }
}

impl SchedulerConfig {
    /// Creates a new scheduler configuration builder.
    pub fn builder() -> SchedulerConfigBuilder {
        SchedulerConfigBuilder::default()
    }
}

/// Builder for ergonomic scheduler configuration construction.
#[derive(Debug, Clone, Default)]
pub struct SchedulerConfigBuilder {
    config: SchedulerConfig,
}

impl SchedulerConfigBuilder {
    /// Sets the scheduler name.
    pub fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Sets the initial interrupt source.
    pub fn source(mut self, source: InterruptSource) -> Self {
        self.config.source = source;
        self
    }

    /// Sets the interrupt trampoline.
    pub fn tick_hook(mut self, hook: IrqHook) -> Self {
        self.config.tick_hook = Some(hook);
        self
    }

    /// Sets the profiling clock.
    #[cfg(feature = "timing")]
    pub fn clock(mut self, clock: TimestampFn) -> Self {
        self.config.clock = Some(clock);
        self
    }

    /// Profile with the DWT cycle counter.
    #[cfg(all(feature = "timing", feature = "cortex-m"))]
    pub fn cycle_counter_clock(self) -> Self {
        self.clock(hal::clock::dwt::cycle_count)
    }

    /// Builds the final configuration.
    pub fn build(self) -> SchedulerConfig {
        self.config
    }
}
