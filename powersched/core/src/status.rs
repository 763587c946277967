//! Synchronous task lifecycle

/// Lifecycle of the synchronous task.
///
/// ```text
/// Inexistent --define--> Defined --start--> Running --stop--> Suspended
///                                              ^                  |
///                                              +------start-------+
/// Suspended --define--> Defined
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    /// Nothing defined yet
    #[default]
    Inexistent,
    /// Timing source armed, interrupt not enabled
    Defined,
    /// Interrupt enabled, ticks delivered
    Running,
    /// Interrupt disabled, configuration kept
    Suspended,
}

impl TaskStatus {
    /// Whether `define` may (re)configure the task from this status
    pub const fn accepts_define(self) -> bool {
        matches!(self, TaskStatus::Inexistent | TaskStatus::Suspended)
    }

    /// Whether `start` may enable the interrupt from this status
    pub const fn accepts_start(self) -> bool {
        matches!(self, TaskStatus::Defined | TaskStatus::Suspended)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, TaskStatus::Running)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TaskStatus {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TaskStatus::Inexistent => defmt::write!(fmt, "Inexistent"),
            TaskStatus::Defined => defmt::write!(fmt, "Defined"),
            TaskStatus::Running => defmt::write!(fmt, "Running"),
            TaskStatus::Suspended => defmt::write!(fmt, "Suspended"),
        }
    }
}
