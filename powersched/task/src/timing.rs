//! Tick phase capture buffers
//!
//! With the `timing` feature the tick handler timestamps the boundaries of
//! the dispatch phase and of the control routine. Each buffer fills once and
//! then freezes, so a debugger halted at any later point reads one coherent
//! window starting at the first recorded tick. [`CaptureBuffer::reset`]
//! re-arms the capture.

/// Default number of spans kept per phase
pub const TIMING_CAPACITY: usize = 2048;

/// Rise and fall timestamps of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub rise: u32,
    pub fall: u32,
}

impl Span {
    pub const fn new(rise: u32, fall: u32) -> Self {
        Self { rise, fall }
    }

    /// Phase duration in counter ticks, tolerating one counter wrap
    pub fn duration(&self) -> u32 {
        self.fall.wrapping_sub(self.rise)
    }
}

/// Fixed-capacity span arena with a write cursor and a one-shot freeze
#[derive(Debug)]
pub struct CaptureBuffer<const N: usize> {
    spans: [Span; N],
    cursor: usize,
    frozen: bool,
}

impl<const N: usize> CaptureBuffer<N> {
    pub const fn new() -> Self {
        Self {
            spans: [Span::new(0, 0); N],
            cursor: 0,
            frozen: false,
        }
    }

    /// Store `span` at the cursor.
    ///
    /// Returns `false` once the buffer is frozen and the span was dropped.
    pub fn record(&mut self, span: Span) -> bool {
        if self.frozen || N == 0 {
            return false;
        }
        self.spans[self.cursor] = span;
        self.cursor += 1;
        if self.cursor == N {
            self.cursor = 0;
            self.frozen = true;
        }
        true
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Next slot to be written
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Spans captured so far, oldest first
    pub fn spans(&self) -> &[Span] {
        if self.frozen {
            &self.spans
        } else {
            &self.spans[..self.cursor]
        }
    }

    /// Thaw the buffer and restart the capture at slot 0
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.frozen = false;
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for CaptureBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture of both tick phases
#[derive(Debug, Default)]
pub struct TimingRecord<const N: usize> {
    /// Acquisition dispatch, only on ticks that dispatch
    pub dispatch: CaptureBuffer<N>,
    /// Control routine
    pub control: CaptureBuffer<N>,
}

impl<const N: usize> TimingRecord<N> {
    pub const fn new() -> Self {
        Self {
            dispatch: CaptureBuffer::new(),
            control: CaptureBuffer::new(),
        }
    }

    pub fn reset(&mut self) {
        self.dispatch.reset();
        self.control.reset();
    }
}
