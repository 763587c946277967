//! Mock PWM generator

use super::CallLog;
use crate::error::{HalError, HalResult};
use crate::pwm::PwmGenerator;
use crate::timer::IrqHook;

/// Operation received by a [`MockPwm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmCall {
    ConfigurePeriodicEvent(u32),
    EnablePeriodicEvent,
    DisablePeriodicEvent,
}

/// Mock PWM generator
///
/// Tracks base period, repetition and periodic event state for test
/// verification.
#[derive(Debug)]
pub struct MockPwm {
    base_period_us: u32,
    repetition: u32,
    hook: Option<IrqHook>,
    enabled: bool,
    calls: CallLog<PwmCall>,
}

impl MockPwm {
    /// Create a generator running at `base_period_us`
    pub fn new(base_period_us: u32) -> Self {
        Self {
            base_period_us,
            repetition: 0,
            hook: None,
            enabled: false,
            calls: CallLog::new(),
        }
    }

    /// Create a generator that was never configured
    pub fn unconfigured() -> Self {
        Self::new(0)
    }

    pub fn set_base_period_us(&mut self, base_period_us: u32) {
        self.base_period_us = base_period_us;
    }

    pub fn hook(&self) -> Option<IrqHook> {
        self.hook
    }

    pub fn is_event_enabled(&self) -> bool {
        self.enabled
    }

    pub fn calls(&self) -> &[PwmCall] {
        &self.calls
    }

    /// Simulate the periodic event interrupt
    pub fn fire(&self) {
        if let (true, Some(hook)) = (self.enabled, self.hook) {
            hook();
        }
    }
}

impl PwmGenerator for MockPwm {
    fn base_period_us(&self) -> u32 {
        self.base_period_us
    }

    fn configure_periodic_event(&mut self, repetition: u32, hook: IrqHook) -> HalResult<()> {
        if self.base_period_us == 0 {
            return Err(HalError::NotConfigured);
        }
        if repetition == 0 {
            return Err(HalError::InvalidParameter);
        }
        let _ = self.calls.push(PwmCall::ConfigurePeriodicEvent(repetition));
        self.repetition = repetition;
        self.hook = Some(hook);
        Ok(())
    }

    fn enable_periodic_event(&mut self) -> HalResult<()> {
        if self.hook.is_none() {
            return Err(HalError::NotConfigured);
        }
        let _ = self.calls.push(PwmCall::EnablePeriodicEvent);
        self.enabled = true;
        Ok(())
    }

    fn disable_periodic_event(&mut self) -> HalResult<()> {
        let _ = self.calls.push(PwmCall::DisablePeriodicEvent);
        self.enabled = false;
        Ok(())
    }

    fn repetition(&self) -> u32 {
        self.repetition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() {}

    #[test]
    fn test_mock_pwm_periodic_event() {
        let mut pwm = MockPwm::new(5);
        pwm.configure_periodic_event(10, noop).unwrap();
        assert_eq!(pwm.repetition(), 10);

        pwm.enable_periodic_event().unwrap();
        assert!(pwm.is_event_enabled());

        pwm.disable_periodic_event().unwrap();
        assert!(!pwm.is_event_enabled());
    }

    #[test]
    fn test_mock_pwm_unconfigured() {
        let mut pwm = MockPwm::unconfigured();
        assert_eq!(pwm.base_period_us(), 0);
        assert_eq!(
            pwm.configure_periodic_event(10, noop),
            Err(HalError::NotConfigured)
        );
    }
}
