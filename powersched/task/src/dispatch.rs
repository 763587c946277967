//! Acquisition dispatch coordination
//!
//! When the application asks the scheduler to manage acquisition and nobody
//! started sampling yet, the scheduler becomes the dispatch trigger: every
//! tick runs a full dispatch right before the control routine, so the
//! routine always sees samples from its own period.

use core::num::NonZeroU32;

use hal::{Acquisition, DispatchMode, PwmGenerator};
use log::{debug, warn};
use powersched_core::{InterruptSource, SchedError, SchedResult};

use crate::backend::PwmBackend;
use crate::task::TaskDefinition;

/// Who triggers acquisition dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchState {
    owned: bool,
    repetition_factor: u32,
}

impl DispatchState {
    pub const fn new() -> Self {
        Self {
            owned: false,
            repetition_factor: 0,
        }
    }

    /// Whether the tick handler runs the dispatch
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Base periods per dispatch, only while owned
    pub fn repetition_factor(&self) -> Option<u32> {
        self.owned.then_some(self.repetition_factor)
    }

    /// Take over dispatch unless acquisition already runs on its own.
    ///
    /// `cadence` is the number of PWM base periods per tick, see
    /// [`cadence`]. Nothing is touched on failure.
    pub(crate) fn claim<A: Acquisition>(
        &mut self,
        acquisition: &mut A,
        cadence: Option<NonZeroU32>,
    ) -> SchedResult<()> {
        if self.owned {
            return self.refresh(acquisition, cadence);
        }

        if acquisition.is_started() {
            debug!("acquisition already started, dispatch left to it");
            return Ok(());
        }

        let factor = Self::required(cadence)?;

        acquisition.set_dispatch_mode(DispatchMode::ExternallyTriggered);
        acquisition.set_repetition_factor(factor);
        acquisition.start().map_err(|err| {
            warn!("acquisition refused to start: {}", err);
            SchedError::AcquisitionUnavailable
        })?;

        self.owned = true;
        self.repetition_factor = factor;
        debug!("dispatch owned by scheduler, {} samples per dispatch", factor);
        Ok(())
    }

    /// Resync the repetition factor after the task was redefined
    fn refresh<A: Acquisition>(
        &mut self,
        acquisition: &mut A,
        cadence: Option<NonZeroU32>,
    ) -> SchedResult<()> {
        let factor = Self::required(cadence)?;
        if factor != self.repetition_factor {
            acquisition.set_repetition_factor(factor);
            self.repetition_factor = factor;
            debug!("dispatch repetition factor now {}", factor);
        }
        Ok(())
    }

    fn required(cadence: Option<NonZeroU32>) -> SchedResult<u32> {
        match cadence {
            Some(factor) => Ok(factor.get()),
            None => {
                warn!("cannot own dispatch: no whole number of base periods per tick");
                Err(SchedError::AcquisitionUnavailable)
            }
        }
    }
}

/// PWM base periods elapsing between two ticks of `definition`.
///
/// A PWM-paced task reads the repetition back from the generator. A
/// timer-paced task truncates its period to whole base periods. `None` when
/// the generator is unconfigured or the task is faster than one base period.
pub(crate) fn cadence<P: PwmGenerator>(
    pwm: &PwmBackend<P>,
    definition: &TaskDefinition,
) -> Option<NonZeroU32> {
    match definition.source {
        InterruptSource::PwmSynchronized => NonZeroU32::new(pwm.driver().repetition()),
        _ => pwm
            .base_period()
            .and_then(|base| NonZeroU32::new(definition.period.floor_repetitions(base))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal::mock::{AcquisitionCall, MockAcquisition, MockPwm};
    use powersched_core::Period;

    fn control() {}
    fn hook() {}

    fn every(base_periods: u32) -> Option<NonZeroU32> {
        NonZeroU32::new(base_periods)
    }

    fn definition(period_us: u32, source: InterruptSource) -> TaskDefinition {
        TaskDefinition {
            callback: control,
            period: Period::from_micros(period_us).unwrap(),
            source,
        }
    }

    #[test]
    fn claims_idle_acquisition() {
        let mut acq = MockAcquisition::new();
        let mut state = DispatchState::new();

        state.claim(&mut acq, every(10)).unwrap();

        assert!(state.is_owned());
        assert_eq!(state.repetition_factor(), Some(10));
        assert_eq!(
            acq.calls(),
            &[
                AcquisitionCall::SetDispatchMode(DispatchMode::ExternallyTriggered),
                AcquisitionCall::SetRepetitionFactor(10),
                AcquisitionCall::Start,
            ]
        );
    }

    #[test]
    fn leaves_started_acquisition_alone() {
        let mut acq = MockAcquisition::already_started();
        let mut state = DispatchState::new();

        state.claim(&mut acq, every(10)).unwrap();

        assert!(!state.is_owned());
        assert_eq!(state.repetition_factor(), None);
        assert!(acq.calls().is_empty());
    }

    #[test]
    fn unknown_cadence_takes_nothing() {
        let mut acq = MockAcquisition::new();
        let mut state = DispatchState::new();

        assert_eq!(state.claim(&mut acq, None), Err(SchedError::AcquisitionUnavailable));
        assert!(!state.is_owned());
        assert!(acq.calls().is_empty());
    }

    #[test]
    fn ownership_survives_restart() {
        let mut acq = MockAcquisition::new();
        let mut state = DispatchState::new();

        state.claim(&mut acq, every(10)).unwrap();
        // acquisition now reports itself started
        state.claim(&mut acq, every(10)).unwrap();
        assert!(state.is_owned());
        assert_eq!(acq.calls().len(), 3);

        state.claim(&mut acq, every(20)).unwrap();
        assert_eq!(state.repetition_factor(), Some(20));
        assert_eq!(acq.calls().last(), Some(&AcquisitionCall::SetRepetitionFactor(20)));
    }

    #[test]
    fn timer_cadence_is_truncated() {
        let pwm = PwmBackend::new(MockPwm::new(5));
        let timer_task = definition(53, InterruptSource::TimerPeripheral);
        assert_eq!(cadence(&pwm, &timer_task), every(10));

        let too_fast = definition(3, InterruptSource::TimerPeripheral);
        assert_eq!(cadence(&pwm, &too_fast), None);

        let unconfigured = PwmBackend::new(MockPwm::unconfigured());
        assert_eq!(cadence(&unconfigured, &timer_task), None);
    }

    #[test]
    fn pwm_cadence_is_read_from_generator() {
        let mut pwm = MockPwm::new(5);
        let pwm_task = definition(50, InterruptSource::PwmSynchronized);
        assert_eq!(cadence(&PwmBackend::new(MockPwm::new(5)), &pwm_task), None);

        pwm.configure_periodic_event(4, hook).unwrap();
        assert_eq!(cadence(&PwmBackend::new(pwm), &pwm_task), every(4));
    }
}
