//! `embedded-hal` duty-cycle adapter

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use fastpwm_core::{OutputPins, PwmError, PwmResult, RegisterAccess, SubChannel, TimerId};

use crate::{Controller, OutputCapability, TimerCapability};

/// One compare-match PWM output borrowed from a [`Controller`].
///
/// The maximum duty cycle is the timer's live top register, so the handle
/// follows any later `set` on the same timer.
pub struct PwmChannel<'c, 'd, R, G> {
    controller: &'c mut Controller<'d, R, G>,
    timer: &'static TimerCapability,
    output: &'static OutputCapability,
}

impl<'d, R, G> Controller<'d, R, G>
where
    R: RegisterAccess,
    G: OutputPins,
{
    /// Borrow a sub-channel as an [`embedded_hal::pwm::SetDutyCycle`].
    ///
    /// Toggle outputs have no adjustable duty and are refused.
    pub fn pwm_channel(
        &mut self,
        timer: TimerId,
        sub: SubChannel,
    ) -> PwmResult<PwmChannel<'_, 'd, R, G>> {
        let cap = self.timer(timer)?;
        let output = self.output(timer, sub)?;
        if output.mode.is_toggle() {
            return Err(PwmError::FixedDuty { timer, sub });
        }
        Ok(PwmChannel {
            controller: self,
            timer: cap,
            output,
        })
    }
}

impl<R, G> PwmChannel<'_, '_, R, G> {
    pub fn timer(&self) -> TimerId {
        self.timer.id
    }

    pub fn sub(&self) -> SubChannel {
        self.output.sub
    }
}

impl<R, G> ErrorType for PwmChannel<'_, '_, R, G> {
    type Error = PwmError;
}

impl<R, G> SetDutyCycle for PwmChannel<'_, '_, R, G>
where
    R: RegisterAccess,
    G: OutputPins,
{
    fn max_duty_cycle(&self) -> u16 {
        self.controller.registers().read(self.timer.top)
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), PwmError> {
        let duty = duty.min(self.max_duty_cycle());
        self.controller
            .registers_mut()
            .write(self.output.compare, duty);
        Ok(())
    }
}
