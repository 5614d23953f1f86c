//! Timer channel controller
//!
//! The controller owns the register file and pin service, borrows a
//! [`DispatchTable`] and keeps one record per timer of the active chip:
//! the last resolved prescaler/period, whether the counter is running and
//! the pulse width and polarity each sub-channel was configured with.
//!
//! Configuration never starts a counter. `set` programs top, compare, mode
//! and pin direction and remembers the prescaler index; `start` writes that
//! index into the clock-select field, `stop` clears it again.

use heapless::Vec;

use fastpwm_core::{
    resolve, ChannelConfig, Field, Handler, InterruptSource, OutputPins, Polarity, PwmError,
    PwmResult, RegisterAccess, Resolution, SubChannel, Target, TimerId, HALTED,
};

use crate::{
    ChipCapabilities, DispatchTable, OutputCapability, OutputMode, TimerCapability, Vector,
    DEFAULT_BASE_CLOCK_HZ, MAX_TIMERS,
};

/// Controller configuration
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Capability table of the chip being driven
    pub chip: &'static ChipCapabilities,
    /// Clock feeding the timer prescalers
    pub base_clock_hz: u32,
}

impl ControllerConfig {
    pub const fn new(chip: &'static ChipCapabilities) -> Self {
        Self {
            chip,
            base_clock_hz: DEFAULT_BASE_CLOCK_HZ,
        }
    }

    pub const fn builder(chip: &'static ChipCapabilities) -> ControllerConfigBuilder {
        ControllerConfigBuilder {
            config: Self::new(chip),
        }
    }
}

/// Builder for [`ControllerConfig`]
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    /// Sets the clock feeding the prescalers.
    pub const fn base_clock_hz(mut self, hz: u32) -> Self {
        self.config.base_clock_hz = hz;
        self
    }

    /// Switches to another chip table.
    pub const fn chip(mut self, chip: &'static ChipCapabilities) -> Self {
        self.config.chip = chip;
        self
    }

    pub const fn build(self) -> ControllerConfig {
        self.config
    }
}

/// Lifecycle of a sub-channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerPhase {
    /// Never configured
    #[default]
    Idle,
    /// Registers programmed, counter halted
    Configured,
    /// Prescaler written, counter running
    Running,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerPhase {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TimerPhase::Idle => defmt::write!(fmt, "Idle"),
            TimerPhase::Configured => defmt::write!(fmt, "Configured"),
            TimerPhase::Running => defmt::write!(fmt, "Running"),
        }
    }
}

/// Snapshot of one sub-channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStatus {
    pub timer: TimerId,
    pub sub: SubChannel,
    pub pin: u8,
    pub phase: TimerPhase,
    /// Clock-select value written by `start`
    pub prescaler_index: u8,
    pub prescaler: u16,
    /// Top value of the counter
    pub period: u32,
    /// Compare value; equals `period` on toggle outputs
    pub pulse_width: u32,
    pub polarity: Polarity,
    pub toggle: bool,
}

#[derive(Debug, Clone, Copy)]
struct ChannelRecord {
    pulse_width: u32,
    polarity: Polarity,
}

#[derive(Debug)]
struct TimerState {
    cap: &'static TimerCapability,
    resolution: Option<Resolution>,
    running: bool,
    channels: [Option<ChannelRecord>; SubChannel::ALL.len()],
}

impl TimerState {
    const fn new(cap: &'static TimerCapability) -> Self {
        Self {
            cap,
            resolution: None,
            running: false,
            channels: [None; SubChannel::ALL.len()],
        }
    }

    fn phase(&self) -> TimerPhase {
        match (self.resolution, self.running) {
            (None, _) => TimerPhase::Idle,
            (Some(_), false) => TimerPhase::Configured,
            (Some(_), true) => TimerPhase::Running,
        }
    }
}

/// Fast-PWM controller for one chip
pub struct Controller<'d, R, G> {
    regs: R,
    pins: G,
    config: ControllerConfig,
    dispatch: &'d DispatchTable,
    timers: Vec<TimerState, MAX_TIMERS>,
}

impl<'d, R, G> Controller<'d, R, G>
where
    R: RegisterAccess,
    G: OutputPins,
{
    pub fn new(config: ControllerConfig, regs: R, pins: G, dispatch: &'d DispatchTable) -> Self {
        let mut timers = Vec::new();
        for cap in config.chip.timers.iter().take(MAX_TIMERS) {
            let _ = timers.push(TimerState::new(cap));
        }

        Self {
            regs,
            pins,
            config,
            dispatch,
            timers,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn chip(&self) -> &'static ChipCapabilities {
        self.config.chip
    }

    pub fn dispatch_table(&self) -> &'d DispatchTable {
        self.dispatch
    }

    /// Direct access to the register file
    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    pub fn pins(&self) -> &G {
        &self.pins
    }

    /// Give back the register file and pin service
    pub fn release(self) -> (R, G) {
        (self.regs, self.pins)
    }

    /// Configure one sub-channel.
    ///
    /// Programs top, compare value, pin direction, compare-output mode and
    /// waveform bits, then records the prescaler index for [`start`]. A
    /// running counter keeps its current prescaler until the next `start`.
    ///
    /// Top and prescaler are shared by every sub-channel of the timer, so
    /// the most recent call decides the timer's frequency. Polarity and
    /// pulse width stay per sub-channel.
    ///
    /// [`start`]: Controller::start
    pub fn set(
        &mut self,
        timer: TimerId,
        sub: SubChannel,
        channel: ChannelConfig,
    ) -> PwmResult<Resolution> {
        let base_clock_hz = self.config.base_clock_hz;
        if channel.frequency_hz == 0 {
            return Err(PwmError::ZeroFrequency);
        }
        if channel.frequency_hz > base_clock_hz {
            return Err(PwmError::FrequencyOutOfRange {
                frequency_hz: channel.frequency_hz,
                base_clock_hz,
            });
        }
        if channel.duty_divisor == 0 {
            return Err(PwmError::ZeroDutyDivisor);
        }

        let position = self.position(timer)?;
        let cap = self.timers[position].cap;
        let output = Self::output_of(cap, sub)?;

        let resolution = resolve(base_clock_hz, channel.frequency_hz, cap.width, cap.table);
        if !resolution.fits(cap.width) {
            warn!(
                "{} period {=u32} exceeds {} counter",
                timer,
                resolution.period,
                cap.width
            );
        }
        debug!(
            "{}{}: {=u32}Hz -> cs {=u8} (/{=u16}), top {=u32}",
            timer,
            sub,
            channel.frequency_hz,
            resolution.index,
            resolution.prescaler,
            resolution.period
        );

        let max = cap.width.max_count();
        self.regs.write(cap.top, (resolution.period & max) as u16);

        let record = match output.mode {
            OutputMode::Toggle { com } => {
                self.pins.set_output(output.pin);
                self.regs.write_field(com, 1);
                ChannelRecord {
                    pulse_width: resolution.period,
                    polarity: Polarity::NonInverting,
                }
            }
            OutputMode::Pwm { com, enable } => {
                let pulse_width = resolution.pulse_width(channel.duty_divisor);
                self.regs.write(output.compare, (pulse_width & max) as u16);
                self.pins.set_output(output.pin);
                self.regs.write_field(com, channel.polarity.com_bits());
                if let Some(enable) = enable {
                    self.regs.write_field(enable, 1);
                }
                ChannelRecord {
                    pulse_width,
                    polarity: channel.polarity,
                }
            }
        };

        for value in cap.waveform {
            self.regs.write_field(value.field, value.value);
        }

        let state = &mut self.timers[position];
        state.resolution = Some(resolution);
        state.channels[sub.index()] = Some(record);

        Ok(resolution)
    }

    /// [`set`](Controller::set) with a 50% duty cycle and normal polarity
    pub fn set_frequency(
        &mut self,
        timer: TimerId,
        sub: SubChannel,
        frequency_hz: u32,
    ) -> PwmResult<Resolution> {
        self.set(timer, sub, ChannelConfig::new(frequency_hz))
    }

    /// Start the targeted timers with their last configured prescaler.
    ///
    /// Each timer is stopped first, then its overflow vector and the compare
    /// vectors holding a handler are enabled, then the clock-select field is
    /// written. The whole sequence runs in one critical section. Timers that
    /// were never configured stay halted.
    pub fn start(&mut self, target: impl Into<Target>) -> PwmResult<()> {
        let target = self.check_target(target.into())?;
        critical_section::with(|_| {
            for position in 0..self.timers.len() {
                if !target.includes(self.timers[position].cap.id) {
                    continue;
                }
                self.halt(position);

                let state = &self.timers[position];
                let cap = state.cap;
                let Some(resolution) = state.resolution else {
                    continue;
                };

                for vector in cap.vectors {
                    let wanted = match vector.source {
                        InterruptSource::Overflow => true,
                        InterruptSource::Compare(_) => self.dispatch.is_attached(vector.slot),
                    };
                    if wanted {
                        self.regs.write_field(vector.enable, 1);
                    }
                }
                self.regs.write_field(cap.clock_select, resolution.index as u16);
                self.timers[position].running = true;
                debug!("{} started, cs {=u8}", cap.id, resolution.index);
            }
        });
        Ok(())
    }

    /// Halt the targeted timers and disable their interrupts.
    ///
    /// Top and compare registers keep their values and the prescaler index
    /// stays recorded, so a later `start` resumes the same frequency.
    pub fn stop(&mut self, target: impl Into<Target>) -> PwmResult<()> {
        let target = self.check_target(target.into())?;
        for position in 0..self.timers.len() {
            if target.includes(self.timers[position].cap.id) {
                self.halt(position);
            }
        }
        Ok(())
    }

    /// Bind `handler` to a timer interrupt.
    ///
    /// The vector is disabled while its slot is swapped and enabled again
    /// afterwards, so the interrupt never sees a half-replaced handler.
    pub fn attach_interrupt(
        &mut self,
        timer: TimerId,
        source: InterruptSource,
        handler: fn(),
    ) -> PwmResult<()> {
        let vector = self.vector_of(timer, source)?;
        self.swap_handler(vector, Handler::new(handler));
        debug!("{} {} handler attached", timer, source);
        Ok(())
    }

    /// Put the no-op handler back into a timer interrupt's slot.
    ///
    /// The vector is re-enabled afterwards, dispatching to the empty handler.
    pub fn detach_interrupt(&mut self, timer: TimerId, source: InterruptSource) -> PwmResult<()> {
        let vector = self.vector_of(timer, source)?;
        self.swap_handler(vector, Handler::Empty);
        debug!("{} {} handler detached", timer, source);
        Ok(())
    }

    /// Whether an interrupt's enable bit is currently set
    pub fn interrupt_enabled(&self, timer: TimerId, source: InterruptSource) -> PwmResult<bool> {
        let vector = self.vector_of(timer, source)?;
        Ok(self.regs.read_field(vector.enable) != 0)
    }

    /// Raw compare register of a sub-channel
    pub fn get_register(&self, timer: TimerId, sub: SubChannel) -> PwmResult<u16> {
        let output = self.output(timer, sub)?;
        Ok(self.regs.read(output.compare))
    }

    /// Overwrite a sub-channel's compare register, bypassing the resolver
    pub fn set_register(&mut self, timer: TimerId, sub: SubChannel, value: u16) -> PwmResult<()> {
        let output = self.output(timer, sub)?;
        self.regs.write(output.compare, value);
        Ok(())
    }

    /// Raw top register of a timer
    pub fn period_register(&self, timer: TimerId) -> PwmResult<u16> {
        let cap = self.timer(timer)?;
        Ok(self.regs.read(cap.top))
    }

    /// Frequency the timer produces with its recorded prescaler and the
    /// live top register. 0 when the timer was never configured.
    pub fn output_frequency(&self, timer: TimerId) -> PwmResult<u32> {
        let state = &self.timers[self.position(timer)?];
        let Some(resolution) = state.resolution else {
            return Ok(0);
        };
        let top = self.regs.read(state.cap.top) as u32;
        Ok(fastpwm_core::output_frequency(
            self.config.base_clock_hz,
            resolution.prescaler,
            top,
        ))
    }

    /// Frequency seen on a sub-channel's pin; toggle outputs run at half
    /// the timer frequency.
    pub fn channel_frequency(&self, timer: TimerId, sub: SubChannel) -> PwmResult<u32> {
        let output = self.output(timer, sub)?;
        let frequency = self.output_frequency(timer)?;
        Ok(if output.mode.is_toggle() {
            frequency / 2
        } else {
            frequency
        })
    }

    /// Status snapshot of a sub-channel
    pub fn channel(&self, timer: TimerId, sub: SubChannel) -> PwmResult<ChannelStatus> {
        let state = &self.timers[self.position(timer)?];
        let output = Self::output_of(state.cap, sub)?;
        let record = state.channels[sub.index()];
        let resolution = state.resolution;

        let phase = match record {
            Some(_) => state.phase(),
            None => TimerPhase::Idle,
        };
        let (prescaler_index, prescaler, period) = match resolution {
            Some(r) => (r.index, r.prescaler, r.period),
            None => (HALTED, 0, 0),
        };

        Ok(ChannelStatus {
            timer,
            sub,
            pin: output.pin,
            phase,
            prescaler_index,
            prescaler,
            period,
            pulse_width: record.map_or(0, |r| r.pulse_width),
            polarity: record.map_or(Polarity::NonInverting, |r| r.polarity),
            toggle: output.mode.is_toggle(),
        })
    }

    /// Capability entry of a timer
    pub fn timer(&self, timer: TimerId) -> PwmResult<&'static TimerCapability> {
        Ok(self.timers[self.position(timer)?].cap)
    }

    /// Capability entry of a sub-channel
    pub fn output(&self, timer: TimerId, sub: SubChannel) -> PwmResult<&'static OutputCapability> {
        Self::output_of(self.timer(timer)?, sub)
    }

    fn position(&self, timer: TimerId) -> PwmResult<usize> {
        self.timers
            .iter()
            .position(|state| state.cap.id == timer)
            .ok_or(PwmError::UnknownTimer(timer))
    }

    fn output_of(
        cap: &'static TimerCapability,
        sub: SubChannel,
    ) -> PwmResult<&'static OutputCapability> {
        cap.output(sub)
            .ok_or(PwmError::UnknownChannel { timer: cap.id, sub })
    }

    fn vector_of(&self, timer: TimerId, source: InterruptSource) -> PwmResult<&'static Vector> {
        self.timer(timer)?
            .vector(source)
            .ok_or(PwmError::NoInterruptVector { timer, source })
    }

    fn check_target(&self, target: Target) -> PwmResult<Target> {
        if let Target::Timer(timer) = target {
            self.position(timer)?;
        }
        Ok(target)
    }

    fn halt(&mut self, position: usize) {
        let cap = self.timers[position].cap;
        self.regs.write_field(cap.clock_select, HALTED as u16);
        for vector in cap.vectors {
            self.regs.write_field(vector.enable, 0);
        }
        if self.timers[position].running {
            debug!("{} stopped", cap.id);
        }
        self.timers[position].running = false;
    }

    fn swap_handler(&mut self, vector: &Vector, handler: Handler) {
        self.set_enable(vector.enable, false);
        self.dispatch.replace(vector.slot, handler);
        self.set_enable(vector.enable, true);
    }

    fn set_enable(&mut self, enable: Field, on: bool) {
        self.regs.write_field(enable, on as u16);
    }
}
