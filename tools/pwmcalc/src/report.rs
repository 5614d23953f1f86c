//! Register programmes and chip summaries

use fastpwm_core::{ChannelConfig, Polarity, PwmResult, SubChannel, TimerId};
use fastpwm_ctl::{chips, ChipCapabilities, ControllerConfig, DispatchTable, OutputMode};
use serde::Serialize;

/// One `resolve` invocation
#[derive(Debug, Clone, Copy)]
pub struct Request {
    pub chip: &'static ChipCapabilities,
    pub timer: TimerId,
    pub sub: SubChannel,
    pub frequency_hz: u32,
    pub duty_divisor: u16,
    pub inverted: bool,
    pub base_clock_hz: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterValue {
    pub name: &'static str,
    pub value: u16,
}

/// Outcome of configuring and starting one sub-channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Programme {
    pub chip: &'static str,
    pub timer: u8,
    pub channel: char,
    pub pin: u8,
    pub base_clock_hz: u32,
    pub requested_hz: u32,
    /// Frequency on the pin, halved for toggle outputs
    pub achieved_hz: u32,
    pub prescaler_index: u8,
    pub prescaler: u16,
    pub period: u32,
    pub pulse_width: u32,
    pub duty_divisor: u16,
    pub inverted: bool,
    pub toggle: bool,
    /// Whether the period fits the counter without truncation
    pub fits: bool,
    /// Every register left non-zero, in datasheet order
    pub registers: Vec<RegisterValue>,
}

/// Run `set` and `start` for `request` on a simulated chip.
pub fn resolve(request: &Request) -> PwmResult<Programme> {
    let dispatch = DispatchTable::new();
    let config = ControllerConfig::builder(request.chip)
        .base_clock_hz(request.base_clock_hz)
        .build();
    let mut pwm = fastpwm_sim::controller(config, &dispatch);

    let channel = ChannelConfig::new(request.frequency_hz)
        .duty_divisor(request.duty_divisor)
        .polarity(Polarity::from_inverted(request.inverted));
    let resolution = pwm.set(request.timer, request.sub, channel)?;
    pwm.start(request.timer)?;

    let width = pwm.timer(request.timer)?.width;
    let status = pwm.channel(request.timer, request.sub)?;
    let achieved_hz = pwm.channel_frequency(request.timer, request.sub)?;
    let registers = pwm
        .registers()
        .nonzero()
        .map(|(reg, value)| RegisterValue {
            name: reg.name(),
            value,
        })
        .collect();

    Ok(Programme {
        chip: request.chip.name,
        timer: request.timer.raw(),
        channel: request.sub.letter(),
        pin: status.pin,
        base_clock_hz: request.base_clock_hz,
        requested_hz: request.frequency_hz,
        achieved_hz,
        prescaler_index: resolution.index,
        prescaler: resolution.prescaler,
        period: resolution.period,
        pulse_width: status.pulse_width,
        duty_divisor: request.duty_divisor,
        inverted: status.polarity.is_inverted(),
        toggle: status.toggle,
        fits: resolution.fits(width),
        registers,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputReport {
    pub channel: char,
    pub pin: u8,
    pub mode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorReport {
    pub source: String,
    pub slot: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerReport {
    pub timer: u8,
    pub bits: u8,
    pub prescalers: &'static [u16],
    pub outputs: Vec<OutputReport>,
    pub vectors: Vec<VectorReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChipReport {
    pub name: &'static str,
    pub timers: Vec<TimerReport>,
}

impl ChipReport {
    pub fn new(chip: &ChipCapabilities) -> Self {
        let timers = chip
            .timers
            .iter()
            .map(|timer| TimerReport {
                timer: timer.id.raw(),
                bits: timer.width.bits(),
                prescalers: &timer.table.divisors()[1..],
                outputs: timer
                    .outputs
                    .iter()
                    .map(|output| OutputReport {
                        channel: output.sub.letter(),
                        pin: output.pin,
                        mode: match output.mode {
                            OutputMode::Toggle { .. } => "toggle",
                            OutputMode::Pwm { .. } => "pwm",
                        },
                    })
                    .collect(),
                vectors: timer
                    .vectors
                    .iter()
                    .map(|vector| VectorReport {
                        source: vector.source.to_string(),
                        slot: vector.slot.0,
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: chip.name,
            timers,
        }
    }
}

/// Summaries of every supported chip
pub fn chip_reports() -> Vec<ChipReport> {
    chips::ALL.iter().map(|chip| ChipReport::new(chip)).collect()
}
