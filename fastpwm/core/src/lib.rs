#![no_std]
#![forbid(unsafe_code)]

//! # fastpwm core
//!
//! Core types for configuring fast-PWM output on 8/16-bit timer/counters.
//! This crate holds the pure frequency-to-register resolver and the
//! abstractions the controller is written against: symbolic register access,
//! the pin service and interrupt handler references.

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

pub mod channel;
pub mod handler;
pub mod prescaler;
pub mod registers;

pub use channel::*;
pub use handler::*;
pub use prescaler::*;
pub use registers::*;

/// fastpwm version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout fastpwm
pub type PwmResult<T> = Result<T, PwmError>;

/// Errors reported for inputs the hardware cannot honour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// Requested frequency of 0 Hz
    ZeroFrequency,
    /// Requested frequency is above the counter's base clock
    FrequencyOutOfRange {
        frequency_hz: u32,
        base_clock_hz: u32,
    },
    /// Duty cycle divisor of 0
    ZeroDutyDivisor,
    /// The active chip has no such timer
    UnknownTimer(TimerId),
    /// The timer has no such output-compare sub-channel
    UnknownChannel { timer: TimerId, sub: SubChannel },
    /// The timer has no interrupt vector for this source
    NoInterruptVector {
        timer: TimerId,
        source: InterruptSource,
    },
    /// Toggle outputs run at a fixed 50% duty cycle
    FixedDuty { timer: TimerId, sub: SubChannel },
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PwmError::ZeroFrequency => write!(f, "Frequency must be non-zero"),
            PwmError::FrequencyOutOfRange {
                frequency_hz,
                base_clock_hz,
            } => write!(
                f,
                "Frequency {}Hz exceeds base clock {}Hz",
                frequency_hz, base_clock_hz
            ),
            PwmError::ZeroDutyDivisor => write!(f, "Duty cycle divisor must be non-zero"),
            PwmError::UnknownTimer(timer) => write!(f, "No {} on this chip", timer),
            PwmError::UnknownChannel { timer, sub } => {
                write!(f, "{} has no output {}", timer, sub)
            }
            PwmError::NoInterruptVector { timer, source } => {
                write!(f, "{} has no {} interrupt", timer, source)
            }
            PwmError::FixedDuty { timer, sub } => {
                write!(f, "{} output {} only toggles, duty is fixed", timer, sub)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PwmError {}

#[cfg(feature = "defmt")]
impl defmt::Format for PwmError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PwmError::ZeroFrequency => defmt::write!(fmt, "ZeroFrequency"),
            PwmError::FrequencyOutOfRange {
                frequency_hz,
                base_clock_hz,
            } => defmt::write!(
                fmt,
                "FrequencyOutOfRange({=u32}Hz > {=u32}Hz)",
                frequency_hz,
                base_clock_hz
            ),
            PwmError::ZeroDutyDivisor => defmt::write!(fmt, "ZeroDutyDivisor"),
            PwmError::UnknownTimer(timer) => defmt::write!(fmt, "UnknownTimer({})", timer),
            PwmError::UnknownChannel { timer, sub } => {
                defmt::write!(fmt, "UnknownChannel({}, {})", timer, sub)
            }
            PwmError::NoInterruptVector { timer, source } => {
                defmt::write!(fmt, "NoInterruptVector({}, {})", timer, source)
            }
            PwmError::FixedDuty { timer, sub } => {
                defmt::write!(fmt, "FixedDuty({}, {})", timer, sub)
            }
        }
    }
}

impl embedded_hal::pwm::Error for PwmError {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

