#![no_std]
#![forbid(unsafe_code)]

//! # fastpwm controller
//!
//! One [`Controller`] drives every supported chip. What differs between
//! chips (timers, counter widths, prescaler tables, pins, interrupt vectors
//! and register bit positions) lives in the [`chips`] capability tables.
//!
//! ```ignore
//! static DISPATCH: DispatchTable = DispatchTable::new();
//!
//! let config = ControllerConfig::new(&chips::ATMEGA328P);
//! let mut pwm = Controller::new(config, regs, pins, &DISPATCH);
//! pwm.set(TimerId::T1, SubChannel::A, ChannelConfig::new(1000))?;
//! pwm.start(TimerId::T1)?;
//! ```

#[macro_use]
mod fmt;

pub mod capability;
pub mod chips;
pub mod controller;
pub mod dispatch;
pub mod duty;

pub use capability::*;
pub use controller::*;
pub use dispatch::*;
pub use duty::*;

pub use fastpwm_core::*;

/// Dispatch slots available to a chip table
pub const MAX_VECTORS: usize = 16;

/// Timers a chip table may declare
pub const MAX_TIMERS: usize = 5;

/// Base clock assumed when none is configured (the usual AVR `F_CPU`)
pub const DEFAULT_BASE_CLOCK_HZ: u32 = 16_000_000;
