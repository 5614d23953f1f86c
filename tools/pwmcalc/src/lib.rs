//! Host-side fast-PWM register calculator.
//!
//! Runs the controller against the simulated register file so the register
//! programme for a frequency can be inspected without a board attached.

pub mod args;
pub mod format;
pub mod report;

pub use args::{parse_channel, parse_chip, parse_timer, ArgError};
pub use report::{chip_reports, resolve, ChipReport, Programme, Request};
