use fastpwm_core::{SubChannel, TimerId};
use fastpwm_ctl::{chips, ChipCapabilities};
use thiserror::Error;

/// Command-line values that do not name anything on the supported chips.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("unknown chip `{0}` (known: {1})")]
    UnknownChip(String, String),
    #[error("invalid timer `{0}`: expected 0-4, optionally prefixed with `t` or `timer`")]
    InvalidTimer(String),
    #[error("invalid channel `{0}`: expected one letter A-D")]
    InvalidChannel(String),
}

pub fn parse_chip(input: &str) -> Result<&'static ChipCapabilities, ArgError> {
    chips::by_name(input).ok_or_else(|| {
        let known: Vec<_> = chips::ALL.iter().map(|chip| chip.name).collect();
        ArgError::UnknownChip(input.to_string(), known.join(", "))
    })
}

/// Accepts `1`, `t1` and `timer1`, in any case.
pub fn parse_timer(input: &str) -> Result<TimerId, ArgError> {
    let lower = input.trim().to_ascii_lowercase();
    let digits = lower
        .strip_prefix("timer")
        .or_else(|| lower.strip_prefix('t'))
        .unwrap_or(lower.as_str());

    match digits.parse::<u8>() {
        Ok(n) if n <= TimerId::T4.raw() => Ok(TimerId(n)),
        _ => Err(ArgError::InvalidTimer(input.to_string())),
    }
}

pub fn parse_channel(input: &str) -> Result<SubChannel, ArgError> {
    let mut chars = input.trim().chars();
    let sub = match (chars.next(), chars.next()) {
        (Some(letter), None) => SubChannel::from_letter(letter),
        _ => None,
    };
    sub.ok_or_else(|| ArgError::InvalidChannel(input.to_string()))
}
