//! Capability tables of the supported chips
//!
//! | Chip       |   | Timer0 | Timer1  | Timer2 | Timer3  | Timer4  |
//! |------------|---|--------|---------|--------|---------|---------|
//! | ATtinyX5   |   | 8b PS  | 8b ePS  |        |         |         |
//! |            | A | 0 (T)  | 1       |        |         |         |
//! |            | B | 1      | 4       |        |         |         |
//! | ATmega328p |   | 8b PS  | 16b PS  | 8b PS  |         |         |
//! |            | A | 6 (T)  | 9       | 12 (T) |         |         |
//! |            | B | 5      | 10      | 3      |         |         |
//! | ATmega32u4 |   | 8b PS  | 16b PS  |        | 16b PS  | 8b ePS  |
//! |            | A | 11 (T) | 9       |        | 5       | 13      |
//! |            | B | 3      | 10      |        |         | 10      |
//! |            | C |        | 11      |        |         |         |
//! |            | D |        |         |        |         | 6       |
//!
//! PS is the linear prescaler table, ePS the extended one. (T) marks toggle
//! outputs, whose frequency is half the programmed one at a fixed 50% duty.

mod atmega328p;
mod atmega32u4;
mod attiny_x5;

pub use atmega328p::ATMEGA328P;
pub use atmega32u4::ATMEGA32U4;
pub use attiny_x5::ATTINY_X5;

use crate::capability::*;
use fastpwm_core::{Field, FieldValue, InterruptSource, Reg, SubChannel};

/// Every supported chip
pub static ALL: [&ChipCapabilities; 3] = [&ATTINY_X5, &ATMEGA328P, &ATMEGA32U4];

/// Look a chip up by name, ignoring case.
///
/// Accepts the table names plus common part and board aliases.
pub fn by_name(name: &str) -> Option<&'static ChipCapabilities> {
    static ALIASES: [(&str, &ChipCapabilities); 11] = [
        ("attinyx5", &ATTINY_X5),
        ("attiny25", &ATTINY_X5),
        ("attiny45", &ATTINY_X5),
        ("attiny85", &ATTINY_X5),
        ("atmega328p", &ATMEGA328P),
        ("atmega328", &ATMEGA328P),
        ("uno", &ATMEGA328P),
        ("nano", &ATMEGA328P),
        ("atmega32u4", &ATMEGA32U4),
        ("leonardo", &ATMEGA32U4),
        ("micro", &ATMEGA32U4),
    ];

    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, chip)| *chip)
}

/// Timer0 fast PWM with OCR0A as top: WGM0[2:0] = 0b111.
/// Timer0's layout is shared by all three chips.
const TIMER0_FAST_PWM: &[FieldValue] = &[
    FieldValue::new(Field::new(Reg::Tccr0a, 0, 2), 0b11),
    FieldValue::new(Field::bit(Reg::Tccr0b, 3), 1),
];

const fn overflow(slot: u8, enable: Field) -> Vector {
    Vector {
        source: InterruptSource::Overflow,
        slot: VectorSlot(slot),
        enable,
    }
}

const fn compare(sub: SubChannel, slot: u8, enable: Field) -> Vector {
    Vector {
        source: InterruptSource::Compare(sub),
        slot: VectorSlot(slot),
        enable,
    }
}

const fn toggle(sub: SubChannel, pin: u8, compare: Reg, com: Field) -> OutputCapability {
    OutputCapability {
        sub,
        pin,
        compare,
        mode: OutputMode::Toggle { com },
    }
}

const fn pwm(sub: SubChannel, pin: u8, compare: Reg, com: Field) -> OutputCapability {
    OutputCapability {
        sub,
        pin,
        compare,
        mode: OutputMode::Pwm { com, enable: None },
    }
}

const fn pwm_with_enable(
    sub: SubChannel,
    pin: u8,
    compare: Reg,
    com: Field,
    enable: Field,
) -> OutputCapability {
    OutputCapability {
        sub,
        pin,
        compare,
        mode: OutputMode::Pwm {
            com,
            enable: Some(enable),
        },
    }
}
