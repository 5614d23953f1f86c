//! ATtiny25/45/85
//!
//! Timer1 has no waveform-generation bits. PWM is switched on per output
//! with `PWM1A` (TCCR1) and `PWM1B` (GTCCR), and OCR1C is always top.

use super::{compare, overflow, pwm, pwm_with_enable, toggle, TIMER0_FAST_PWM};
use crate::capability::*;
use fastpwm_core::{CounterWidth, Field, PrescalerTable, Reg, SubChannel, TimerId};

// TIMSK = [ - | OCIE1A | OCIE1B | OCIE0A | OCIE0B | TOIE1 | TOIE0 | - ]
pub static ATTINY_X5: ChipCapabilities = ChipCapabilities {
    name: "ATtinyX5",
    timers: &[
        TimerCapability {
            id: TimerId::T0,
            width: CounterWidth::Bits8,
            table: PrescalerTable::Linear,
            top: Reg::Ocr0a,
            clock_select: Field::new(Reg::Tccr0b, 0, 3),
            waveform: TIMER0_FAST_PWM,
            outputs: &[
                toggle(SubChannel::A, 0, Reg::Ocr0a, Field::new(Reg::Tccr0a, 6, 2)),
                pwm(SubChannel::B, 1, Reg::Ocr0b, Field::new(Reg::Tccr0a, 4, 2)),
            ],
            vectors: &[
                overflow(0, Field::bit(Reg::Timsk, 1)),
                compare(SubChannel::A, 1, Field::bit(Reg::Timsk, 4)),
                compare(SubChannel::B, 2, Field::bit(Reg::Timsk, 3)),
            ],
        },
        TimerCapability {
            id: TimerId::T1,
            width: CounterWidth::Bits8,
            table: PrescalerTable::Extended,
            top: Reg::Ocr1c,
            clock_select: Field::new(Reg::Tccr1, 0, 4),
            waveform: &[],
            outputs: &[
                pwm_with_enable(
                    SubChannel::A,
                    1,
                    Reg::Ocr1a,
                    Field::new(Reg::Tccr1, 4, 2),
                    Field::bit(Reg::Tccr1, 6),
                ),
                pwm_with_enable(
                    SubChannel::B,
                    4,
                    Reg::Ocr1b,
                    Field::new(Reg::Gtccr, 4, 2),
                    Field::bit(Reg::Gtccr, 6),
                ),
            ],
            vectors: &[
                overflow(3, Field::bit(Reg::Timsk, 2)),
                compare(SubChannel::A, 4, Field::bit(Reg::Timsk, 6)),
                compare(SubChannel::B, 5, Field::bit(Reg::Timsk, 5)),
            ],
        },
    ],
};
