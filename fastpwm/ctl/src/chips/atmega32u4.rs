//! ATmega32u4 (Leonardo, Micro)
//!
//! Timer4 is the high-speed 10-bit timer run here in 8-bit mode. Like
//! Timer1 on the ATtinyX5 it takes the extended prescaler, keeps top in
//! OCR4C and needs a PWM enable bit per output.

use super::{compare, overflow, pwm, pwm_with_enable, toggle, TIMER0_FAST_PWM};
use crate::capability::*;
use fastpwm_core::{CounterWidth, Field, FieldValue, PrescalerTable, Reg, SubChannel, TimerId};

/// WGM1[3:0] = 0b1110: fast PWM, ICR1 as top
const TIMER1_FAST_PWM: &[FieldValue] = &[
    FieldValue::new(Field::new(Reg::Tccr1a, 0, 2), 0b10),
    FieldValue::new(Field::new(Reg::Tccr1b, 3, 2), 0b11),
];

/// WGM3[3:0] = 0b1110: fast PWM, ICR3 as top
const TIMER3_FAST_PWM: &[FieldValue] = &[
    FieldValue::new(Field::new(Reg::Tccr3a, 0, 2), 0b10),
    FieldValue::new(Field::new(Reg::Tccr3b, 3, 2), 0b11),
];

/// WGM4[1:0] = 0b00: fast PWM, OCR4C as top
const TIMER4_FAST_PWM: &[FieldValue] = &[FieldValue::new(Field::new(Reg::Tccr4d, 0, 2), 0b00)];

pub static ATMEGA32U4: ChipCapabilities = ChipCapabilities {
    name: "ATmega32u4",
    timers: &[
        TimerCapability {
            id: TimerId::T0,
            width: CounterWidth::Bits8,
            table: PrescalerTable::Linear,
            top: Reg::Ocr0a,
            clock_select: Field::new(Reg::Tccr0b, 0, 3),
            waveform: TIMER0_FAST_PWM,
            outputs: &[
                toggle(SubChannel::A, 11, Reg::Ocr0a, Field::new(Reg::Tccr0a, 6, 2)),
                pwm(SubChannel::B, 3, Reg::Ocr0b, Field::new(Reg::Tccr0a, 4, 2)),
            ],
            vectors: &[
                overflow(0, Field::bit(Reg::Timsk0, 0)),
                compare(SubChannel::A, 1, Field::bit(Reg::Timsk0, 1)),
                compare(SubChannel::B, 2, Field::bit(Reg::Timsk0, 2)),
            ],
        },
        TimerCapability {
            id: TimerId::T1,
            width: CounterWidth::Bits16,
            table: PrescalerTable::Linear,
            top: Reg::Icr1,
            clock_select: Field::new(Reg::Tccr1b, 0, 3),
            waveform: TIMER1_FAST_PWM,
            outputs: &[
                pwm(SubChannel::A, 9, Reg::Ocr1a, Field::new(Reg::Tccr1a, 6, 2)),
                pwm(SubChannel::B, 10, Reg::Ocr1b, Field::new(Reg::Tccr1a, 4, 2)),
                pwm(SubChannel::C, 11, Reg::Ocr1c, Field::new(Reg::Tccr1a, 2, 2)),
            ],
            // TIMSK1 = [ - | - | ICIE1 | - | OCIE1C | OCIE1B | OCIE1A | TOIE1 ]
            vectors: &[
                overflow(3, Field::bit(Reg::Timsk1, 0)),
                compare(SubChannel::A, 4, Field::bit(Reg::Timsk1, 1)),
                compare(SubChannel::B, 5, Field::bit(Reg::Timsk1, 2)),
                compare(SubChannel::C, 6, Field::bit(Reg::Timsk1, 3)),
            ],
        },
        TimerCapability {
            id: TimerId::T3,
            width: CounterWidth::Bits16,
            table: PrescalerTable::Linear,
            top: Reg::Icr3,
            clock_select: Field::new(Reg::Tccr3b, 0, 3),
            waveform: TIMER3_FAST_PWM,
            outputs: &[pwm(SubChannel::A, 5, Reg::Ocr3a, Field::new(Reg::Tccr3a, 6, 2))],
            vectors: &[
                overflow(7, Field::bit(Reg::Timsk3, 0)),
                compare(SubChannel::A, 8, Field::bit(Reg::Timsk3, 1)),
            ],
        },
        TimerCapability {
            id: TimerId::T4,
            width: CounterWidth::Bits8,
            table: PrescalerTable::Extended,
            top: Reg::Ocr4c,
            clock_select: Field::new(Reg::Tccr4b, 0, 4),
            waveform: TIMER4_FAST_PWM,
            outputs: &[
                pwm_with_enable(
                    SubChannel::A,
                    13,
                    Reg::Ocr4a,
                    Field::new(Reg::Tccr4a, 6, 2),
                    Field::bit(Reg::Tccr4a, 1),
                ),
                pwm_with_enable(
                    SubChannel::B,
                    10,
                    Reg::Ocr4b,
                    Field::new(Reg::Tccr4a, 4, 2),
                    Field::bit(Reg::Tccr4a, 0),
                ),
                pwm_with_enable(
                    SubChannel::D,
                    6,
                    Reg::Ocr4d,
                    Field::new(Reg::Tccr4c, 2, 2),
                    Field::bit(Reg::Tccr4c, 0),
                ),
            ],
            // TIMSK4 = [ OCIE4D | OCIE4A | OCIE4B | - | - | TOIE4 | - | - ]
            vectors: &[
                overflow(9, Field::bit(Reg::Timsk4, 2)),
                compare(SubChannel::A, 10, Field::bit(Reg::Timsk4, 6)),
                compare(SubChannel::B, 11, Field::bit(Reg::Timsk4, 5)),
                compare(SubChannel::D, 12, Field::bit(Reg::Timsk4, 7)),
            ],
        },
    ],
};
