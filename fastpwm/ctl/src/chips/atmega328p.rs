//! ATmega328p (Uno, Nano)

use super::{compare, overflow, pwm, toggle, TIMER0_FAST_PWM};
use crate::capability::*;
use fastpwm_core::{CounterWidth, Field, FieldValue, PrescalerTable, Reg, SubChannel, TimerId};

/// WGM1[3:0] = 0b1110: fast PWM, ICR1 as top
const TIMER1_FAST_PWM: &[FieldValue] = &[
    FieldValue::new(Field::new(Reg::Tccr1a, 0, 2), 0b10),
    FieldValue::new(Field::new(Reg::Tccr1b, 3, 2), 0b11),
];

/// WGM2[2:0] = 0b111: fast PWM, OCR2A as top
const TIMER2_FAST_PWM: &[FieldValue] = &[
    FieldValue::new(Field::new(Reg::Tccr2a, 0, 2), 0b11),
    FieldValue::new(Field::bit(Reg::Tccr2b, 3), 1),
];

// TIMSKn = [ - | - | - | - | - | OCIEnB | OCIEnA | TOIEn ]
pub static ATMEGA328P: ChipCapabilities = ChipCapabilities {
    name: "ATmega328p",
    timers: &[
        TimerCapability {
            id: TimerId::T0,
            width: CounterWidth::Bits8,
            table: PrescalerTable::Linear,
            top: Reg::Ocr0a,
            clock_select: Field::new(Reg::Tccr0b, 0, 3),
            waveform: TIMER0_FAST_PWM,
            outputs: &[
                toggle(SubChannel::A, 6, Reg::Ocr0a, Field::new(Reg::Tccr0a, 6, 2)),
                pwm(SubChannel::B, 5, Reg::Ocr0b, Field::new(Reg::Tccr0a, 4, 2)),
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
            ],
            vectors: &[
                overflow(3, Field::bit(Reg::Timsk1, 0)),
                compare(SubChannel::A, 4, Field::bit(Reg::Timsk1, 1)),
                compare(SubChannel::B, 5, Field::bit(Reg::Timsk1, 2)),
            ],
        },
        TimerCapability {
            id: TimerId::T2,
            width: CounterWidth::Bits8,
            table: PrescalerTable::Linear,
            top: Reg::Ocr2a,
            clock_select: Field::new(Reg::Tccr2b, 0, 3),
            waveform: TIMER2_FAST_PWM,
            outputs: &[
                toggle(SubChannel::A, 12, Reg::Ocr2a, Field::new(Reg::Tccr2a, 6, 2)),
                pwm(SubChannel::B, 3, Reg::Ocr2b, Field::new(Reg::Tccr2a, 4, 2)),
            ],
            vectors: &[
                overflow(6, Field::bit(Reg::Timsk2, 0)),
                compare(SubChannel::A, 7, Field::bit(Reg::Timsk2, 1)),
                compare(SubChannel::B, 8, Field::bit(Reg::Timsk2, 2)),
            ],
        },
    ],
};
