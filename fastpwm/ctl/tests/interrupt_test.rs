//! Handler attachment and the simulated interrupt runtime

use std::sync::atomic::{AtomicU32, Ordering};

use fastpwm_core::{
    Field, Handler, InterruptSource, Reg, RegisterAccess, SubChannel, TimerId,
};
use fastpwm_ctl::{chips, Controller, ControllerConfig, DispatchTable, VectorSlot};
use fastpwm_sim::{controller, fire, SimPins, SimRegisters};

const COMPARE_A: InterruptSource = InterruptSource::Compare(SubChannel::A);

static COMPARE_HITS: AtomicU32 = AtomicU32::new(0);
static OVERFLOW_HITS: AtomicU32 = AtomicU32::new(0);

fn on_compare() {
    COMPARE_HITS.fetch_add(1, Ordering::SeqCst);
}

fn on_overflow() {
    OVERFLOW_HITS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn test_attach_fire_detach() {
    let dispatch = DispatchTable::new();
    let mut pwm = controller(ControllerConfig::new(&chips::ATMEGA328P), &dispatch);
    pwm.set_frequency(TimerId::T1, SubChannel::A, 1000).unwrap();

    pwm.attach_interrupt(TimerId::T1, COMPARE_A, on_compare).unwrap();
    assert!(pwm.interrupt_enabled(TimerId::T1, COMPARE_A).unwrap());
    assert!(dispatch.is_attached(VectorSlot(4)));

    let before = COMPARE_HITS.load(Ordering::SeqCst);
    assert!(fire(&pwm, TimerId::T1, COMPARE_A));
    assert_eq!(COMPARE_HITS.load(Ordering::SeqCst), before + 1);

    pwm.stop(TimerId::T1).unwrap();
    assert!(!fire(&pwm, TimerId::T1, COMPARE_A));
    assert_eq!(COMPARE_HITS.load(Ordering::SeqCst), before + 1);

    // start brings back the overflow vector and every attached compare vector
    pwm.start(TimerId::T1).unwrap();
    assert_eq!(pwm.registers().read(Reg::Timsk1), 0b011);
    assert!(fire(&pwm, TimerId::T1, COMPARE_A));
    assert_eq!(COMPARE_HITS.load(Ordering::SeqCst), before + 2);

    pwm.detach_interrupt(TimerId::T1, COMPARE_A).unwrap();
    assert!(!dispatch.is_attached(VectorSlot(4)));
    // Still enabled, now dispatching to the empty handler
    assert!(fire(&pwm, TimerId::T1, COMPARE_A));
    assert_eq!(COMPARE_HITS.load(Ordering::SeqCst), before + 2);
}

#[test]
fn test_overflow_and_compare_slots_are_separate() {
    let dispatch = DispatchTable::new();
    let mut pwm = controller(ControllerConfig::new(&chips::ATMEGA32U4), &dispatch);
    pwm.set_frequency(TimerId::T4, SubChannel::B, 20_000).unwrap();

    pwm.attach_interrupt(TimerId::T4, InterruptSource::Overflow, on_overflow)
        .unwrap();
    assert_eq!(dispatch.handler(VectorSlot(9)), Handler::new(on_overflow));
    assert_eq!(dispatch.handler(VectorSlot(11)), Handler::Empty);

    let before = OVERFLOW_HITS.load(Ordering::SeqCst);
    assert!(fire(&pwm, TimerId::T4, InterruptSource::Overflow));
    // Compare B was never enabled
    assert!(!fire(&pwm, TimerId::T4, InterruptSource::Compare(SubChannel::B)));
    assert_eq!(OVERFLOW_HITS.load(Ordering::SeqCst), before + 1);

    // Unknown vectors never fire
    assert!(!fire(&pwm, TimerId::T4, InterruptSource::Compare(SubChannel::C)));
    assert!(!fire(&pwm, TimerId::T2, InterruptSource::Overflow));
}

#[test]
fn test_start_leaves_unattached_compare_vectors_off() {
    let dispatch = DispatchTable::new();
    let mut pwm = controller(ControllerConfig::new(&chips::ATMEGA32U4), &dispatch);
    pwm.set_frequency(TimerId::T4, SubChannel::A, 1000).unwrap();
    pwm.start(TimerId::T4).unwrap();

    assert!(pwm.interrupt_enabled(TimerId::T4, InterruptSource::Overflow).unwrap());
    for sub in [SubChannel::A, SubChannel::B, SubChannel::D] {
        let source = InterruptSource::Compare(sub);
        assert!(!pwm.interrupt_enabled(TimerId::T4, source).unwrap());
    }
}

/// Register file that records the handler sitting in one dispatch slot at
/// every write to that slot's enable bit.
struct Probe<'d> {
    inner: SimRegisters,
    dispatch: &'d DispatchTable,
    slot: VectorSlot,
    enable: Field,
    seen: Vec<(u16, Handler)>,
}

impl RegisterAccess for Probe<'_> {
    fn read(&self, reg: Reg) -> u16 {
        self.inner.read(reg)
    }

    fn write(&mut self, reg: Reg, value: u16) {
        if reg == self.enable.reg {
            let bit = self.enable.extract(value);
            self.seen.push((bit, self.dispatch.handler(self.slot)));
        }
        self.inner.write(reg, value);
    }
}

fn first() {}

fn second() {
    COMPARE_HITS.fetch_add(0, Ordering::SeqCst);
}

#[test]
fn test_handler_swapped_only_while_vector_disabled() {
    let dispatch = DispatchTable::new();
    let chip = &chips::ATMEGA328P;
    let vector = chip
        .timer(TimerId::T2)
        .and_then(|t| t.vector(InterruptSource::Compare(SubChannel::B)))
        .unwrap();
    let probe = Probe {
        inner: SimRegisters::new(),
        dispatch: &dispatch,
        slot: vector.slot,
        enable: vector.enable,
        seen: Vec::new(),
    };
    let mut pwm = Controller::new(ControllerConfig::new(chip), probe, SimPins::new(), &dispatch);
    let source = InterruptSource::Compare(SubChannel::B);

    pwm.attach_interrupt(TimerId::T2, source, first).unwrap();
    pwm.attach_interrupt(TimerId::T2, source, second).unwrap();
    pwm.detach_interrupt(TimerId::T2, source).unwrap();

    let seen = &pwm.registers().seen;
    assert_eq!(
        seen.as_slice(),
        &[
            (0, Handler::Empty),
            (1, Handler::new(first)),
            (0, Handler::new(first)),
            (1, Handler::new(second)),
            (0, Handler::new(second)),
            (1, Handler::Empty),
        ]
    );
}
