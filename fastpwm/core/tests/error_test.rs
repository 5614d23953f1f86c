use embedded_hal::pwm::{Error, ErrorKind};
use fastpwm_core::{InterruptSource, PwmError, SubChannel, TimerId};

#[test]
fn test_error_display() {
    let err = PwmError::FrequencyOutOfRange {
        frequency_hz: 20_000_000,
        base_clock_hz: 16_000_000,
    };
    assert_eq!(
        err.to_string(),
        "Frequency 20000000Hz exceeds base clock 16000000Hz"
    );

    let err = PwmError::UnknownChannel {
        timer: TimerId::T2,
        sub: SubChannel::C,
    };
    assert_eq!(err.to_string(), "Timer2 has no output C");

    let err = PwmError::NoInterruptVector {
        timer: TimerId::T3,
        source: InterruptSource::Compare(SubChannel::B),
    };
    assert_eq!(err.to_string(), "Timer3 has no compare B interrupt");
}

#[test]
fn test_pwm_error_kind() {
    assert_eq!(PwmError::ZeroDutyDivisor.kind(), ErrorKind::Other);
}
