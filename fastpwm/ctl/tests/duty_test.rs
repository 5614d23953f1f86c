use embedded_hal::pwm::SetDutyCycle;
use fastpwm_core::{PwmError, Reg, RegisterAccess, SubChannel, TimerId};
use fastpwm_ctl::{chips, ControllerConfig, DispatchTable};
use fastpwm_sim::controller;

#[test]
fn test_duty_follows_top_register() {
    let dispatch = DispatchTable::new();
    let mut pwm = controller(ControllerConfig::new(&chips::ATMEGA328P), &dispatch);
    pwm.set_frequency(TimerId::T1, SubChannel::A, 1000).unwrap();

    let Ok(mut channel) = pwm.pwm_channel(TimerId::T1, SubChannel::A) else {
        panic!("Timer1 A is a PWM output");
    };
    assert_eq!(channel.max_duty_cycle(), 15_999);
    channel.set_duty_cycle_percent(25).unwrap();
    assert_eq!(pwm.registers().read(Reg::Ocr1a), 3_999);

    let Ok(mut channel) = pwm.pwm_channel(TimerId::T1, SubChannel::A) else {
        panic!("Timer1 A is a PWM output");
    };
    channel.set_duty_cycle_fully_on().unwrap();
    channel.set_duty_cycle(u16::MAX).unwrap();
    assert_eq!(pwm.registers().read(Reg::Ocr1a), 15_999);
}

#[test]
fn test_toggle_output_has_fixed_duty() {
    let dispatch = DispatchTable::new();
    let mut pwm = controller(ControllerConfig::new(&chips::ATTINY_X5), &dispatch);
    assert!(matches!(
        pwm.pwm_channel(TimerId::T0, SubChannel::A),
        Err(PwmError::FixedDuty {
            timer: TimerId::T0,
            sub: SubChannel::A
        })
    ));
    assert!(matches!(
        pwm.pwm_channel(TimerId::T1, SubChannel::C),
        Err(PwmError::UnknownChannel { .. })
    ));
}
