use fastpwm_core::{PwmError, SubChannel, TimerId};
use fastpwm_ctl::chips;
use pwmcalc::{chip_reports, parse_channel, parse_chip, parse_timer, resolve, ArgError, Request};

fn request(frequency_hz: u32) -> Request {
    Request {
        chip: &chips::ATMEGA328P,
        timer: TimerId::T0,
        sub: SubChannel::B,
        frequency_hz,
        duty_divisor: 2,
        inverted: false,
        base_clock_hz: 16_000_000,
    }
}

#[test]
fn test_parse_arguments() {
    assert_eq!(parse_chip("Leonardo").map(|c| c.name), Ok("ATmega32u4"));
    assert!(matches!(parse_chip("esp32"), Err(ArgError::UnknownChip(..))));

    assert_eq!(parse_timer("1"), Ok(TimerId::T1));
    assert_eq!(parse_timer("T4"), Ok(TimerId::T4));
    assert_eq!(parse_timer("timer2"), Ok(TimerId::T2));
    assert_eq!(parse_timer("5"), Err(ArgError::InvalidTimer("5".into())));

    assert_eq!(parse_channel("b"), Ok(SubChannel::B));
    assert_eq!(parse_channel("AB"), Err(ArgError::InvalidChannel("AB".into())));
}

#[test]
fn test_resolve_1khz_programme() {
    let programme = resolve(&request(1000)).unwrap();
    assert_eq!(programme.pin, 5);
    assert_eq!(programme.prescaler, 64);
    assert_eq!(programme.period, 249);
    assert_eq!(programme.pulse_width, 124);
    assert_eq!(programme.achieved_hz, 1000);
    assert!(programme.fits);

    let names: Vec<_> = programme.registers.iter().map(|r| r.name).collect();
    assert_eq!(names, ["TCCR0A", "TCCR0B", "OCR0A", "OCR0B", "TIMSK0"]);
    assert_eq!(programme.registers[1].value, 0b0000_1011);
}

#[test]
fn test_resolve_reports_truncation_and_toggle() {
    let programme = resolve(&request(10)).unwrap();
    assert!(!programme.fits);

    let toggle = resolve(&Request {
        sub: SubChannel::A,
        ..request(1000)
    })
    .unwrap();
    assert!(toggle.toggle);
    assert_eq!(toggle.achieved_hz, 500);
}

#[test]
fn test_resolve_rejects_unknown_output() {
    let err = resolve(&Request {
        timer: TimerId::T3,
        ..request(1000)
    })
    .unwrap_err();
    assert_eq!(err, PwmError::UnknownTimer(TimerId::T3));
}

#[test]
fn test_chip_reports_serialise() {
    let reports = chip_reports();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].timers[1].prescalers.len(), 15);

    let json = serde_json::to_value(&reports).unwrap();
    assert_eq!(json[2]["name"], "ATmega32u4");
    assert_eq!(json[2]["timers"][3]["outputs"][2]["channel"], "D");
    assert_eq!(json[2]["timers"][3]["vectors"][0]["source"], "overflow");
}
