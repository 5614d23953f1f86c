//! Terminal output

use colored::Colorize;

use crate::report::{ChipReport, Programme};

pub fn print_programme(programme: &Programme) {
    println!(
        "{} Timer{} {} (pin {})",
        programme.chip.bold(),
        programme.timer,
        programme.channel,
        programme.pin
    );

    let achieved = format!("{}Hz", programme.achieved_hz);
    let achieved = if programme.achieved_hz == programme.requested_hz {
        achieved.green()
    } else {
        achieved.yellow()
    };
    println!(
        "  requested {}Hz, achieved {}",
        programme.requested_hz, achieved
    );
    if programme.toggle {
        println!("  {}", "toggle output: half frequency, fixed 50% duty".dimmed());
    }
    println!(
        "  prescaler /{} (cs {}), top {}, compare {}",
        programme.prescaler, programme.prescaler_index, programme.period, programme.pulse_width
    );
    if !programme.fits {
        println!(
            "  {}",
            "period exceeds the counter and will be truncated".bright_red().bold()
        );
    }

    println!();
    for register in &programme.registers {
        println!(
            "  {:<7}= {} {}",
            register.name.bright_blue(),
            format!("{:#06x}", register.value),
            format!("{:016b}", register.value).dimmed()
        );
    }
}

pub fn print_chips(reports: &[ChipReport]) {
    for chip in reports {
        println!("{}", chip.name.bold());
        for timer in &chip.timers {
            let prescalers: Vec<String> = timer.prescalers.iter().map(u16::to_string).collect();
            println!(
                "  {} {}-bit /{{{}}}",
                format!("Timer{}", timer.timer).bright_green(),
                timer.bits,
                prescalers.join(",")
            );
            for output in &timer.outputs {
                println!(
                    "    {} pin {:<2} {}",
                    output.channel,
                    output.pin,
                    output.mode.cyan()
                );
            }
            for vector in &timer.vectors {
                println!("    slot {:<2} {}", vector.slot, vector.source.dimmed());
            }
        }
    }
}
