use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use fastpwm_core::{SubChannel, TimerId};
use fastpwm_ctl::{ChipCapabilities, DEFAULT_BASE_CLOCK_HZ};
use pwmcalc::{format, parse_channel, parse_chip, parse_timer, Request};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fast-PWM prescaler and register calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a frequency and show the register programme
    Resolve(ResolveArgs),
    /// List the supported chips
    Chips {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ResolveArgs {
    #[arg(long, default_value = "atmega328p", value_parser = parse_chip)]
    chip: &'static ChipCapabilities,

    #[arg(short, long, value_parser = parse_timer)]
    timer: TimerId,

    #[arg(short, long, default_value = "A", value_parser = parse_channel)]
    channel: SubChannel,

    /// Target frequency in Hz
    #[arg(short, long)]
    frequency: u32,

    /// Duty cycle is 1/DUTY
    #[arg(short, long, default_value_t = 2)]
    duty: u16,

    #[arg(long)]
    invert: bool,

    /// Base clock in Hz
    #[arg(long, default_value_t = DEFAULT_BASE_CLOCK_HZ)]
    clock: u32,

    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(args) => {
            let request = Request {
                chip: args.chip,
                timer: args.timer,
                sub: args.channel,
                frequency_hz: args.frequency,
                duty_divisor: args.duty,
                inverted: args.invert,
                base_clock_hz: args.clock,
            };
            let programme = pwmcalc::resolve(&request).with_context(|| {
                format!(
                    "cannot program {} {} output {}",
                    args.chip.name, args.timer, args.channel
                )
            })?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&programme)?);
            } else {
                format::print_programme(&programme);
            }
        }
        Command::Chips { json } => {
            let reports = pwmcalc::chip_reports();
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                format::print_chips(&reports);
            }
        }
    }

    Ok(())
}
