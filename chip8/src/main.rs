use std::path::PathBuf;

use clap::Parser;

use emu8::{Config, Quirks, CLOCK_SPEED, TIMER_FREQUENCY};

mod keymap;
mod run;

/// Run a Chip-8 ROM.
///
/// The keypad is mapped to 1234/QWER/ASDF/ZXCV. Hold Space to run unthrottled and
/// Escape to rewind (needs --history).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions per second
    #[arg(long, default_value_t = CLOCK_SPEED)]
    clock_speed: u32,

    /// Timer ticks per second
    #[arg(long, default_value_t = TIMER_FREQUENCY)]
    timer_frequency: u32,

    /// Maximum subroutine nesting; unbounded if omitted
    #[arg(long)]
    stack_limit: Option<usize>,

    /// Number of past steps kept for rewinding
    #[arg(long, default_value_t = 0)]
    history: usize,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Use the common shift and subtract register roles instead of the legacy ones
    #[arg(long)]
    canonical: bool,

    /// Size of a Chip-8 pixel on screen
    #[arg(long, default_value_t = 10)]
    scale: u32,
}

impl Args {
    fn config(&self) -> Config {
        let quirks = if self.canonical {
            Quirks::canonical()
        } else {
            Quirks::default()
        };
        let config = Config::default()
            .with_clock_speed(self.clock_speed)
            .with_timer_frequency(self.timer_frequency)
            .with_stack_limit(self.stack_limit)
            .with_history_depth(self.history)
            .with_quirks(quirks);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    run::run(&args.rom, args.config(), args.scale)
}
