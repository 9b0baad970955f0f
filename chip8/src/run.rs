use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use display::Display;
use emu8::{Chip8, Config};

use crate::keymap::key_label;

pub fn run(rom: &Path, config: Config, scale: u32) -> anyhow::Result<()> {
    let mut chip8: Chip8 = Chip8::with_config(config.clone());

    // Load ROM
    let file = File::open(rom).with_context(|| format!("unable to open {}", rom.display()))?;
    let mut reader = BufReader::new(file);
    let loaded = chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", rom.display()))?;
    info!("loaded {} bytes from {}", loaded, rom.display());

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display: Display = Display::new(&sdl, scale).map_err(anyhow::Error::msg)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    // Set initial timing
    let cycle_time: Duration = Duration::from_secs(1) / config.clock_speed.max(1);
    let cycles_per_tick = config.cycles_per_tick();
    let mut cycles: u32 = 0;
    let mut last_cycle: Instant = Instant::now();

    // Whether or not the default clock speed should be respected
    let mut fast_forward: bool = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind: bool = false;

    'event: loop {
        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(anyhow::Error::msg)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => {
                    if chip8.cancel_wait() {
                        debug!("quit while waiting for a key");
                    }
                    break 'event;
                }
                Event::KeyDown {
                    scancode: Some(code),
                    repeat: false,
                    ..
                } => match (code, key_label(code)) {
                    (_, Some(label)) => {
                        chip8.key_down(label);
                    }
                    (Scancode::Space, _) => fast_forward = true,
                    (Scancode::Escape, _) => rewind = true,
                    _ => continue,
                },
                Event::KeyUp {
                    scancode: Some(code),
                    ..
                } => match (code, key_label(code)) {
                    (_, Some(label)) => {
                        chip8.key_up(label);
                    }
                    (Scancode::Space, _) => fast_forward = false,
                    (Scancode::Escape, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            chip8.rewind();
        } else {
            // A program waiting for a key still lets the timers run down
            chip8.step();
            cycles = cycles.wrapping_add(1);
            if cycles % cycles_per_tick == 0 {
                chip8.tick_timers();
            }
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
