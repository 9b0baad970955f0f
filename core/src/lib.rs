//! A Chip-8 interpreter core: memory, registers, frame buffer, keypad and the
//! fetch-decode-execute loop, with no opinion on windows, clocks or files.

pub use chip8::{Chip8, StepResult};
pub use config::{Config, Quirks};
pub use constants::{CLOCK_SPEED, TIMER_FREQUENCY};
pub use error::Error;
pub use frame_buffer::FrameBuffer;
pub use keypad::{keymap, Keypad};
pub use memory::Memory;
pub use registers::Registers;
pub use state::State;

mod chip8;
mod config;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod registers;
mod state;
