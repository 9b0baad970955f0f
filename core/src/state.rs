use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;
use crate::registers::Registers;

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// - registers V0..VF, the index register, the program counter and the call stack
/// - 2 8-bit timers (delay & sound), decremented by the driver's ticks
///
/// ## Memory
/// - 4096 bytes of addressable memory, font glyphs at 0x050..0x0A0
/// - 64x32 frame buffer
///
/// ## Input
/// - emulation halts while `register_needing_key` is set, until a key's value is written to it
#[derive(Clone)]
pub struct State {
    pub registers: Registers,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub draw_flag: bool,
    pub register_needing_key: Option<usize>,
}

impl State {
    pub fn new(program_start: u16) -> Self {
        State {
            registers: Registers::new(program_start),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            delay_timer: 0,
            sound_timer: 0,
            draw_flag: false,
            register_needing_key: None,
        }
    }

    /// Reads the opcode at the program counter and moves the counter past it.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&mut self) -> u16 {
        let pc = self.registers.pc() as usize;
        let high = u16::from(self.memory.read(pc));
        let low = u16::from(self.memory.read(pc + 1));
        self.registers.advance();
        high << 8 | low
    }

    /// Skips the next instruction when `condition` holds.
    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.registers.advance();
        }
    }
}
