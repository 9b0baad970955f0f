use std::collections::VecDeque;
use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::{KEY_COUNT, MEMORY_SIZE};
use crate::error::Error;
use crate::frame_buffer::FrameBuffer;
use crate::instruction;
use crate::keypad::Keypad;
use crate::operations::Peripherals;
use crate::registers::Registers;
use crate::state::State;

/// What a single call to `Chip8::step` did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The opcode was executed.
    Executed(u16),
    /// The opcode isn't part of the instruction set and was skipped.
    Unknown(u16),
    /// Execution is suspended until a key is pressed; its value goes to `register`.
    AwaitingKey { register: usize },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the `keypad` with public interfaces for manipulating it
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// It keeps no clock of its own: whoever drives it calls `step` at `Config::clock_speed`
/// and the tick methods at `Config::timer_frequency`, from a single thread.
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    keypad: Keypad,
    config: Config,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(config.program_start),
            previous_states: VecDeque::with_capacity(config.history_depth),
            keypad: Keypad::new(),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns to the power-on state; only the font is left in memory.
    pub fn reset(&mut self) {
        self.state = State::new(self.config.program_start);
        self.previous_states.clear();
        self.keypad.release_all();
    }

    /// Copies `program` into memory starting at `address`.
    /// Bytes that would land past the end of memory are dropped.
    pub fn load_program(&mut self, address: u16, program: &[u8]) -> usize {
        let loaded = self.state.memory.load(address as usize, program);
        if loaded < program.len() {
            warn!(
                "dropped {} bytes past the end of memory",
                program.len() - loaded
            );
        }
        loaded
    }

    /// Load a rom from a source file at `Config::program_start`
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        let max_size = MEMORY_SIZE.saturating_sub(self.config.program_start as usize);
        if rom.len() > max_size {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max_size,
            });
        }
        let loaded = self.load_program(self.config.program_start, &rom);
        debug!(
            "loaded {} byte ROM at {:03X}",
            loaded, self.config.program_start
        );
        Ok(loaded)
    }

    /// Advances the CPU by a single instruction
    /// - does nothing while awaiting a keypress
    /// - gets and executes the next opcode; unknown opcodes are logged and skipped
    pub fn step(&mut self) -> StepResult {
        if let Some(register) = self.state.register_needing_key {
            return StepResult::AwaitingKey { register };
        }
        self.save_state();

        let pc = self.state.registers.pc();
        let op = self.state.fetch();
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.registers.v(),
            self.state.registers.index(),
            pc
        );

        let operation = match instruction::from_op(&op) {
            Some(operation) => operation,
            None => {
                warn!("unknown opcode {:04X} at {:04X} ignored", op, pc);
                return StepResult::Unknown(op);
            }
        };
        let mut io = Peripherals {
            keypad: &self.keypad,
            rng: &mut self.rng,
            config: &self.config,
        };
        operation(&op, &mut self.state, &mut io);

        match self.state.register_needing_key {
            Some(register) => StepResult::AwaitingKey { register },
            None => StepResult::Executed(op),
        }
    }

    /// Runs one timer period worth of instructions (`Config::cycles_per_tick`), stopping early
    /// if the program starts waiting for a key, then ticks both timers.
    pub fn run_frame(&mut self) -> StepResult {
        let mut result = self.step();
        for _ in 1..self.config.cycles_per_tick() {
            if let StepResult::AwaitingKey { .. } = result {
                break;
            }
            result = self.step();
        }
        self.tick_timers();
        result
    }

    /// Reverses the CPU by a single step if possible
    /// - if there are previous_states, pops the last one and restores it
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                // the restored frame differs from what was last rendered
                self.state.draw_flag = true;
                true
            }
            None => {
                debug!("nothing left to rewind");
                false
            }
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already `history_depth` saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.config.history_depth == 0 {
            return;
        }
        if self.previous_states.len() == self.config.history_depth {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state.clone());
    }

    pub fn tick_delay(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
    }

    pub fn tick_sound(&mut self) {
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    pub fn tick_timers(&mut self) {
        self.tick_delay();
        self.tick_sound();
    }

    /// Presses the keypad key mapped to a keyboard label, see `keymap`.
    /// Returns the keypad value, or `None` if the label isn't mapped.
    pub fn key_down(&mut self, label: char) -> Option<u8> {
        let key = crate::keypad::keymap(label)?;
        self.press_key(key);
        Some(key)
    }

    /// Releases the keypad key mapped to a keyboard label, see `keymap`.
    pub fn key_up(&mut self, label: char) -> Option<u8> {
        let key = crate::keypad::keymap(label)?;
        self.release_key(key);
        Some(key)
    }

    /// Set the pressed status of key, resuming execution if it was awaiting one
    ///
    /// # Arguments
    /// * `key` the keypad value (0x0..=0xF) that was pressed
    pub fn press_key(&mut self, key: u8) {
        if usize::from(key) >= KEY_COUNT {
            return;
        }
        self.keypad.press(key);
        if let Some(register) = self.state.register_needing_key.take() {
            debug!("key {:X} stored in V{:X}, resuming", key, register);
            self.state.registers.set(register, key);
        }
    }

    /// Unset the pressed status of key
    pub fn release_key(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    /// Abandons a pending wait for a key without writing the register.
    /// The program counter goes back to the waiting instruction so it runs again on the
    /// next step. Returns whether there was a wait to cancel.
    pub fn cancel_wait(&mut self) -> bool {
        match self.state.register_needing_key.take() {
            Some(register) => {
                debug!("wait for a key for V{:X} cancelled", register);
                let pc = self.state.registers.pc().wrapping_sub(2);
                self.state.registers.set_pc(pc);
                true
            }
            None => false,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// A beep should be playing while the sound timer is running.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn set_program_counter(&mut self, address: u16) {
        self.state.registers.set_pc(address);
    }

    pub fn set_index_register(&mut self, address: u16) {
        self.state.registers.set_index(address);
    }

    pub fn set_register(&mut self, register: usize, value: u8) {
        self.state.registers.set(register, value);
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.state.delay_timer = value;
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.state.sound_timer = value;
    }

    pub fn read_memory(&self, address: usize) -> u8 {
        self.state.memory.read(address)
    }

    pub fn write_memory(&mut self, address: usize, byte: u8) {
        self.state.memory.write(address, byte);
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip8() -> Chip8 {
        Chip8::with_config(Config::default().with_seed(0x8))
    }

    #[test]
    fn test_jump_from_zero() {
        let mut chip8 = chip8();
        chip8.load_program(0x0, &[0x11, 0x23]);
        chip8.set_program_counter(0x0);
        assert_eq!(chip8.step(), StepResult::Executed(0x1123));
        assert_eq!(chip8.registers().pc(), 0x123);
    }

    #[test]
    fn test_unknown_opcode_is_skipped() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0xF1, 0xFF]);
        assert_eq!(chip8.step(), StepResult::Unknown(0xF1FF));
        assert_eq!(chip8.registers().pc(), 0x202);
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0xF1, 0x0A]);
        assert_eq!(chip8.step(), StepResult::AwaitingKey { register: 0x1 });
        assert!(chip8.is_awaiting_key());
        chip8.press_key(0xE);
        assert!(!chip8.is_awaiting_key());
        assert_eq!(chip8.registers().get(0x1), 0xE);
    }

    #[test]
    fn test_doesnt_cycle_while_register_needs_key() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0xF1, 0x0A, 0x61, 0x05]);
        chip8.step();
        assert_eq!(chip8.step(), StepResult::AwaitingKey { register: 0x1 });
        assert_eq!(chip8.registers().pc(), 0x202);
        assert_eq!(chip8.key_down('w'), Some(0x5));
        assert_eq!(chip8.step(), StepResult::Executed(0x6105));
    }

    #[test]
    fn test_unmapped_key_doesnt_resume() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0xF1, 0x0A]);
        chip8.step();
        assert_eq!(chip8.key_down('p'), None);
        chip8.press_key(0x10);
        assert!(chip8.is_awaiting_key());
    }

    #[test]
    fn test_cancel_wait_reruns_instruction() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0xF3, 0x0A]);
        chip8.step();
        assert!(chip8.cancel_wait());
        assert!(!chip8.cancel_wait());
        assert_eq!(chip8.registers().pc(), 0x200);
        assert_eq!(chip8.registers().get(0x3), 0x0);
        assert_eq!(chip8.step(), StepResult::AwaitingKey { register: 0x3 });
    }

    #[test]
    fn test_timers_tick_down_to_zero() {
        let mut chip8 = chip8();
        chip8.set_delay_timer(0x2);
        chip8.set_sound_timer(0x1);
        assert!(chip8.sound_active());
        chip8.tick_timers();
        assert_eq!(chip8.delay_timer(), 0x1);
        assert_eq!(chip8.sound_timer(), 0x0);
        assert!(!chip8.sound_active());
        chip8.tick_delay();
        chip8.tick_delay();
        chip8.tick_sound();
        assert_eq!(chip8.delay_timer(), 0x0);
        assert_eq!(chip8.sound_timer(), 0x0);
    }

    #[test]
    fn test_timers_tick_while_awaiting_key() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0xF1, 0x0A]);
        chip8.set_delay_timer(0x5);
        chip8.step();
        chip8.tick_delay();
        assert_eq!(chip8.delay_timer(), 0x4);
    }

    #[test]
    fn test_run_frame_stops_at_key_wait() {
        let mut chip8 = chip8();
        // V0 = 1; wait for key into V2; V1 = 7
        chip8.load_program(0x200, &[0x60, 0x01, 0xF2, 0x0A, 0x61, 0x07]);
        chip8.set_delay_timer(0x3);
        assert_eq!(chip8.run_frame(), StepResult::AwaitingKey { register: 0x2 });
        assert_eq!(chip8.registers().get(0x1), 0x0);
        assert_eq!(chip8.delay_timer(), 0x2);
    }

    #[test]
    fn test_take_frame_only_after_draw() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0xD0, 0x05]);
        assert!(chip8.take_frame().is_none());
        chip8.step();
        assert!(chip8.take_frame().is_some());
        assert!(chip8.take_frame().is_none());
    }

    #[test]
    fn test_rewind_disabled_by_default() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0x60, 0x01]);
        chip8.step();
        assert!(!chip8.rewind());
        assert_eq!(chip8.registers().get(0x0), 0x1);
    }

    #[test]
    fn test_rewind_restores_previous_state() {
        let mut chip8 = Chip8::with_config(Config::default().with_history_depth(4));
        chip8.load_program(0x200, &[0x60, 0x01, 0x70, 0x01]);
        chip8.step();
        chip8.step();
        assert_eq!(chip8.registers().get(0x0), 0x2);
        assert!(chip8.rewind());
        assert_eq!(chip8.registers().get(0x0), 0x1);
        assert_eq!(chip8.registers().pc(), 0x202);
        assert!(chip8.rewind());
        assert_eq!(chip8.registers().pc(), 0x200);
        assert!(!chip8.rewind());
    }

    #[test]
    fn test_rewind_redraws_restored_frame() {
        let mut chip8 = Chip8::with_config(Config::default().with_history_depth(4));
        // I = glyph 0; draw it; clear the screen
        chip8.load_program(0x200, &[0xA0, 0x50, 0xD0, 0x05, 0x00, 0xE0]);
        chip8.step();
        chip8.step();
        assert!(chip8.take_frame().is_some());
        chip8.step();
        assert!(chip8.take_frame().is_some());
        assert!(chip8.frame().is_clear());
        assert!(chip8.rewind());
        assert!(chip8.take_frame().is_some());
        assert!(!chip8.frame().is_clear());
    }

    #[test]
    fn test_key_down_and_up() {
        let mut chip8 = chip8();
        assert_eq!(chip8.key_down('v'), Some(0xF));
        assert!(chip8.keypad().is_down(0xF));
        assert_eq!(chip8.key_up('V'), Some(0xF));
        assert!(!chip8.keypad().is_down(0xF));
        assert_eq!(chip8.key_up('p'), None);
    }

    #[test]
    fn test_drops_old_saved_states() {
        let mut chip8 = Chip8::with_config(Config::default().with_history_depth(2));
        // jump to self
        chip8.load_program(0x200, &[0x12, 0x00]);
        for _ in 0..5 {
            chip8.step();
        }
        assert_eq!(chip8.previous_states.len(), 2);
    }

    #[test]
    fn test_load_rom() {
        let mut chip8 = chip8();
        let rom: &[u8] = &[0xA2, 0x2A, 0x60, 0x0C];
        assert_eq!(chip8.load_rom(&mut &rom[..]).unwrap(), 4);
        assert_eq!(chip8.read_memory(0x200), 0xA2);
        assert_eq!(chip8.read_memory(0x203), 0x0C);
    }

    #[test]
    fn test_load_rom_too_large() {
        let mut chip8 = chip8();
        let rom = vec![0xFF; MEMORY_SIZE];
        match chip8.load_rom(&mut &rom[..]) {
            Err(Error::RomTooLarge { size, max_size }) => {
                assert_eq!(size, MEMORY_SIZE);
                assert_eq!(max_size, MEMORY_SIZE - 0x200);
            }
            other => panic!("expected RomTooLarge, got {:?}", other),
        }
        assert_eq!(chip8.read_memory(0x200), 0x0);
    }

    #[test]
    fn test_load_program_drops_overflow() {
        let mut chip8 = chip8();
        assert_eq!(chip8.load_program(0xFFF, &[0x1, 0x2]), 1);
        assert_eq!(chip8.read_memory(0xFFF), 0x1);
    }

    #[test]
    fn test_reset() {
        let mut chip8 = chip8();
        chip8.load_program(0x200, &[0x60, 0x01]);
        chip8.step();
        chip8.key_down('1');
        chip8.reset();
        assert_eq!(chip8.registers().pc(), 0x200);
        assert_eq!(chip8.registers().get(0x0), 0x0);
        assert_eq!(chip8.read_memory(0x200), 0x0);
        assert_eq!(chip8.read_memory(0x050), 0xF0);
        assert!(!chip8.keypad().is_down(0x1));
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let program = [0xC0, 0xFF, 0xC1, 0xFF];
        let mut a = chip8();
        let mut b = chip8();
        a.load_program(0x200, &program);
        b.load_program(0x200, &program);
        for _ in 0..2 {
            a.step();
            b.step();
        }
        assert_eq!(a.registers().v(), b.registers().v());
    }
}
