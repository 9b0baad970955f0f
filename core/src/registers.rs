use crate::constants::{FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT};

/// # Register file
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - VF is also overwritten as the carry, borrow and collision flag
/// - (i) a 16-bit index register, used as a memory pointer
/// - (pc) the program counter
/// - (stack) return addresses pushed by subroutine calls
///
/// Indexing a register outside V0..VF reads as 0 and writes are ignored,
/// the same way out of range memory accesses are treated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    v: [u8; REGISTER_COUNT],
    i: u16,
    pc: u16,
    stack: Vec<u16>,
}

impl Registers {
    pub fn new(pc: u16) -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc,
            stack: Vec::new(),
        }
    }

    pub fn get(&self, register: usize) -> u8 {
        self.v.get(register).copied().unwrap_or(0)
    }

    pub fn set(&mut self, register: usize, value: u8) {
        if let Some(cell) = self.v.get_mut(register) {
            *cell = value;
        }
    }

    /// VF
    pub fn flag(&self) -> u8 {
        self.v[FLAG_REGISTER]
    }

    pub fn set_flag(&mut self, set: bool) {
        self.v[FLAG_REGISTER] = set as u8;
    }

    pub fn v(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn set_index(&mut self, address: u16) {
        self.i = address;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, address: u16) {
        self.pc = address;
    }

    /// Moves the program counter past the next instruction.
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Return addresses, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    pub fn push(&mut self, address: u16) {
        self.stack.push(address);
    }

    pub fn pop(&mut self) -> Option<u16> {
        self.stack.pop()
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new(PROGRAM_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_register_reads_zero() {
        let mut registers = Registers::default();
        registers.set(0x10, 0xAA);
        assert_eq!(registers.get(0x10), 0x0);
        assert_eq!(registers.v(), &[0; REGISTER_COUNT]);
    }

    #[test]
    fn test_flag_is_vf() {
        let mut registers = Registers::default();
        registers.set_flag(true);
        assert_eq!(registers.get(0xF), 0x1);
        registers.set(0xF, 0x0);
        assert_eq!(registers.flag(), 0x0);
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut registers = Registers::default();
        registers.push(0x202);
        registers.push(0x304);
        assert_eq!(registers.stack(), &[0x202, 0x304]);
        assert_eq!(registers.pop(), Some(0x304));
        assert_eq!(registers.pop(), Some(0x202));
        assert_eq!(registers.pop(), None);
    }

    #[test]
    fn test_advance_wraps() {
        let mut registers = Registers::new(0xFFFF);
        registers.advance();
        assert_eq!(registers.pc(), 0x1);
    }
}
