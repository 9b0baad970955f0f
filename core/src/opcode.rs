/// # Opcodes
///
/// Every instruction is 16 bits, read as four nibbles `N1 N2 N3 N4`.
/// - `N1` selects one of 16 instruction families
/// - the `0`, `8`, `E` and `F` families pick the exact operation from `N4` or `N3 N4`
///
/// Operand fields, where an instruction uses them:
/// - `X`   (`_X__`) a register Vx, or the last register of the range V0..Vx
/// - `Y`   (`__Y_`) a register Vy
/// - `N`   (`___N`) a 4-bit constant, e.g. sprite height
/// - `NN`  (`__NN`) an 8-bit constant
/// - `NNN` (`_NNN`) a 12-bit address
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `N1`, the instruction family.
    fn family(&self) -> u8;

    fn x(&self) -> usize;

    fn y(&self) -> usize;

    fn n(&self) -> u8;

    fn nn(&self) -> u8;

    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x() as u8, self.y() as u8, self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
