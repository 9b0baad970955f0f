/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag.
pub const FLAG_REGISTER: usize = 0xF;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// ROMs are loaded here and execution starts here.
pub const PROGRAM_START: u16 = 0x200;

/// Instructions per second.
pub const CLOCK_SPEED: u32 = 500;

/// Timer decrements per second.
pub const TIMER_FREQUENCY: u32 = 60;

/// Where the font glyphs are seeded.
pub const FONT_ADDRESS: u16 = 0x050;

/// Bytes per font glyph.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Sprite sheet
/// Glyphs for the hex digits 0..F, each 4 pixels wide and 5 rows tall.
/// Only the high nibble of each byte is drawn.
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
