use crate::constants::{FONT_ADDRESS, MEMORY_SIZE, SPRITE_SHEET};

/// # Memory
/// 4096 bytes of addressable memory holding the font, the loaded program and any scratch data.
///
/// Accesses outside `0x000..=0xFFF` never fault: reads return 0 and writes are dropped.
/// Programs that run off the end of memory simply fetch zeroes.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zero-filled memory with the font glyphs seeded at `FONT_ADDRESS`.
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.load(FONT_ADDRESS as usize, &SPRITE_SHEET);
        memory
    }

    pub fn read(&self, address: usize) -> u8 {
        self.bytes.get(address).copied().unwrap_or(0)
    }

    pub fn write(&mut self, address: usize, byte: u8) {
        if let Some(cell) = self.bytes.get_mut(address) {
            *cell = byte;
        }
    }

    /// Copies `data` sequentially starting at `address`; anything past the end is dropped.
    /// Returns how many bytes landed in memory.
    pub fn load(&mut self, address: usize, data: &[u8]) -> usize {
        if address >= MEMORY_SIZE {
            return 0;
        }
        let len = data.len().min(MEMORY_SIZE - address);
        self.bytes[address..address + len].copy_from_slice(&data[..len]);
        len
    }

    /// The raw memory image, e.g. for a hex dump.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
