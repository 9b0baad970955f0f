use crate::constants::KEY_COUNT;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns of a QWERTY keyboard.
/// Keys are identified by the label printed on them, so a frontend only has to turn its
/// platform scancode into that label.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: char) -> Option<u8> {
    match key.to_ascii_uppercase() {
        'X' => Some(0x0),
        '1' => Some(0x1),
        '2' => Some(0x2),
        '3' => Some(0x3),
        'Q' => Some(0x4),
        'W' => Some(0x5),
        'E' => Some(0x6),
        'A' => Some(0x7),
        'S' => Some(0x8),
        'D' => Some(0x9),
        'Z' => Some(0xA),
        'C' => Some(0xB),
        '4' => Some(0xC),
        'R' => Some(0xD),
        'F' => Some(0xE),
        'V' => Some(0xF),
        _ => None,
    }
}

/// # Keypad
/// Pressed state of the 16 keys. The interpreter only ever queries it;
/// presses and releases come from whoever drives the interpreter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presses the keypad key with value `key`; values above 0xF are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(state) = self.keys.get_mut(key as usize) {
            *state = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(state) = self.keys.get_mut(key as usize) {
            *state = false;
        }
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    pub fn is_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn keys(&self) -> &[bool; KEY_COUNT] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_the_keypad() {
        let labels = "1234QWERASDFZXCV";
        let mut values: Vec<u8> = labels.chars().filter_map(keymap).collect();
        assert_eq!(
            values,
            [0x1, 0x2, 0x3, 0xC, 0x4, 0x5, 0x6, 0xD, 0x7, 0x8, 0x9, 0xE, 0xA, 0x0, 0xB, 0xF]
        );
        values.sort_unstable();
        assert_eq!(values, (0x0..=0xF).collect::<Vec<u8>>());
    }

    #[test]
    fn test_keymap_ignores_case_and_unmapped_keys() {
        assert_eq!(keymap('q'), Some(0x4));
        assert_eq!(keymap('5'), None);
        assert_eq!(keymap(' '), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xF);
        assert!(keypad.is_down(0xF));
        keypad.release(0xF);
        assert!(!keypad.is_down(0xF));
        assert_eq!(keypad.keys(), &[false; KEY_COUNT]);
    }

    #[test]
    fn test_out_of_range_keys() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert!(!keypad.is_down(0x10));
        assert_eq!(keypad, Keypad::new());
    }
}
