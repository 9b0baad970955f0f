use sdl2::keyboard::Scancode;

/// # Keymap
/// Turns the physical key at a QWERTY position into the label the interpreter's keypad
/// is mapped by. Scancodes are used rather than keycodes so the keypad stays in the
/// same place on other keyboard layouts.
/// ```text
/// |1|2|3|4|
/// |Q|W|E|R|
/// |A|S|D|F|
/// |Z|X|C|V|
/// ```
pub fn key_label(code: Scancode) -> Option<char> {
    match code {
        Scancode::Num1 => Some('1'),
        Scancode::Num2 => Some('2'),
        Scancode::Num3 => Some('3'),
        Scancode::Num4 => Some('4'),
        Scancode::Q => Some('Q'),
        Scancode::W => Some('W'),
        Scancode::E => Some('E'),
        Scancode::R => Some('R'),
        Scancode::A => Some('A'),
        Scancode::S => Some('S'),
        Scancode::D => Some('D'),
        Scancode::F => Some('F'),
        Scancode::Z => Some('Z'),
        Scancode::X => Some('X'),
        Scancode::C => Some('C'),
        Scancode::V => Some('V'),
        _ => None,
    }
}
