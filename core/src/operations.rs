use log::{debug, warn};
use rand::{Rng, RngCore};

use crate::config::Config;
use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT_ADDRESS, FONT_GLYPH_SIZE,
};
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

/// Everything an instruction may consult besides the machine state.
pub struct Peripherals<'a> {
    pub keypad: &'a Keypad,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a Config,
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    state.frame_buffer.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
/// Returning with nothing on the stack does nothing.
pub fn rts(_op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    match state.registers.pop() {
        Some(address) => state.registers.set_pc(address),
        None => debug!("return with an empty call stack ignored"),
    }
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    state.registers.set_pc(op.nnn());
}

/// STACK.push(PC); PC = addr
/// Odd targets would leave the PC straddling instructions, so the call is refused.
pub fn call(op: &dyn Opcode, state: &mut State, io: &mut Peripherals) {
    let address = op.nnn();
    if address % 2 != 0 {
        warn!("refusing call to odd address {:03X}", address);
        return;
    }
    if let Some(limit) = io.config.stack_limit {
        if state.registers.stack().len() >= limit {
            warn!(
                "refusing call to {:03X}: call stack is full ({} frames)",
                address, limit
            );
            return;
        }
    }
    let pc = state.registers.pc();
    state.registers.push(pc);
    state.registers.set_pc(address);
}

/// if Vx == nn then pc += 2
pub fn ske(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let condition = state.registers.get(op.x()) == op.nn();
    state.skip_if(condition);
}

/// if Vx != nn then pc += 2
pub fn skne(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let condition = state.registers.get(op.x()) != op.nn();
    state.skip_if(condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let condition = state.registers.get(op.x()) == state.registers.get(op.y());
    state.skip_if(condition);
}

/// Vx = nn
pub fn load(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    state.registers.set(op.x(), op.nn());
}

/// Vx += nn
/// Overflow wraps and VF is left alone.
pub fn add(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let res = state.registers.get(op.x()).wrapping_add(op.nn());
    state.registers.set(op.x(), res);
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let vy = state.registers.get(op.y());
    state.registers.set(op.x(), vy);
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let res = state.registers.get(op.x()) | state.registers.get(op.y());
    state.registers.set(op.x(), res);
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let res = state.registers.get(op.x()) & state.registers.get(op.y());
    state.registers.set(op.x(), res);
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let res = state.registers.get(op.x()) ^ state.registers.get(op.y());
    state.registers.set(op.x(), res);
}

/// Vx += Vy; VF = overflow
pub fn addr(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let (res, over) = state
        .registers
        .get(op.x())
        .overflowing_add(state.registers.get(op.y()));
    state.registers.set(op.x(), res);
    state.registers.set_flag(over);
}

/// VF = !borrow; Vx -= Vy
/// When Vx is VF itself only the flag is kept.
pub fn sub(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let (res, under) = state
        .registers
        .get(op.x())
        .overflowing_sub(state.registers.get(op.y()));
    state.registers.set_flag(!under);
    if op.x() != FLAG_REGISTER {
        state.registers.set(op.x(), res);
    }
}

/// legacy:    VF = Vx & 1; Vy = Vx >> 1
/// canonical: Vx >>= 1; VF = shifted out bit
pub fn shr(op: &dyn Opcode, state: &mut State, io: &mut Peripherals) {
    let vx = state.registers.get(op.x());
    if io.config.quirks.legacy_shift_roles {
        state.registers.set_flag(vx & 0x1 == 0x1);
        state.registers.set(op.y(), vx >> 1);
    } else {
        state.registers.set(op.x(), vx >> 1);
        state.registers.set_flag(vx & 0x1 == 0x1);
    }
}

/// legacy:    VF = Vx <= Vy; Vy = Vx - Vy
/// canonical: Vx = Vy - Vx; VF = !borrow
pub fn subn(op: &dyn Opcode, state: &mut State, io: &mut Peripherals) {
    let vx = state.registers.get(op.x());
    let vy = state.registers.get(op.y());
    if io.config.quirks.legacy_shift_roles {
        state.registers.set_flag(vx <= vy);
        state.registers.set(op.y(), vx.wrapping_sub(vy));
    } else {
        state.registers.set(op.x(), vy.wrapping_sub(vx));
        state.registers.set_flag(vx <= vy);
    }
}

/// legacy:    VF = Vx & 1; Vy = Vx << 1
/// canonical: Vx <<= 1; VF = shifted out bit
pub fn shl(op: &dyn Opcode, state: &mut State, io: &mut Peripherals) {
    let vx = state.registers.get(op.x());
    if io.config.quirks.legacy_shift_roles {
        state.registers.set_flag(vx & 0x1 == 0x1);
        state.registers.set(op.y(), vx << 1);
    } else {
        state.registers.set(op.x(), vx << 1);
        state.registers.set_flag(vx & 0x80 == 0x80);
    }
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let condition = state.registers.get(op.x()) != state.registers.get(op.y());
    state.skip_if(condition);
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    state.registers.set_index(op.nnn());
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let address = u16::from(state.registers.get(0x0)) + op.nnn();
    state.registers.set_pc(address);
}

/// Vx = rand_byte & nn
pub fn rand(op: &dyn Opcode, state: &mut State, io: &mut Peripherals) {
    let rand_byte: u8 = io.rng.gen();
    state.registers.set(op.x(), rand_byte & op.nn());
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs an n byte sprite from memory I.. onto the frame buffer with its top left corner at
/// (Vx, Vy). Only the origin wraps around the screen; rows and columns that run off the
/// right or bottom edge are clipped.
/// Sets VF if any pixels are erased.
pub fn draw(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let origin_x = state.registers.get(op.x()) as usize % DISPLAY_WIDTH;
    let origin_y = state.registers.get(op.y()) as usize % DISPLAY_HEIGHT;
    let index = state.registers.index() as usize;

    // Reset the flag (used for collision detection)
    let mut collision = false;

    for row in 0..op.n() as usize {
        let y = origin_y + row;
        if y >= DISPLAY_HEIGHT {
            break;
        }
        let sprite = state.memory.read(index + row);
        for bit in 0..8 {
            let x = origin_x + bit;
            if x >= DISPLAY_WIDTH {
                break;
            }
            if (sprite >> (7 - bit)) & 0x1 == 0x0 {
                continue;
            }
            if state.frame_buffer.pixel(y, x) {
                state.frame_buffer.set_pixel(y, x, false);
                collision = true;
            } else {
                state.frame_buffer.set_pixel(y, x, true);
            }
        }
    }

    state.registers.set_flag(collision);
    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &mut State, io: &mut Peripherals) {
    let condition = io.keypad.is_down(state.registers.get(op.x()));
    state.skip_if(condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &mut State, io: &mut Peripherals) {
    let condition = !io.keypad.is_down(state.registers.get(op.x()));
    state.skip_if(condition);
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    state.registers.set(op.x(), state.delay_timer);
}

/// await keypress for Vx
pub fn keyd(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    debug!("waiting for a key press to store in V{:X}", op.x());
    state.register_needing_key = Some(op.x());
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    state.delay_timer = state.registers.get(op.x());
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    state.sound_timer = state.registers.get(op.x());
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let index = state
        .registers
        .index()
        .wrapping_add(u16::from(state.registers.get(op.x())));
    state.registers.set_index(index);
}

/// I = 0x050 + Vx * 5
/// Set I to the memory address of the font glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let glyph = u16::from(state.registers.get(op.x())) * FONT_GLYPH_SIZE;
    state.registers.set_index(FONT_ADDRESS + glyph);
}

/// mem[I..I+3] = bcd(Vx)
/// Store the hundreds, tens and ones digits of Vx in memory starting at address I
pub fn bcd(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let value = state.registers.get(op.x());
    let index = state.registers.index() as usize;
    state.memory.write(index, value / 100 % 10);
    state.memory.write(index + 1, value / 10 % 10);
    state.memory.write(index + 2, value % 10);
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let index = state.registers.index();
    for register in 0..=op.x() {
        state
            .memory
            .write(index as usize + register, state.registers.get(register));
    }
    state
        .registers
        .set_index(index.wrapping_add(op.x() as u16 + 1));
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(op: &dyn Opcode, state: &mut State, _io: &mut Peripherals) {
    let index = state.registers.index();
    for register in 0..=op.x() {
        let byte = state.memory.read(index as usize + register);
        state.registers.set(register, byte);
    }
    state
        .registers
        .set_index(index.wrapping_add(op.x() as u16 + 1));
}
