use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame buffer
/// The 64x32 monochrome display, indexed as `[row][col]`.
///
/// Coordinates outside the screen are ignored by `set_pixel` and read as off by `pixel`.
/// Wrapping sprites around the screen edges is the drawing instruction's job, not this one's.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    pub fn pixel(&self, row: usize, col: usize) -> bool {
        self.pixels
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn set_pixel(&mut self, row: usize, col: usize, value: bool) {
        if let Some(pixel) = self.pixels.get_mut(row).and_then(|r| r.get_mut(col)) {
            *pixel = value;
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// True when no pixel is lit.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().flatten().all(|&pixel| !pixel)
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
