use std::fmt;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// The monochrome framebuffer, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Display {
    cells: [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl Display {
    pub fn new() -> Display {
        Display {
            cells: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
    }

    /// Get a pixel, anything off screen is unset.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT && self.cells[y * DISPLAY_WIDTH + x]
    }

    /// XOR a sprite onto the screen, one byte per row, most significant bit leftmost.
    ///
    /// The anchor wraps around the screen, the sprite itself is clipped at the
    /// right and bottom edges. Returns true if any set pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x_start = x as usize % DISPLAY_WIDTH;
        let y_start = y as usize % DISPLAY_HEIGHT;

        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            let y = y_start + row;
            if y >= DISPLAY_HEIGHT {
                break;
            }
            for column in 0..8 {
                let x = x_start + column;
                if x >= DISPLAY_WIDTH {
                    break;
                }
                let sprite_pixel = (bits >> (7 - column)) & 1 == 1;
                let pixel = &mut self.cells[y * DISPLAY_WIDTH + x];
                if sprite_pixel && *pixel {
                    collision = true;
                }
                *pixel ^= sprite_pixel;
            }
        }

        collision
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(DISPLAY_WIDTH)
    }

    pub fn lit_pixels(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &c in row {
                write!(f, "{}", if c { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Display {{")?;
        write!(f, "{}", self)?;
        write!(f, "}}")
    }
}
