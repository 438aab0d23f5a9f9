use super::Payload;
use crate::display::context::DisplayContext;
use crate::foundation::core::{HEIGHT, TILE_HEIGHT, TILE_WIDTH, WIDTH};

/// What a coarse scroll does with pixels that fall off one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEdges {
    /// Exposed area takes the instruction's fill color.
    Fill,
    /// Pixels re-enter from the opposite edge.
    Wrap,
}

/// Coarse scroll direction on one axis, as encoded in the two command bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollCmd {
    None,
    /// Content moves right (horizontal) or down (vertical).
    Forward,
    /// Content moves left (horizontal) or up (vertical).
    Back,
}

impl ScrollCmd {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            1 => Self::Forward,
            2 => Self::Back,
            _ => Self::None,
        }
    }

    /// Source sampling shift for one axis; destination `d` reads source `d + shift`.
    fn shift(self, step: usize) -> isize {
        match self {
            Self::None => 0,
            Self::Forward => -(step as isize),
            Self::Back => step as isize,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scroll {
    pub edges: ScrollEdges,
    pub fill_color: u8,
    pub h_cmd: ScrollCmd,
    /// Fine horizontal offset, clamped to `0..=5`.
    pub h_offset: u8,
    pub v_cmd: ScrollCmd,
    /// Fine vertical offset, clamped to `0..=11`.
    pub v_offset: u8,
}

impl Scroll {
    pub fn parse(data: &Payload, edges: ScrollEdges) -> Self {
        let h = data[1] & 0x3F;
        let v = data[2] & 0x3F;
        Self {
            edges,
            fill_color: data[0] & 0x0F,
            h_cmd: ScrollCmd::from_bits(h >> 4),
            h_offset: (h & 0x07).min((TILE_WIDTH - 1) as u8),
            v_cmd: ScrollCmd::from_bits(v >> 4),
            v_offset: (v & 0x0F).min((TILE_HEIGHT - 1) as u8),
        }
    }

    /// `(dx, dy)` source sampling shift in pixels.
    pub fn coarse_shift(&self) -> (isize, isize) {
        (
            self.h_cmd.shift(TILE_WIDTH),
            self.v_cmd.shift(TILE_HEIGHT),
        )
    }

    pub fn apply(&self, ctx: &mut DisplayContext) {
        ctx.set_offsets(self.h_offset, self.v_offset);

        let (dx, dy) = self.coarse_shift();
        if dx == 0 && dy == 0 {
            return;
        }

        let (w, h) = (WIDTH as isize, HEIGHT as isize);
        let fill = self.fill_color;
        match self.edges {
            ScrollEdges::Fill => ctx.remap(|src, x, y| {
                let sx = x as isize + dx;
                let sy = y as isize + dy;
                // Column and row 0 count as off-plane and always take the fill color.
                if sx > 0 && sx < w && sy > 0 && sy < h {
                    src[sy as usize * WIDTH + sx as usize]
                } else {
                    fill
                }
            }),
            ScrollEdges::Wrap => ctx.remap(|src, x, y| {
                let sx = (x as isize + dx).rem_euclid(w) as usize;
                let sy = (y as isize + dy).rem_euclid(h) as usize;
                src[sy * WIDTH + sx]
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/scroll.rs"]
mod tests;
