use super::Payload;
use crate::display::context::DisplayContext;
use crate::foundation::core::{HEIGHT, TILE_HEIGHT, TILE_WIDTH, WIDTH};

/// How tile pixels combine with existing plane content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileOp {
    /// Overwrite.
    Copy,
    /// XOR the 4-bit index in; applying the same tile twice restores the plane.
    Xor,
}

/// A 6×12 two-color bitmap placed on the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileBlock {
    pub op: TileOp,
    /// `colors[0]` for clear bits, `colors[1]` for set bits.
    pub colors: [u8; 2],
    pub row: u8,
    pub column: u8,
    /// One byte per tile row; bit 5 is the leftmost pixel.
    pub bits: [u8; TILE_HEIGHT],
}

impl TileBlock {
    pub fn parse(data: &Payload, op: TileOp) -> Self {
        let mut bits = [0u8; TILE_HEIGHT];
        for (dst, src) in bits.iter_mut().zip(&data[4..4 + TILE_HEIGHT]) {
            *dst = src & 0x3F;
        }
        Self {
            op,
            colors: [data[0] & 0x0F, data[1] & 0x0F],
            row: data[2] & 0x1F,
            column: data[3] & 0x3F,
            bits,
        }
    }

    /// Top-left plane coordinate of the tile.
    pub fn origin(&self) -> (usize, usize) {
        (
            usize::from(self.column) * TILE_WIDTH,
            usize::from(self.row) * TILE_HEIGHT,
        )
    }

    pub fn fits(&self) -> bool {
        let (x, y) = self.origin();
        x + TILE_WIDTH <= WIDTH && y + TILE_HEIGHT <= HEIGHT
    }

    pub fn apply(&self, ctx: &mut DisplayContext) {
        if !self.fits() {
            tracing::warn!(
                row = self.row,
                column = self.column,
                "tile block outside pixel plane; skipped"
            );
            return;
        }

        let (x0, y0) = self.origin();
        let plane = ctx.pixels_mut();
        for (dy, &row_bits) in self.bits.iter().enumerate() {
            let line = (y0 + dy) * WIDTH + x0;
            for dx in 0..TILE_WIDTH {
                let bit = (row_bits >> (TILE_WIDTH - 1 - dx)) & 1;
                let color = self.colors[usize::from(bit)];
                let px = &mut plane[line + dx];
                *px = match self.op {
                    TileOp::Copy => color,
                    TileOp::Xor => *px ^ color,
                };
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/tile.rs"]
mod tests;
