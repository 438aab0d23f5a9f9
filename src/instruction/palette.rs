use super::Payload;
use crate::display::context::DisplayContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteHalf {
    /// Entries 0..=7.
    Low,
    /// Entries 8..=15.
    High,
}

impl PaletteHalf {
    pub fn base(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 8,
        }
    }
}

/// Eight 12-bit colors for one half of the color table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadPalette {
    pub half: PaletteHalf,
    /// `[r, g, b]` 4-bit channels per slot.
    pub colors: [[u8; 3]; 8],
}

impl LoadPalette {
    pub fn parse(data: &Payload, half: PaletteHalf) -> Self {
        let mut colors = [[0u8; 3]; 8];
        for (slot, pair) in colors.iter_mut().zip(data.chunks_exact(2)) {
            // Two 6-bit symbols: rrrrgg ggbbbb
            let hi = pair[0] & 0x3F;
            let lo = pair[1] & 0x3F;
            *slot = [hi >> 2, ((hi & 0x03) << 2) | (lo >> 4), lo & 0x0F];
        }
        Self { half, colors }
    }

    pub fn apply(&self, ctx: &mut DisplayContext) {
        let base = self.half.base();
        for (slot, &[r, g, b]) in (0u8..).zip(&self.colors) {
            ctx.set_palette_entry(base + slot, r, g, b);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/palette.rs"]
mod tests;
