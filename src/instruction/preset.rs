use super::Payload;
use crate::display::context::DisplayContext;

/// Fill the whole plane with one color and make it the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryPreset {
    pub color: u8,
    /// Repeat counter for lossy transports; identical repeats are harmless so it is unused.
    pub repeat: u8,
}

impl MemoryPreset {
    pub fn parse(data: &Payload) -> Self {
        Self {
            color: data[0] & 0x0F,
            repeat: data[1] & 0x0F,
        }
    }

    pub fn apply(&self, ctx: &mut DisplayContext) {
        ctx.fill(self.color);
        ctx.set_background_color(Some(self.color));
        ctx.set_border_color(None);
        ctx.set_offsets(0, 0);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderPreset {
    pub color: u8,
}

impl BorderPreset {
    pub fn parse(data: &Payload) -> Self {
        Self {
            color: data[0] & 0x0F,
        }
    }

    pub fn apply(&self, ctx: &mut DisplayContext) {
        ctx.set_border_color(Some(self.color));
    }
}

/// Designate one palette index as transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefineTransparent {
    pub index: u8,
}

impl DefineTransparent {
    pub fn parse(data: &Payload) -> Self {
        Self {
            index: data[0] & 0x0F,
        }
    }

    pub fn apply(&self, ctx: &mut DisplayContext) {
        ctx.set_key_color(Some(self.index));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/preset.rs"]
mod tests;
