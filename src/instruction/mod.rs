//! The closed CD+G instruction set.
//!
//! Every variant is parsed from the 16-byte payload of one packet and mutates a
//! [`DisplayContext`] through [`Instruction::apply`].
//!
//! - **preset**: memory preset, border preset, define transparent color
//! - **tile**: tile block, plain and XOR
//! - **scroll**: scroll with fill and scroll with wrap
//! - **palette**: load color table, low and high halves

pub mod encode;
pub mod palette;
pub mod preset;
pub mod scroll;
pub mod tile;

use crate::display::context::DisplayContext;
use crate::foundation::core::PACKET_SIZE;

pub use encode::StreamBuilder;
pub use palette::{LoadPalette, PaletteHalf};
pub use preset::{BorderPreset, DefineTransparent, MemoryPreset};
pub use scroll::{Scroll, ScrollCmd, ScrollEdges};
pub use tile::{TileBlock, TileOp};

/// Command byte value selecting the graphics subchannel.
pub const CDG_COMMAND: u8 = 9;

/// Significant bits of every subcode byte; the top two carry P/Q channel data.
pub const SUBCODE_MASK: u8 = 0x3F;

pub const MEMORY_PRESET: u8 = 1;
pub const BORDER_PRESET: u8 = 2;
pub const TILE_BLOCK: u8 = 6;
pub const SCROLL_PRESET: u8 = 20;
pub const SCROLL_COPY: u8 = 24;
pub const DEFINE_TRANSPARENT: u8 = 28;
pub const LOAD_PALETTE_LOW: u8 = 30;
pub const LOAD_PALETTE_HIGH: u8 = 31;
pub const TILE_BLOCK_XOR: u8 = 38;

/// Offset of the instruction payload within a packet.
const PAYLOAD_OFFSET: usize = 4;
/// Payload length in bytes.
pub const PAYLOAD_SIZE: usize = 16;

/// Instruction payload bytes.
pub type Payload = [u8; PAYLOAD_SIZE];

/// One decoded graphics instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    MemoryPreset(MemoryPreset),
    BorderPreset(BorderPreset),
    TileBlock(TileBlock),
    Scroll(Scroll),
    DefineTransparent(DefineTransparent),
    LoadPalette(LoadPalette),
}

/// Stable identifier for each wire-level instruction type.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    MemoryPreset,
    BorderPreset,
    TileBlock,
    TileBlockXor,
    ScrollPreset,
    ScrollCopy,
    DefineTransparent,
    LoadPaletteLow,
    LoadPaletteHigh,
}

impl InstructionKind {
    pub const ALL: [Self; 9] = [
        Self::MemoryPreset,
        Self::BorderPreset,
        Self::TileBlock,
        Self::TileBlockXor,
        Self::ScrollPreset,
        Self::ScrollCopy,
        Self::DefineTransparent,
        Self::LoadPaletteLow,
        Self::LoadPaletteHigh,
    ];

    /// Map a masked instruction byte to its kind, if the code is one this decoder handles.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            MEMORY_PRESET => Self::MemoryPreset,
            BORDER_PRESET => Self::BorderPreset,
            TILE_BLOCK => Self::TileBlock,
            TILE_BLOCK_XOR => Self::TileBlockXor,
            SCROLL_PRESET => Self::ScrollPreset,
            SCROLL_COPY => Self::ScrollCopy,
            DEFINE_TRANSPARENT => Self::DefineTransparent,
            LOAD_PALETTE_LOW => Self::LoadPaletteLow,
            LOAD_PALETTE_HIGH => Self::LoadPaletteHigh,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        match self {
            Self::MemoryPreset => MEMORY_PRESET,
            Self::BorderPreset => BORDER_PRESET,
            Self::TileBlock => TILE_BLOCK,
            Self::TileBlockXor => TILE_BLOCK_XOR,
            Self::ScrollPreset => SCROLL_PRESET,
            Self::ScrollCopy => SCROLL_COPY,
            Self::DefineTransparent => DEFINE_TRANSPARENT,
            Self::LoadPaletteLow => LOAD_PALETTE_LOW,
            Self::LoadPaletteHigh => LOAD_PALETTE_HIGH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MemoryPreset => "memory_preset",
            Self::BorderPreset => "border_preset",
            Self::TileBlock => "tile_block",
            Self::TileBlockXor => "tile_block_xor",
            Self::ScrollPreset => "scroll_preset",
            Self::ScrollCopy => "scroll_copy",
            Self::DefineTransparent => "define_transparent",
            Self::LoadPaletteLow => "load_palette_low",
            Self::LoadPaletteHigh => "load_palette_high",
        }
    }
}

impl std::fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of classifying a single packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PacketClass {
    /// A graphics instruction this decoder understands.
    Instruction(Instruction),
    /// Graphics subchannel, but an instruction code outside the handled set.
    Unknown(u8),
    /// Packet belongs to another subchannel mode.
    Foreign(u8),
}

impl Instruction {
    /// Decode one packet. Returns `None` for foreign subchannel packets and unknown
    /// instruction codes.
    pub fn parse(packet: &[u8; PACKET_SIZE]) -> Option<Self> {
        match Self::classify(packet) {
            PacketClass::Instruction(inst) => Some(inst),
            PacketClass::Unknown(_) | PacketClass::Foreign(_) => None,
        }
    }

    pub fn classify(packet: &[u8; PACKET_SIZE]) -> PacketClass {
        let command = packet[0] & SUBCODE_MASK;
        if command != CDG_COMMAND {
            return PacketClass::Foreign(command);
        }

        let code = packet[1] & SUBCODE_MASK;
        let Some(kind) = InstructionKind::from_code(code) else {
            return PacketClass::Unknown(code);
        };

        let mut payload = [0u8; PAYLOAD_SIZE];
        payload.copy_from_slice(&packet[PAYLOAD_OFFSET..PAYLOAD_OFFSET + PAYLOAD_SIZE]);

        PacketClass::Instruction(match kind {
            InstructionKind::MemoryPreset => Self::MemoryPreset(MemoryPreset::parse(&payload)),
            InstructionKind::BorderPreset => Self::BorderPreset(BorderPreset::parse(&payload)),
            InstructionKind::TileBlock => Self::TileBlock(TileBlock::parse(&payload, TileOp::Copy)),
            InstructionKind::TileBlockXor => {
                Self::TileBlock(TileBlock::parse(&payload, TileOp::Xor))
            }
            InstructionKind::ScrollPreset => {
                Self::Scroll(Scroll::parse(&payload, ScrollEdges::Fill))
            }
            InstructionKind::ScrollCopy => Self::Scroll(Scroll::parse(&payload, ScrollEdges::Wrap)),
            InstructionKind::DefineTransparent => {
                Self::DefineTransparent(DefineTransparent::parse(&payload))
            }
            InstructionKind::LoadPaletteLow => {
                Self::LoadPalette(LoadPalette::parse(&payload, PaletteHalf::Low))
            }
            InstructionKind::LoadPaletteHigh => {
                Self::LoadPalette(LoadPalette::parse(&payload, PaletteHalf::High))
            }
        })
    }

    pub fn kind(&self) -> InstructionKind {
        match self {
            Self::MemoryPreset(_) => InstructionKind::MemoryPreset,
            Self::BorderPreset(_) => InstructionKind::BorderPreset,
            Self::TileBlock(t) => match t.op {
                TileOp::Copy => InstructionKind::TileBlock,
                TileOp::Xor => InstructionKind::TileBlockXor,
            },
            Self::Scroll(s) => match s.edges {
                ScrollEdges::Fill => InstructionKind::ScrollPreset,
                ScrollEdges::Wrap => InstructionKind::ScrollCopy,
            },
            Self::DefineTransparent(_) => InstructionKind::DefineTransparent,
            Self::LoadPalette(p) => match p.half {
                PaletteHalf::Low => InstructionKind::LoadPaletteLow,
                PaletteHalf::High => InstructionKind::LoadPaletteHigh,
            },
        }
    }

    pub fn apply(&self, ctx: &mut DisplayContext) {
        match self {
            Self::MemoryPreset(i) => i.apply(ctx),
            Self::BorderPreset(i) => i.apply(ctx),
            Self::TileBlock(i) => i.apply(ctx),
            Self::Scroll(i) => i.apply(ctx),
            Self::DefineTransparent(i) => i.apply(ctx),
            Self::LoadPalette(i) => i.apply(ctx),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/mod.rs"]
mod tests;
