//! Packet encoding, the inverse of [`Instruction::parse`].
//!
//! Used to author small streams in tests and tools.

use super::{CDG_COMMAND, Instruction, PAYLOAD_OFFSET, PAYLOAD_SIZE, Payload, scroll::ScrollCmd};
use crate::foundation::core::{PACKET_SIZE, packet_index_for_time};

impl ScrollCmd {
    fn bits(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Forward => 1,
            Self::Back => 2,
        }
    }
}

impl Instruction {
    /// Encode as a full 24-byte graphics packet; unused bytes are zero.
    pub fn to_packet(&self) -> [u8; PACKET_SIZE] {
        let mut data: Payload = [0; PAYLOAD_SIZE];
        match self {
            Self::MemoryPreset(i) => {
                data[0] = i.color;
                data[1] = i.repeat;
            }
            Self::BorderPreset(i) => data[0] = i.color,
            Self::TileBlock(i) => {
                data[0] = i.colors[0];
                data[1] = i.colors[1];
                data[2] = i.row;
                data[3] = i.column;
                data[4..].copy_from_slice(&i.bits);
            }
            Self::Scroll(i) => {
                data[0] = i.fill_color;
                data[1] = (i.h_cmd.bits() << 4) | i.h_offset;
                data[2] = (i.v_cmd.bits() << 4) | i.v_offset;
            }
            Self::DefineTransparent(i) => data[0] = i.index,
            Self::LoadPalette(i) => {
                for (pair, &[r, g, b]) in data.chunks_exact_mut(2).zip(&i.colors) {
                    pair[0] = ((r & 0x0F) << 2) | ((g >> 2) & 0x03);
                    pair[1] = ((g & 0x03) << 4) | (b & 0x0F);
                }
            }
        }

        let mut packet = [0u8; PACKET_SIZE];
        packet[0] = CDG_COMMAND;
        packet[1] = self.kind().code();
        packet[PAYLOAD_OFFSET..PAYLOAD_OFFSET + PAYLOAD_SIZE].copy_from_slice(&data);
        packet
    }
}

/// Accumulates packets into a stream laid out on the fixed packet clock.
#[derive(Clone, Debug, Default)]
pub struct StreamBuilder {
    bytes: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn packet_count(&self) -> usize {
        self.bytes.len() / PACKET_SIZE
    }

    pub fn push(&mut self, inst: &Instruction) -> &mut Self {
        self.bytes.extend_from_slice(&inst.to_packet());
        self
    }

    pub fn push_raw(&mut self, packet: [u8; PACKET_SIZE]) -> &mut Self {
        self.bytes.extend_from_slice(&packet);
        self
    }

    /// Append an all-zero packet (command 0, not graphics).
    pub fn push_empty(&mut self) -> &mut Self {
        self.push_raw([0; PACKET_SIZE])
    }

    /// Pad with empty packets until the next packet lands at `index`.
    pub fn pad_to_index(&mut self, index: usize) -> &mut Self {
        while self.packet_count() < index {
            self.push_empty();
        }
        self
    }

    /// Pad so the next packet is the one decoded at `secs`.
    pub fn pad_to_time(&mut self, secs: f64) -> &mut Self {
        self.pad_to_index(packet_index_for_time(secs) as usize)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/encode.rs"]
mod tests;
