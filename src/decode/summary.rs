use std::collections::BTreeMap;

use sha2::Digest as _;

use crate::foundation::core::{PACKET_SIZE, time_for_packet_index};
use crate::foundation::error::{CdgError, CdgResult};
use crate::instruction::{Instruction, InstructionKind, PacketClass};

/// Packet-level census of a stream, without rendering it.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct StreamSummary {
    /// Whole packets in the stream.
    pub packets: u64,
    /// Bytes after the last whole packet.
    pub trailing_bytes: u64,
    /// Packets addressed to the graphics subchannel.
    pub graphics_packets: u64,
    /// Packets for other subchannel modes (including all-zero padding).
    pub foreign_packets: u64,
    /// Graphics packets with an instruction code this decoder does not handle.
    pub unknown_packets: u64,
    /// Decoded instruction counts.
    pub instructions: BTreeMap<InstructionKind, u64>,
    /// Playback length on the packet clock.
    pub duration_secs: f64,
    /// Time of the last decodable instruction, if any.
    pub last_instruction_secs: Option<f64>,
    /// Lowercase hex SHA-256 of the whole input, trailing bytes included.
    pub sha256: String,
}

impl StreamSummary {
    pub fn scan(bytes: &[u8]) -> Self {
        let mut out = Self {
            trailing_bytes: (bytes.len() % PACKET_SIZE) as u64,
            sha256: format!("{:x}", sha2::Sha256::digest(bytes)),
            ..Self::default()
        };

        for (index, chunk) in bytes.chunks_exact(PACKET_SIZE).enumerate() {
            out.packets += 1;
            let Ok(packet) = <&[u8; PACKET_SIZE]>::try_from(chunk) else {
                continue;
            };
            match Instruction::classify(packet) {
                PacketClass::Instruction(inst) => {
                    out.graphics_packets += 1;
                    *out.instructions.entry(inst.kind()).or_default() += 1;
                    out.last_instruction_secs = Some(time_for_packet_index(index as u64));
                }
                PacketClass::Unknown(_) => {
                    out.graphics_packets += 1;
                    out.unknown_packets += 1;
                }
                PacketClass::Foreign(_) => out.foreign_packets += 1,
            }
        }

        out.duration_secs = time_for_packet_index(out.packets);
        out
    }

    pub fn count(&self, kind: InstructionKind) -> u64 {
        self.instructions.get(&kind).copied().unwrap_or(0)
    }

    pub fn decoded_instructions(&self) -> u64 {
        self.instructions.values().sum()
    }

    /// Fail if the stream carries no decodable graphics at all.
    pub fn require_graphics(&self) -> CdgResult<()> {
        if self.decoded_instructions() == 0 {
            return Err(CdgError::decode(format!(
                "no graphics instructions in {} packets",
                self.packets
            )));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> CdgResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CdgError::Other(anyhow::Error::new(e).context("serialize stream summary")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/summary.rs"]
mod tests;
