use crate::foundation::core::{PACKET_SIZE, packet_index_for_time, time_for_packet_index};
use crate::instruction::{Instruction, PacketClass};

/// Instructions decoded by one [`Decoder::advance_to`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Advance {
    /// Decoded instructions in stream order.
    pub instructions: Vec<Instruction>,
    /// The requested time was behind the cursor; decoding restarted from packet 0.
    pub rewound: bool,
}

/// Time-driven cursor over a complete packet stream.
///
/// The stream has no keyframes, so a backward seek replays from the first packet.
#[derive(Clone, Debug)]
pub struct Decoder {
    bytes: Vec<u8>,
    packet_count: usize,
    // Number of packets already consumed; 0 means before the first packet.
    next_unparsed: usize,
}

impl Decoder {
    /// Take ownership of a complete stream. Trailing bytes short of a full packet are ignored.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let packet_count = bytes.len() / PACKET_SIZE;
        Self {
            bytes,
            packet_count,
            next_unparsed: 0,
        }
    }

    pub fn packet_count(&self) -> usize {
        self.packet_count
    }

    /// Playback length implied by the packet clock.
    pub fn duration_secs(&self) -> f64 {
        time_for_packet_index(self.packet_count as u64)
    }

    /// Number of packets consumed so far.
    pub fn position(&self) -> usize {
        self.next_unparsed
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Move the cursor back before the first packet.
    pub fn rewind(&mut self) {
        self.next_unparsed = 0;
    }

    /// Decode every packet up to and including the one presented at `secs`.
    ///
    /// `secs` must already be validated as finite and non-negative.
    #[tracing::instrument(level = "trace", skip(self), fields(position = self.next_unparsed))]
    pub fn advance_to(&mut self, secs: f64) -> Advance {
        let target = usize::try_from(packet_index_for_time(secs)).unwrap_or(usize::MAX);

        let mut out = Advance::default();
        if self.next_unparsed > target.saturating_add(1) {
            tracing::debug!(
                from = self.next_unparsed,
                to = target,
                "backward seek; replaying from start"
            );
            self.rewind();
            out.rewound = true;
        }

        while self.next_unparsed <= target && self.next_unparsed < self.packet_count {
            let index = self.next_unparsed;
            self.next_unparsed += 1;
            if let Some(inst) = self.decode_packet(index) {
                out.instructions.push(inst);
            }
        }

        out
    }

    /// Packet bytes at `index`, if it is a whole packet inside the stream.
    pub fn packet(&self, index: usize) -> Option<&[u8; PACKET_SIZE]> {
        let start = index.checked_mul(PACKET_SIZE)?;
        self.bytes.get(start..start + PACKET_SIZE)?.try_into().ok()
    }

    fn decode_packet(&self, index: usize) -> Option<Instruction> {
        let packet = self.packet(index)?;
        match Instruction::classify(packet) {
            PacketClass::Instruction(inst) => Some(inst),
            PacketClass::Unknown(code) => {
                tracing::debug!(index, code, "unknown instruction type; skipped");
                None
            }
            PacketClass::Foreign(command) => {
                tracing::trace!(index, command, "non-graphics packet; skipped");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/parser.rs"]
mod tests;
