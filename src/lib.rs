//! cdgplay decodes CD+G subcode graphics streams and renders the display state at any
//! presentation time.
//!
//! A CD+G stream is a flat sequence of 24-byte packets clocked at a fixed 300 packets per
//! second. Each graphics packet carries one instruction that mutates a 300×216 indexed-color
//! display. There are no keyframes: the picture at time `t` is the result of every
//! instruction before it.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: [`Decoder::advance_to`] moves a cursor to the packet for `t` and yields the
//!    instructions it passed, or flags a rewind on a backward seek.
//! 2. **Apply**: each [`Instruction`] mutates the [`DisplayContext`].
//! 3. **Compose**: [`DisplayContext::compose_frame`] resolves palette, border, fine scroll
//!    and transparency into a straight-alpha RGBA8 raster.
//!
//! [`Renderer::render`] runs all three and skips composition when nothing changed.
//!
//! ```
//! use cdgplay::{Instruction, MemoryPreset, RenderOptions, Renderer, StreamBuilder};
//!
//! let mut stream = StreamBuilder::new();
//! stream.push(&Instruction::MemoryPreset(MemoryPreset { color: 3, repeat: 0 }));
//!
//! let mut renderer = Renderer::new(stream.into_bytes());
//! let frame = renderer.render(0.0, RenderOptions::default())?;
//! assert!(frame.changed);
//! assert_eq!(frame.background_rgba, [0, 0, 0, 1]);
//! # Ok::<(), cdgplay::CdgError>(())
//! ```
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO in the core**: decoding and rendering work on an owned byte buffer.
//! - **Fixed buffers**: the plane, scroll buffer and raster are allocated once per renderer.
#![forbid(unsafe_code)]

mod decode;
mod display;
mod foundation;
mod instruction;
mod render;

pub use decode::parser::{Advance, Decoder};
pub use decode::summary::StreamSummary;
pub use display::context::{DisplayContext, MAX_H_OFFSET, MAX_V_OFFSET};
pub use foundation::core::{
    ContentBounds, DISPLAY_BOUNDS, HEIGHT, PACKET_SIZE, PACKETS_PER_SECOND, PALETTE_SIZE, Rgb8,
    TILE_HEIGHT, TILE_WIDTH, WIDTH, packet_index_for_time, time_for_packet_index,
};
pub use foundation::error::{CdgError, CdgResult};
pub use instruction::{
    BorderPreset, CDG_COMMAND, DefineTransparent, Instruction, InstructionKind, LoadPalette,
    MemoryPreset, PacketClass, PaletteHalf, Scroll, ScrollCmd, ScrollEdges, StreamBuilder,
    TileBlock, TileOp,
};
pub use render::export::{ExportOptions, write_png};
pub use render::renderer::{Frame, OwnedFrame, RenderOptions, Renderer};
pub use render::sequence::{
    SequenceFrame, SequenceOptions, SequenceStats, frame_path, render_sequence,
    write_png_sequence,
};
