use super::*;
use crate::instruction::{
    BorderPreset, DefineTransparent, Instruction, MemoryPreset, StreamBuilder, TileBlock, TileOp,
};

fn preset(color: u8) -> Instruction {
    Instruction::MemoryPreset(MemoryPreset { color, repeat: 0 })
}

fn tile(op: TileOp, row: u8, column: u8, colors: [u8; 2]) -> Instruction {
    Instruction::TileBlock(TileBlock {
        op,
        colors,
        row,
        column,
        bits: [0b11_0110; 12],
    })
}

fn busy_stream() -> Vec<u8> {
    let mut b = StreamBuilder::new();
    b.push(&preset(2));
    for i in 0..200u16 {
        b.pad_to_index(usize::from(i) * 2 + 1);
        let row = (i % 16 + 1) as u8;
        let column = (i % 48 + 1) as u8;
        let op = if i % 3 == 0 { TileOp::Xor } else { TileOp::Copy };
        b.push(&tile(op, row, column, [(i % 16) as u8, 15 - (i % 16) as u8]));
    }
    b.into_bytes()
}

#[test]
fn rejects_invalid_times() {
    let mut r = Renderer::new(Vec::new());
    for t in [f64::NAN, -0.5, f64::INFINITY, f64::NEG_INFINITY] {
        let err = r.render(t, RenderOptions::default()).unwrap_err();
        assert!(matches!(err, CdgError::InvalidArgument(_)), "{t}");
    }
    // State is untouched by rejected calls.
    assert_eq!(r.decoder().position(), 0);
}

#[test]
fn first_render_always_composes() {
    let mut r = Renderer::new(Vec::new());
    let f = r.render(0.0, RenderOptions::default()).unwrap();
    assert!(f.changed);
    assert_eq!(f.raster.len(), WIDTH * HEIGHT * 4);
    assert!(f.raster.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn repeated_time_is_unchanged_and_identical() {
    let mut r = Renderer::new(busy_stream());
    let a = r.render(0.7, RenderOptions::default()).unwrap().raster.to_vec();
    let f = r.render(0.7, RenderOptions::default()).unwrap();
    assert!(!f.changed);
    assert_eq!(f.raster, a.as_slice());
}

#[test]
fn force_key_toggle_recomposes() {
    let mut b = StreamBuilder::new();
    b.push(&preset(4));
    let mut r = Renderer::new(b.into_bytes());

    let f = r.render(0.0, RenderOptions::default()).unwrap();
    assert!(f.changed);
    assert_eq!(f.raster[3], 255);

    let f = r.render(0.0, RenderOptions { force_key: true }).unwrap();
    assert!(f.changed);
    assert_eq!(f.raster[3], 0);
    assert_eq!(f.background_rgba[3], 0);

    let f = r.render(0.0, RenderOptions { force_key: true }).unwrap();
    assert!(!f.changed);
}

#[test]
fn rewind_matches_fresh_renderer() {
    let bytes = busy_stream();

    let mut seeked = Renderer::new(bytes.clone());
    seeked.render(1.0, RenderOptions::default()).unwrap();
    let back = seeked
        .render(0.5, RenderOptions::default())
        .unwrap()
        .to_owned_frame(0.5);
    assert!(back.changed);

    let mut fresh = Renderer::new(bytes);
    let direct = fresh
        .render(0.5, RenderOptions::default())
        .unwrap()
        .to_owned_frame(0.5);

    assert_eq!(back, direct);
    assert_eq!(seeked.context().pixels(), fresh.context().pixels());
    assert_eq!(seeked.context().palette(), fresh.context().palette());
    assert_eq!(seeked.decoder().position(), fresh.decoder().position());
}

#[test]
fn rewind_discards_state_set_after_target() {
    let mut b = StreamBuilder::new();
    b.push(&preset(1))
        .pad_to_time(1.0)
        .push(&Instruction::BorderPreset(BorderPreset { color: 5 }))
        .push(&Instruction::DefineTransparent(DefineTransparent { index: 1 }));
    let mut r = Renderer::new(b.into_bytes());

    r.render(2.0, RenderOptions::default()).unwrap();
    assert_eq!(r.context().border_color(), Some(5));
    assert_eq!(r.context().key_color(), Some(1));

    let f = r.render(0.5, RenderOptions::default()).unwrap();
    assert!(f.changed);
    assert_eq!(f.raster[3], 255);
    assert_eq!(r.context().border_color(), None);
    assert_eq!(r.context().key_color(), None);
}

#[test]
fn xor_tile_pair_restores_raster() {
    let mut b = StreamBuilder::new();
    b.push(&preset(6))
        .pad_to_time(0.1)
        .push(&tile(TileOp::Xor, 3, 3, [5, 10]))
        .pad_to_time(0.2)
        .push(&tile(TileOp::Xor, 3, 3, [5, 10]));
    let mut r = Renderer::new(b.into_bytes());

    let before = r.render(0.0, RenderOptions::default()).unwrap().raster.to_vec();
    let mid = r.context().pixels().to_vec();
    r.render(0.15, RenderOptions::default()).unwrap();
    assert_ne!(r.context().pixels(), mid.as_slice());
    let after = r.render(0.25, RenderOptions::default()).unwrap();
    assert!(after.changed);
    assert_eq!(after.raster, before.as_slice());
}

#[test]
fn reads_stream_from_reader() {
    let bytes = busy_stream();
    let len = bytes.len();
    let r = Renderer::from_reader(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(r.decoder().bytes().len(), len);
    assert_eq!(r.duration_secs(), (len / 24) as f64 / 300.0);
}

#[test]
fn missing_path_is_an_error() {
    let err = Renderer::from_path("target/definitely/missing.cdg").unwrap_err();
    assert!(err.to_string().contains("missing.cdg"));
}
