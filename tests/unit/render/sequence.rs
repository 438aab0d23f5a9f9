use super::*;
use crate::foundation::core::{HEIGHT, WIDTH};
use crate::instruction::{Instruction, MemoryPreset, StreamBuilder};

fn two_presets() -> Renderer {
    let mut b = StreamBuilder::new();
    b.push(&Instruction::MemoryPreset(MemoryPreset { color: 1, repeat: 0 }))
        .pad_to_time(0.5)
        .push(&Instruction::MemoryPreset(MemoryPreset { color: 2, repeat: 0 }))
        .pad_to_time(1.0);
    Renderer::new(b.into_bytes())
}

#[test]
fn times_cover_half_open_range() {
    let opts = SequenceOptions {
        fps: 10,
        end_secs: Some(1.0),
        ..SequenceOptions::default()
    };
    let times = opts.times(99.0).unwrap();
    assert_eq!(times.len(), 10);
    assert_eq!(times[0], 0.0);
    assert!(times.iter().all(|&t| t < 1.0));
}

#[test]
fn times_default_to_stream_duration() {
    let opts = SequenceOptions {
        fps: 4,
        start_secs: 0.5,
        ..SequenceOptions::default()
    };
    assert_eq!(opts.times(2.0).unwrap(), vec![0.5, 0.75, 1.0, 1.25, 1.5, 1.75]);
}

#[test]
fn bad_sequence_options_are_rejected() {
    let zero_fps = SequenceOptions {
        fps: 0,
        ..SequenceOptions::default()
    };
    assert!(matches!(
        zero_fps.times(1.0),
        Err(CdgError::InvalidArgument(_))
    ));

    let empty = SequenceOptions {
        start_secs: 2.0,
        end_secs: Some(1.0),
        ..SequenceOptions::default()
    };
    assert!(empty.times(5.0).is_err());

    let negative = SequenceOptions {
        start_secs: -1.0,
        ..SequenceOptions::default()
    };
    assert!(negative.times(5.0).is_err());
}

fn collect(r: &mut Renderer, opts: &SequenceOptions) -> (Vec<SequenceFrame>, SequenceStats) {
    let mut out = Vec::new();
    let stats = render_sequence(r, opts, |chunk| {
        out.extend_from_slice(chunk);
        Ok(())
    })
    .unwrap();
    (out, stats)
}

#[test]
fn changed_only_keeps_frames_that_recomposed() {
    let mut r = two_presets();
    let opts = SequenceOptions {
        fps: 10,
        changed_only: true,
        ..SequenceOptions::default()
    };
    let (frames, stats) = collect(&mut r, &opts);
    let ticks: Vec<u64> = frames.iter().map(|f| f.tick).collect();
    assert_eq!(ticks, vec![0, 5]);
    assert_eq!(frames[1].frame.time_secs, 0.5);
    assert_eq!(&frames[1].frame.raster[..4], &[0, 0, 0, 255]);
    assert_eq!(
        stats,
        SequenceStats {
            frames_total: 10,
            frames_emitted: 2,
            frames_skipped: 8,
        }
    );
}

#[test]
fn full_sequence_has_one_frame_per_tick() {
    let mut r = two_presets();
    let (frames, stats) = collect(&mut r, &SequenceOptions::default());
    assert_eq!(frames.len(), 30);
    assert_eq!(stats.frames_emitted, 30);
    assert!(frames[0].frame.changed);
    assert!(!frames[1].frame.changed);
    assert!(frames.iter().zip(0u64..).all(|(f, tick)| f.tick == tick));
}

#[test]
fn resident_frames_never_exceed_chunk_size() {
    let mut b = StreamBuilder::new();
    b.push(&Instruction::MemoryPreset(MemoryPreset { color: 1, repeat: 0 }))
        .pad_to_time(20.0);
    let mut r = Renderer::new(b.into_bytes());
    let opts = SequenceOptions {
        chunk_size: 16,
        ..SequenceOptions::default()
    };

    let mut calls = 0;
    let mut peak_bytes = 0;
    let mut next_tick = 0;
    let stats = render_sequence(&mut r, &opts, |chunk| {
        calls += 1;
        assert!(!chunk.is_empty() && chunk.len() <= 16);
        assert_eq!(chunk[0].tick, next_tick);
        next_tick = chunk[chunk.len() - 1].tick + 1;
        let bytes: usize = chunk.iter().map(|f| f.frame.raster.len()).sum();
        peak_bytes = peak_bytes.max(bytes);
        Ok(())
    })
    .unwrap();

    assert_eq!(stats.frames_emitted, 600);
    assert_eq!(calls, 600 / 16 + 1);
    assert_eq!(peak_bytes, 16 * WIDTH * HEIGHT * 4);
}

#[test]
fn zero_chunk_size_emits_single_frames() {
    let mut r = two_presets();
    let opts = SequenceOptions {
        fps: 4,
        chunk_size: 0,
        ..SequenceOptions::default()
    };
    let mut sizes = Vec::new();
    render_sequence(&mut r, &opts, |chunk| {
        sizes.push(chunk.len());
        Ok(())
    })
    .unwrap();
    assert_eq!(sizes, vec![1; 4]);
}

#[test]
fn sink_errors_stop_the_sequence() {
    let mut r = two_presets();
    let opts = SequenceOptions {
        chunk_size: 5,
        ..SequenceOptions::default()
    };
    let mut calls = 0;
    let err = render_sequence(&mut r, &opts, |_| {
        calls += 1;
        Err(CdgError::export("disk full"))
    })
    .unwrap_err();
    assert!(matches!(err, CdgError::Export(_)));
    assert_eq!(calls, 1);
}

#[test]
fn png_names_follow_ticks_when_frames_are_skipped() {
    let dir = std::path::PathBuf::from("target").join("sequence_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let mut r = two_presets();
    let opts = SequenceOptions {
        fps: 10,
        changed_only: true,
        chunk_size: 1,
        ..SequenceOptions::default()
    };
    let stats = write_png_sequence(&mut r, &dir, &opts, &ExportOptions::default(), true).unwrap();

    assert_eq!(stats.frames_emitted, 2);
    assert!(frame_path(&dir, 0).exists());
    assert!(frame_path(&dir, 5).exists());
    assert!(!frame_path(&dir, 1).exists());
    assert_eq!(frame_path(&dir, 5), dir.join("frame_000005.png"));
}
