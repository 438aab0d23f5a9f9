use std::ops::Range;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    foundation::error::{CdgError, CdgResult},
    render::export::{ExportOptions, write_png},
    render::renderer::{OwnedFrame, RenderOptions, Renderer},
};

/// Fixed-rate sampling of a time range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceOptions {
    pub fps: u32,
    pub start_secs: f64,
    /// Exclusive. `None` runs to the end of the stream.
    pub end_secs: Option<f64>,
    pub render: RenderOptions,
    /// Skip frames whose raster did not change since the previous one.
    pub changed_only: bool,
    /// Frames held in memory before they are handed to the sink. 0 is treated as 1.
    pub chunk_size: usize,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            start_secs: 0.0,
            end_secs: None,
            render: RenderOptions::default(),
            changed_only: false,
            chunk_size: 64,
        }
    }
}

impl SequenceOptions {
    /// Tick numbers (`time * fps`) covered by these options against a stream of
    /// `duration_secs`.
    pub fn ticks(&self, duration_secs: f64) -> CdgResult<Range<u64>> {
        if self.fps == 0 {
            return Err(CdgError::invalid_argument("sequence fps must be > 0"));
        }
        let end = self.end_secs.unwrap_or(duration_secs);
        if !self.start_secs.is_finite() || self.start_secs < 0.0 || !end.is_finite() {
            return Err(CdgError::invalid_argument(
                "sequence range must be finite and non-negative",
            ));
        }
        if end <= self.start_secs {
            return Err(CdgError::invalid_argument(format!(
                "sequence range must be non-empty, got {}..{}",
                self.start_secs, end
            )));
        }

        let fps = f64::from(self.fps);
        Ok((self.start_secs * fps).ceil() as u64..(end * fps).ceil() as u64)
    }

    /// Presentation times covered by these options, one per tick.
    pub fn times(&self, duration_secs: f64) -> CdgResult<Vec<f64>> {
        Ok(self
            .ticks(duration_secs)?
            .map(|tick| self.time_for_tick(tick))
            .collect())
    }

    pub fn time_for_tick(&self, tick: u64) -> f64 {
        tick as f64 / f64::from(self.fps)
    }

    fn normalized_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

/// One rendered frame of a sequence, tagged with its tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceFrame {
    pub tick: u64,
    pub frame: OwnedFrame,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceStats {
    pub frames_total: u64,
    pub frames_emitted: u64,
    /// Unchanged frames dropped by `changed_only`.
    pub frames_skipped: u64,
}

/// Render frames at a fixed rate and hand them to `sink` in time-ordered chunks of at
/// most `opts.chunk_size` frames. Only one chunk is resident at a time.
#[tracing::instrument(level = "debug", skip(renderer, sink))]
pub fn render_sequence(
    renderer: &mut Renderer,
    opts: &SequenceOptions,
    mut sink: impl FnMut(&[SequenceFrame]) -> CdgResult<()>,
) -> CdgResult<SequenceStats> {
    let ticks = opts.ticks(renderer.duration_secs())?;
    let chunk_size = opts.normalized_chunk_size();
    let mut stats = SequenceStats::default();
    let mut chunk = Vec::with_capacity(chunk_size);

    for tick in ticks {
        stats.frames_total += 1;
        let t = opts.time_for_tick(tick);
        let frame = renderer.render(t, opts.render)?;
        if opts.changed_only && !frame.changed {
            stats.frames_skipped += 1;
            continue;
        }
        chunk.push(SequenceFrame {
            tick,
            frame: frame.to_owned_frame(t),
        });

        if chunk.len() == chunk_size {
            sink(&chunk)?;
            stats.frames_emitted += chunk.len() as u64;
            chunk.clear();
        }
    }

    if !chunk.is_empty() {
        sink(&chunk)?;
        stats.frames_emitted += chunk.len() as u64;
    }

    tracing::debug!(
        total = stats.frames_total,
        emitted = stats.frames_emitted,
        skipped = stats.frames_skipped,
        "sequence rendered"
    );
    Ok(stats)
}

/// Output path for the frame at `tick`, so names keep their timing under `changed_only`.
pub fn frame_path(dir: &Path, tick: u64) -> PathBuf {
    dir.join(format!("frame_{tick:06}.png"))
}

/// Render a sequence and encode each chunk to `dir/frame_NNNNNN.png`, optionally on the
/// rayon pool.
pub fn write_png_sequence(
    renderer: &mut Renderer,
    dir: &Path,
    opts: &SequenceOptions,
    export: &ExportOptions,
    parallel: bool,
) -> CdgResult<SequenceStats> {
    let write =
        |f: &SequenceFrame| write_png(&frame_path(dir, f.tick), &f.frame.as_frame(), export);

    render_sequence(renderer, opts, |chunk| {
        if parallel {
            chunk.par_iter().try_for_each(&write)
        } else {
            chunk.iter().try_for_each(&write)
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequence.rs"]
mod tests;
