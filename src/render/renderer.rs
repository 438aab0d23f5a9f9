use std::io::Read;

use anyhow::Context as _;

use crate::{
    decode::parser::Decoder,
    display::context::DisplayContext,
    foundation::core::{ContentBounds, HEIGHT, WIDTH},
    foundation::error::{CdgError, CdgResult},
};

/// Per-call rendering options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderOptions {
    /// Treat the background color (or everything, if none is set) as transparent.
    pub force_key: bool,
}

/// Result of one [`Renderer::render`] call. Borrows the renderer's raster.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Straight-alpha RGBA8, `WIDTH * HEIGHT * 4` bytes, alpha 0 or 255.
    pub raster: &'a [u8],
    /// Whether the raster was recomposed by this call.
    pub changed: bool,
    /// Background RGB plus a boolean alpha (0 or 1).
    pub background_rgba: [u8; 4],
    pub content_bounds: ContentBounds,
}

impl Frame<'_> {
    pub const WIDTH: u32 = WIDTH as u32;
    pub const HEIGHT: u32 = HEIGHT as u32;

    /// Copy the borrowed raster into an owned frame.
    pub fn to_owned_frame(&self, time_secs: f64) -> OwnedFrame {
        OwnedFrame {
            time_secs,
            raster: self.raster.to_vec(),
            changed: self.changed,
            background_rgba: self.background_rgba,
            content_bounds: self.content_bounds,
        }
    }
}

/// Owned copy of a [`Frame`], tagged with its presentation time.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedFrame {
    pub time_secs: f64,
    pub raster: Vec<u8>,
    pub changed: bool,
    pub background_rgba: [u8; 4],
    pub content_bounds: ContentBounds,
}

impl OwnedFrame {
    pub fn as_frame(&self) -> Frame<'_> {
        Frame {
            raster: &self.raster,
            changed: self.changed,
            background_rgba: self.background_rgba,
            content_bounds: self.content_bounds,
        }
    }
}

/// Decodes one stream and renders its display state at arbitrary times.
///
/// Each renderer owns its stream and state; independent renderers need no coordination.
#[derive(Clone, Debug)]
pub struct Renderer {
    ctx: DisplayContext,
    decoder: Decoder,
    // None until the first render, so the first call always composes.
    previous_force_key: Option<bool>,
}

impl Renderer {
    /// Take ownership of a complete CD+G stream.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            ctx: DisplayContext::new(),
            decoder: Decoder::new(bytes),
            previous_force_key: None,
        }
    }

    /// Read a whole stream from `reader`.
    pub fn from_reader(mut reader: impl Read) -> CdgResult<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .context("read cdg stream")?;
        Ok(Self::new(bytes))
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> CdgResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read cdg '{}'", path.display()))?;
        Ok(Self::new(bytes))
    }

    pub fn context(&self) -> &DisplayContext {
        &self.ctx
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn duration_secs(&self) -> f64 {
        self.decoder.duration_secs()
    }

    /// Bring the display to its state at `time_secs` and return the composed frame.
    ///
    /// Times may go backwards; a backward seek resets the display and replays the stream.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn render(&mut self, time_secs: f64, opts: RenderOptions) -> CdgResult<Frame<'_>> {
        if !time_secs.is_finite() || time_secs < 0.0 {
            return Err(CdgError::invalid_argument(format!(
                "render time must be finite and non-negative, got {time_secs}"
            )));
        }

        let advance = self.decoder.advance_to(time_secs);
        let changed = !advance.instructions.is_empty()
            || advance.rewound
            || self.previous_force_key != Some(opts.force_key);
        self.previous_force_key = Some(opts.force_key);

        if advance.rewound {
            self.ctx.reset();
        }
        for inst in &advance.instructions {
            inst.apply(&mut self.ctx);
        }
        if changed {
            self.ctx.compose_frame(opts.force_key);
        }

        Ok(Frame {
            raster: self.ctx.raster(),
            changed,
            background_rgba: self.ctx.background_rgba(),
            content_bounds: self.ctx.content_bounds(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
