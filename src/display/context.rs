use crate::foundation::core::{
    ContentBounds, DISPLAY_BOUNDS, HEIGHT, PALETTE_SIZE, Rgb8, TILE_HEIGHT, TILE_WIDTH, WIDTH,
};

/// Maximum fine horizontal scroll offset.
pub const MAX_H_OFFSET: u8 = (TILE_WIDTH - 1) as u8;
/// Maximum fine vertical scroll offset.
pub const MAX_V_OFFSET: u8 = (TILE_HEIGHT - 1) as u8;

/// All persistent decoder state: indexed pixel memory, color table, scroll offsets,
/// special colors, and the most recently composed RGBA raster.
///
/// Instructions mutate it through the `pub(crate)` primitives; hosts read it through
/// the accessors.
#[derive(Clone, Debug)]
pub struct DisplayContext {
    pixels: Vec<u8>,
    // Scroll target; swapped with `pixels` after every coarse scroll.
    back: Vec<u8>,
    palette: [Rgb8; PALETTE_SIZE],
    h_offset: u8,
    v_offset: u8,
    key_color: Option<u8>,
    background_color: Option<u8>,
    border_color: Option<u8>,
    raster: Vec<u8>,
    background_rgba: [u8; 4],
    content_bounds: ContentBounds,
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayContext {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; WIDTH * HEIGHT],
            back: vec![0; WIDTH * HEIGHT],
            palette: [Rgb8::BLACK; PALETTE_SIZE],
            h_offset: 0,
            v_offset: 0,
            key_color: None,
            background_color: None,
            border_color: None,
            raster: vec![0; WIDTH * HEIGHT * 4],
            background_rgba: [0; 4],
            content_bounds: ContentBounds::default(),
        }
    }

    /// Restore construction-time defaults in place; buffers are zeroed, not reallocated.
    pub fn reset(&mut self) {
        self.pixels.fill(0);
        self.back.fill(0);
        self.palette = [Rgb8::BLACK; PALETTE_SIZE];
        self.h_offset = 0;
        self.v_offset = 0;
        self.key_color = None;
        self.background_color = None;
        self.border_color = None;
        self.raster.fill(0);
        self.background_rgba = [0; 4];
        self.content_bounds = ContentBounds::default();
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some(self.pixels[y * WIDTH + x])
    }

    /// Row-major indexed plane, `WIDTH * HEIGHT` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn palette(&self) -> &[Rgb8; PALETTE_SIZE] {
        &self.palette
    }

    pub fn h_offset(&self) -> u8 {
        self.h_offset
    }

    pub fn v_offset(&self) -> u8 {
        self.v_offset
    }

    pub fn key_color(&self) -> Option<u8> {
        self.key_color
    }

    pub fn background_color(&self) -> Option<u8> {
        self.background_color
    }

    pub fn border_color(&self) -> Option<u8> {
        self.border_color
    }

    /// Last composed straight-alpha RGBA8 raster, `WIDTH * HEIGHT * 4` bytes.
    pub fn raster(&self) -> &[u8] {
        &self.raster
    }

    /// Background color with a boolean alpha (0 or 1), not the raster's 0..=255 scale.
    pub fn background_rgba(&self) -> [u8; 4] {
        self.background_rgba
    }

    pub fn content_bounds(&self) -> ContentBounds {
        self.content_bounds
    }

    /// Store a 4-bit-per-channel color, scaled to 8 bits.
    pub fn set_palette_entry(&mut self, index: u8, r4: u8, g4: u8, b4: u8) {
        self.palette[usize::from(index & 0x0F)] = Rgb8::from_4bit(r4, g4, b4);
    }

    pub(crate) fn set_offsets(&mut self, h: u8, v: u8) {
        self.h_offset = h.min(MAX_H_OFFSET);
        self.v_offset = v.min(MAX_V_OFFSET);
    }

    pub(crate) fn set_key_color(&mut self, color: Option<u8>) {
        self.key_color = color.map(|c| c & 0x0F);
    }

    pub(crate) fn set_background_color(&mut self, color: Option<u8>) {
        self.background_color = color.map(|c| c & 0x0F);
    }

    pub(crate) fn set_border_color(&mut self, color: Option<u8>) {
        self.border_color = color.map(|c| c & 0x0F);
    }

    pub(crate) fn fill(&mut self, color: u8) {
        self.pixels.fill(color & 0x0F);
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Fill the back buffer via `sample(x, y)` for every destination pixel, then swap it
    /// in as the live plane. `sample` reads the pre-swap plane.
    pub(crate) fn remap(&mut self, mut sample: impl FnMut(&[u8], usize, usize) -> u8) {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.back[y * WIDTH + x] = sample(&self.pixels, x, y) & 0x0F;
            }
        }
        std::mem::swap(&mut self.pixels, &mut self.back);
    }

    /// Recompute the raster, background color and content bounds from current state.
    pub fn compose_frame(&mut self, force_key: bool) {
        let [left, top, right, bottom] = DISPLAY_BOUNDS;
        let h = usize::from(self.h_offset);
        let v = usize::from(self.v_offset);

        let mut bounds = ContentBounds::SEED;
        let mut found = false;

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let in_border = x < left || y < top || x >= right || y >= bottom;
                let index = match self.border_color {
                    Some(border) if in_border => border,
                    // Offset reads run past the row end into the next row, and past the
                    // plane end into index 0.
                    _ => self
                        .pixels
                        .get((y + v) * WIDTH + x + h)
                        .copied()
                        .unwrap_or(0),
                };

                let transparent = Some(index) == self.key_color
                    || (force_key
                        && (self.background_color.is_none()
                            || Some(index) == self.background_color));

                let rgb = self.palette[usize::from(index & 0x0F)];
                let at = (y * WIDTH + x) * 4;
                self.raster[at] = rgb.r;
                self.raster[at + 1] = rgb.g;
                self.raster[at + 2] = rgb.b;
                self.raster[at + 3] = if transparent { 0 } else { 255 };

                if !transparent {
                    found = true;
                    let (xu, yu) = (x as u32, y as u32);
                    bounds.x0 = bounds.x0.min(xu);
                    bounds.y0 = bounds.y0.min(yu);
                    bounds.x1 = bounds.x1.max(xu);
                    bounds.y1 = bounds.y1.max(yu);
                }
            }
        }

        self.content_bounds = if found || !force_key {
            ContentBounds {
                x1: bounds.x1 + 1,
                y1: bounds.y1 + 1,
                ..bounds
            }
        } else {
            bounds
        };

        self.background_rgba = match self.background_color {
            None => [0, 0, 0, if force_key { 0 } else { 1 }],
            Some(bg) => {
                let rgb = self.palette[usize::from(bg)];
                let keyed = Some(bg) == self.key_color || force_key;
                [rgb.r, rgb.g, rgb.b, if keyed { 0 } else { 1 }]
            }
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/context.rs"]
mod tests;
