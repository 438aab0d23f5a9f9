/// Width of the addressable pixel plane.
pub const WIDTH: usize = 300;
/// Height of the addressable pixel plane.
pub const HEIGHT: usize = 216;

/// Tile width in pixels; the unit of horizontal placement and coarse scroll.
pub const TILE_WIDTH: usize = 6;
/// Tile height in pixels; the unit of vertical placement and coarse scroll.
pub const TILE_HEIGHT: usize = 12;

/// Visible display rectangle `[left, top, right, bottom)` inside the plane.
/// Everything outside it is border.
pub const DISPLAY_BOUNDS: [usize; 4] = [
    TILE_WIDTH,
    TILE_HEIGHT,
    WIDTH - TILE_WIDTH,
    HEIGHT - TILE_HEIGHT,
];

/// Size of one subcode packet on the wire.
pub const PACKET_SIZE: usize = 24;
/// Fixed transport rate; not derivable from stream contents.
pub const PACKETS_PER_SECOND: u32 = 300;

/// Number of palette entries in the color table.
pub const PALETTE_SIZE: usize = 16;

/// Index of the first packet at or after `secs` (floored). Negative input maps to 0.
pub fn packet_index_for_time(secs: f64) -> u64 {
    (secs * f64::from(PACKETS_PER_SECOND)).floor().max(0.0) as u64
}

/// Presentation time of packet `index`.
pub fn time_for_packet_index(index: u64) -> f64 {
    (index as f64) / f64::from(PACKETS_PER_SECOND)
}

/// Straight 8-bit RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Expand 4-bit channels to 8 bits (`v * 17`, so 15 maps to 255).
    pub fn from_4bit(r4: u8, g4: u8, b4: u8) -> Self {
        Self {
            r: (r4 & 0x0F) * 17,
            g: (g4 & 0x0F) * 17,
            b: (b4 & 0x0F) * 17,
        }
    }
}

/// Bounding box of opaque content in plane coordinates, `x1`/`y1` exclusive.
///
/// When nothing opaque was found the box is inverted (`x0 > x1`). With `force_key`
/// the box is the untouched search seed `(WIDTH, HEIGHT, 0, 0)`; without it the seed
/// is still widened by one on the max side. Consumers should test [`ContentBounds::is_empty`]
/// rather than relying on either shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ContentBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl ContentBounds {
    /// Search seed: min corner at the far edge, max corner at the origin.
    pub const SEED: Self = Self {
        x0: WIDTH as u32,
        y0: HEIGHT as u32,
        x1: 0,
        y1: 0,
    };

    pub fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl Default for ContentBounds {
    fn default() -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: 0,
            y1: 0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
