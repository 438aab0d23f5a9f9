use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{DISPLAY_BOUNDS, HEIGHT, WIDTH},
    foundation::error::{CdgError, CdgResult},
    render::renderer::Frame,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExportOptions {
    /// Keep only the 288×192 display area, dropping the border.
    pub crop_to_display: bool,
}

impl Frame<'_> {
    /// Convert to an [`image::RgbaImage`] (straight alpha).
    pub fn to_rgba_image(&self, opts: &ExportOptions) -> CdgResult<image::RgbaImage> {
        let full = image::RgbaImage::from_raw(WIDTH as u32, HEIGHT as u32, self.raster.to_vec())
            .ok_or_else(|| {
                CdgError::export(format!(
                    "raster is {} bytes, expected {}",
                    self.raster.len(),
                    WIDTH * HEIGHT * 4
                ))
            })?;

        if !opts.crop_to_display {
            return Ok(full);
        }

        let [left, top, right, bottom] = DISPLAY_BOUNDS;
        Ok(image::imageops::crop_imm(
            &full,
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
        .to_image())
    }
}

/// Write `frame` as a PNG, creating the parent directory if needed.
pub fn write_png(path: &Path, frame: &Frame<'_>, opts: &ExportOptions) -> CdgResult<()> {
    let img = frame.to_rgba_image(opts)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
