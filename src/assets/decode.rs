use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{StackError, StackResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raster layer in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Fully transparent image of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba8_premul: Arc::new(vec![0u8; width as usize * height as usize * 4]),
        }
    }

    /// Take ownership of a straight-alpha image and premultiply it.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }

    /// Whether either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        [px[0], px[1], px[2], px[3]]
    }

    /// Convert back to a straight-alpha [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> StackResult<image::RgbaImage> {
        let mut straight = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight).ok_or_else(|| {
            StackError::Other(anyhow::anyhow!(
                "pixel buffer does not match {}x{}",
                self.width,
                self.height
            ))
        })
    }

    /// Resample to an exact size.
    pub fn resized(&self, width: u32, height: u32) -> StackResult<Self> {
        let straight = self.to_rgba_image()?;
        let out = image::imageops::resize(
            &straight,
            width,
            height,
            image::imageops::FilterType::Lanczos3,
        );
        Ok(Self::from_rgba_image(out))
    }
}

/// Decode any format supported by `image` into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> StackResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(PreparedImage::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> StackResult<PreparedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        StackError::Other(err) => {
            StackError::Other(err.context(format!("decode image '{}'", path.display())))
        }
        other => other,
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
