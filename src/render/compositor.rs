use std::path::Path;

use anyhow::Context;

use crate::{
    assets::decode::PreparedImage,
    assets::store::FixedAssets,
    compile::plan::LayerPlan,
    foundation::core::PositionPolicy,
    foundation::error::{StackError, StackResult},
    render::blend::over_at,
    render::label::{LabelStyle, render_label},
};

/// Extra upward shift of the logo above the bottom padding.
pub const LOGO_LIFT_Y: i64 = 15;

/// A finished canvas as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` in the frame's own alpha convention.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Straight-alpha copy suitable for encoding.
    pub fn to_rgba_image(&self) -> StackResult<image::RgbaImage> {
        if !self.premultiplied {
            return image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .ok_or_else(|| StackError::Other(anyhow::anyhow!("frame buffer size mismatch")));
        }
        PreparedImage {
            width: self.width,
            height: self.height,
            rgba8_premul: std::sync::Arc::new(self.data.clone()),
        }
        .to_rgba_image()
    }
}

/// Stacks a [`LayerPlan`], the item label and the logo into one canvas.
#[derive(Clone, Debug)]
pub struct Compositor<'a> {
    fixed: &'a FixedAssets,
    style: LabelStyle,
    position: PositionPolicy,
}

impl<'a> Compositor<'a> {
    /// Build a compositor over shared fixed assets.
    pub fn new(fixed: &'a FixedAssets, style: LabelStyle, position: PositionPolicy) -> Self {
        Self {
            fixed,
            style,
            position,
        }
    }

    /// Active positioning policy.
    pub fn position(&self) -> PositionPolicy {
        self.position
    }

    /// Composite `plan` for the item labelled `label`.
    ///
    /// The canvas is as large as the largest plan layer in each dimension. Layers are pasted
    /// bottom first, then the label layer, then the logo at a fixed bottom-left position.
    pub fn composite(&self, plan: &LayerPlan, label: &str) -> StackResult<FrameRGBA> {
        if plan.is_empty() {
            return Err(StackError::empty_composition("layer plan has no layers"));
        }
        if let Some(bad) = plan.layers.iter().find(|l| l.image.is_degenerate()) {
            return Err(StackError::empty_composition(format!(
                "layer {:?} is {}x{}",
                bad.slot, bad.image.width, bad.image.height
            )));
        }

        let width = plan.layers.iter().map(|l| l.image.width).max().unwrap_or(0);
        let height = plan.layers.iter().map(|l| l.image.height).max().unwrap_or(0);

        let logo = &self.fixed.logo;
        let label_layer = render_label(
            label,
            width,
            height,
            &self.fixed.font,
            (logo.width, logo.height),
            &self.style,
        )?;

        let mut data = vec![0u8; width as usize * height as usize * 4];
        let layers = plan
            .layers
            .iter()
            .map(|l| &l.image)
            .chain(std::iter::once(&label_layer));
        for image in layers {
            let (x, y) = self.position.offset(width, height, image.width, image.height);
            over_at(&mut data, width, height, image, x, y);
        }

        let padding = i64::from(self.style.padding);
        let logo_y = i64::from(height) - padding - i64::from(logo.height) - LOGO_LIFT_Y;
        over_at(&mut data, width, height, logo, padding, logo_y);

        Ok(FrameRGBA {
            width,
            height,
            data,
            premultiplied: true,
        })
    }
}

/// Encode `frame` as PNG at `path`.
///
/// The image is written to a sibling temporary file first and renamed into place, so `path`
/// only ever holds a complete image.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> StackResult<()> {
    let straight = frame.to_rgba_image()?;
    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = std::path::PathBuf::from(partial);

    image::save_buffer_with_format(
        &partial,
        straight.as_raw(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", partial.display()))?;
    std::fs::rename(&partial, path)
        .with_context(|| format!("move '{}' into place", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
