use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    assets::font::LabelFont,
    foundation::error::{StackError, StackResult},
    render::blend::over,
};

/// Horizontal gap between the logo's right edge and the text.
pub const TEXT_GAP_X: i64 = 35;
/// Downward shift of the text relative to the logo's top edge.
pub const TEXT_DROP_Y: i64 = 95;

/// Text and placement of the item label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    /// Text placed before the item label.
    pub prefix: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Canvas padding shared with the logo placement.
    pub padding: u32,
}

impl LabelStyle {
    /// Visible text for `label`.
    pub fn text_for(&self, label: &str) -> String {
        format!("{}{label}", self.prefix)
    }

    /// Top-left of the text box on a canvas of height `height`, next to a `logo_w x logo_h` logo.
    pub fn origin(&self, height: u32, logo_w: u32, logo_h: u32) -> (i64, i64) {
        let padding = i64::from(self.padding);
        (
            padding + i64::from(logo_w) + TEXT_GAP_X,
            i64::from(height) - padding - i64::from(logo_h) + TEXT_DROP_Y,
        )
    }
}

/// Draw the item label in solid black on a transparent `width x height` canvas.
pub fn render_label(
    label: &str,
    width: u32,
    height: u32,
    font: &LabelFont,
    logo_size: (u32, u32),
    style: &LabelStyle,
) -> StackResult<PreparedImage> {
    if width == 0 || height == 0 {
        return Err(StackError::empty_composition(format!(
            "label canvas must be non-empty, got {width}x{height}"
        )));
    }

    let text = style.text_for(label);
    let (x, y) = style.origin(height, logo_size.0, logo_size.1);
    let mut buf = vec![0u8; width as usize * height as usize * 4];

    font.rasterize(&text, style.font_size, x as f32, y as f32, |c| {
        if c.x < 0 || c.y < 0 || c.x >= i64::from(width) || c.y >= i64::from(height) {
            return;
        }
        let a = (c.value.clamp(0.0, 1.0) * 255.0).round() as u8;
        if a == 0 {
            return;
        }
        let i = (c.y as usize * width as usize + c.x as usize) * 4;
        let dst = [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]];
        buf[i..i + 4].copy_from_slice(&over(dst, [0, 0, 0, a]));
    });

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(buf),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
