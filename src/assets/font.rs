use std::path::Path;

use rusttype::{Font, Scale, point};

use crate::foundation::error::{StackError, StackResult};

/// TrueType font used for item labels, parsed once at startup.
#[derive(Clone)]
pub struct LabelFont {
    font: Font<'static>,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

/// A single glyph coverage sample in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coverage {
    /// Canvas x.
    pub x: i64,
    /// Canvas y.
    pub y: i64,
    /// Coverage in `0.0..=1.0`.
    pub value: f32,
}

impl LabelFont {
    /// Parse raw TrueType/OpenType bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> StackResult<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| StackError::asset_missing("font data could not be parsed"))?;
        Ok(Self { font })
    }

    /// Load a font file; any failure is reported as a missing asset.
    pub fn load(path: &Path) -> StackResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            StackError::asset_missing(format!("font '{}' not readable: {e}", path.display()))
        })?;
        Self::from_bytes(bytes).map_err(|_| {
            StackError::asset_missing(format!("font '{}' is not a usable font", path.display()))
        })
    }

    /// Scale at which one em spans `size_px` pixels.
    ///
    /// `rusttype` scales by line height (ascent minus descent), not by em size.
    pub fn scale_for_em(&self, size_px: f32) -> Scale {
        let upem = f32::from(self.font.units_per_em());
        let unscaled = self.font.v_metrics_unscaled();
        let line = unscaled.ascent - unscaled.descent;
        if upem <= 0.0 || line <= 0.0 {
            return Scale::uniform(size_px);
        }
        Scale::uniform(size_px * line / upem)
    }

    /// Rasterize `text` with an em size of `size_px`, the ascender line at `(x, y)`.
    ///
    /// Calls `sink` once per covered pixel.
    pub fn rasterize(&self, text: &str, size_px: f32, x: f32, y: f32, mut sink: impl FnMut(Coverage)) {
        let scale = self.scale_for_em(size_px);
        let v_metrics = self.font.v_metrics(scale);
        for glyph in self.font.layout(text, scale, point(x, y + v_metrics.ascent)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                sink(Coverage {
                    x: i64::from(bb.min.x) + i64::from(gx),
                    y: i64::from(bb.min.y) + i64::from(gy),
                    value: v,
                });
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
