use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::core::PositionPolicy,
    foundation::error::{StackError, StackResult},
};

/// Every knob of a generation run.
///
/// Defaults reproduce the "My Way" artwork layout. Missing fields in a JSON
/// config file fall back to these defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// CSV table of item descriptors.
    pub table_path: PathBuf,
    /// Directory holding `{prefix}{category}{index}.{ext}` layer files.
    pub layers_dir: PathBuf,
    /// File-name prefix shared by every layer file.
    pub layer_prefix: String,
    /// Directory receiving one PNG per item.
    pub output_dir: PathBuf,
    /// Signature overlay image.
    pub signature_path: PathBuf,
    /// Logo image, resized to `logo_size` on load.
    pub logo_path: PathBuf,
    /// Label font file.
    pub font_path: PathBuf,
    /// Label font size in pixels.
    pub font_size: f32,
    /// Distance between the logo and the canvas edges.
    pub padding: u32,
    /// Logo edge length after resizing.
    pub logo_size: u32,
    /// Text placed before the item label.
    pub label_prefix: String,
    /// Layer positioning on the canvas.
    pub position: PositionPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("./Redeptions_Generate.csv"),
            layers_dir: PathBuf::from("./WuKongLayer"),
            layer_prefix: "wk".to_string(),
            output_dir: PathBuf::from("./NFTImages"),
            signature_path: PathBuf::from("./Signature_HQ.PNG"),
            logo_path: PathBuf::from("./Logo_HQ.PNG"),
            font_path: PathBuf::from("./arlrdbd.ttf"),
            font_size: 140.0,
            padding: 40,
            logo_size: 360,
            label_prefix: "My Way ".to_string(),
            position: PositionPolicy::Centered,
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> StackResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| StackError::config(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the renderer cannot honor.
    pub fn validate(&self) -> StackResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(StackError::config("font_size must be finite and > 0"));
        }
        if self.logo_size == 0 {
            return Err(StackError::config("logo_size must be > 0"));
        }
        Ok(())
    }

    /// Label layout derived from this config.
    pub fn label_style(&self) -> crate::render::label::LabelStyle {
        crate::render::label::LabelStyle {
            prefix: self.label_prefix.clone(),
            font_size: self.font_size,
            padding: self.padding,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
