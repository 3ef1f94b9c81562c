use std::path::Path;

use crate::{
    assets::catalog::AssetCatalog,
    assets::decode::{PreparedImage, load_image_file},
    assets::font::LabelFont,
    config::settings::GeneratorConfig,
    foundation::error::{StackError, StackResult},
};

/// Images and font shared by every item, loaded once at startup.
#[derive(Clone, Debug)]
pub struct FixedAssets {
    /// Optional watermark appended last to a layer plan.
    pub signature: PreparedImage,
    /// Branding image pasted onto every canvas, already resized.
    pub logo: PreparedImage,
    /// Label font.
    pub font: LabelFont,
}

impl FixedAssets {
    /// Load signature, logo and font from the paths in `cfg`.
    ///
    /// The logo is resized to a `logo_size` square.
    pub fn load(cfg: &GeneratorConfig) -> StackResult<Self> {
        let signature = load_required("signature", &cfg.signature_path)?;
        let logo = load_required("logo", &cfg.logo_path)?.resized(cfg.logo_size, cfg.logo_size)?;
        let font = LabelFont::load(&cfg.font_path)?;
        Ok(Self {
            signature,
            logo,
            font,
        })
    }
}

fn load_required(what: &str, path: &Path) -> StackResult<PreparedImage> {
    load_image_file(path).map_err(|e| {
        StackError::asset_missing(format!("{what} image '{}': {e:#}", path.display()))
    })
}

/// Everything a run reads: configuration, fixed assets and the layer catalog.
#[derive(Clone, Debug)]
pub struct GeneratorContext {
    /// Run configuration.
    pub config: GeneratorConfig,
    /// Signature, logo and font.
    pub fixed: FixedAssets,
    /// Layer images per category.
    pub catalog: AssetCatalog,
}

impl GeneratorContext {
    /// Front-load every asset named by `config`. Any failure aborts before items are processed.
    pub fn prepare(config: GeneratorConfig) -> StackResult<Self> {
        config.validate()?;
        let fixed = FixedAssets::load(&config)?;
        let catalog = AssetCatalog::load_dir(&config.layers_dir, &config.layer_prefix)?;
        Ok(Self {
            config,
            fixed,
            catalog,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
