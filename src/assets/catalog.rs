use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, load_image_file},
    foundation::core::Category,
    foundation::error::{StackError, StackResult},
};

/// Layer images per category, addressed by 1-based selector.
///
/// Built once before a run and only read afterwards.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    layers: BTreeMap<Category, Vec<PreparedImage>>,
}

impl AssetCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layer list of `category`.
    pub fn insert(&mut self, category: Category, layers: Vec<PreparedImage>) {
        self.layers.insert(category, layers);
    }

    /// Number of layers loaded for `category` (zero if absent).
    pub fn len(&self, category: Category) -> usize {
        self.layers.get(&category).map_or(0, Vec::len)
    }

    /// Whether no category has any layer.
    pub fn is_empty(&self) -> bool {
        self.layers.values().all(Vec::is_empty)
    }

    /// Resolve `selector` (1-based) inside `category`.
    pub fn layer(&self, category: Category, selector: u32) -> StackResult<&PreparedImage> {
        let list = self
            .layers
            .get(&category)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| {
                StackError::config(format!("no layers loaded for category {category}"))
            })?;
        selector
            .checked_sub(1)
            .and_then(|i| list.get(i as usize))
            .ok_or(StackError::Index {
                category,
                selector,
                len: list.len(),
            })
    }

    /// Load every `{prefix}{category}{index}.{ext}` file under `dir`.
    ///
    /// Within a category files are ordered by their numeric index; selector `n` addresses the
    /// `n`-th file of that order. Names outside the scheme are ignored. A directory without a
    /// single matching file is a missing asset.
    #[tracing::instrument(skip(dir), fields(dir = %dir.display()))]
    pub fn load_dir(dir: &Path, prefix: &str) -> StackResult<Self> {
        if !dir.is_dir() {
            return Err(StackError::asset_missing(format!(
                "layer directory '{}' does not exist",
                dir.display()
            )));
        }

        let mut found: BTreeMap<Category, Vec<(u32, std::path::PathBuf)>> = BTreeMap::new();
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("list '{}'", dir.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            match parse_layer_file_name(&name, prefix) {
                Some((category, index)) => {
                    found.entry(category).or_default().push((index, path));
                }
                None => tracing::debug!(file = %name, "ignoring file outside layer naming scheme"),
            }
        }

        let mut catalog = Self::new();
        for (category, mut files) in found {
            files.sort_by_key(|(index, _)| *index);
            let mut layers = Vec::with_capacity(files.len());
            for (_, path) in files {
                let image = load_image_file(&path).map_err(|e| {
                    StackError::asset_missing(format!("layer '{}': {e:#}", path.display()))
                })?;
                layers.push(image);
            }
            tracing::info!(%category, count = layers.len(), "loaded layers");
            catalog.insert(category, layers);
        }

        if catalog.is_empty() {
            return Err(StackError::asset_missing(format!(
                "no '{prefix}{{category}}{{index}}.{{ext}}' layer files in '{}'",
                dir.display()
            )));
        }
        for category in Category::ALL {
            if catalog.len(category) == 0 {
                tracing::warn!(%category, prefix, "no layers for category");
            }
        }
        Ok(catalog)
    }
}

/// Split `{prefix}{category}{index}.{ext}` into category and numeric index.
pub fn parse_layer_file_name(name: &str, prefix: &str) -> Option<(Category, u32)> {
    let rest = name.strip_prefix(prefix)?;
    let (stem, ext) = rest.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    let mut chars = stem.chars();
    let category = Category::from_label(chars.next()?)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse().ok()?;
    Some((category, index))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
