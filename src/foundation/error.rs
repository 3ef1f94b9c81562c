use crate::foundation::core::Category;

/// Convenience result type used across traitstack.
pub type StackResult<T> = Result<T, StackError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StackError {
    /// A required fixed asset (font, logo, signature, layer directory) could not be loaded.
    #[error("missing asset: {0}")]
    AssetMissing(String),

    /// Malformed input table, malformed row, or a category with no loaded layers.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A selector addressed a variant that does not exist in its category.
    #[error(
        "index error: selector {selector} is out of range for category {category} ({len} layers)"
    )]
    Index {
        /// Category the selector belongs to.
        category: Category,
        /// Offending 1-based selector value.
        selector: u32,
        /// Number of layers loaded for the category.
        len: usize,
    },

    /// The layer plan was empty or contained a degenerate layer.
    #[error("empty composition: {0}")]
    EmptyComposition(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StackError {
    /// Build a [`StackError::AssetMissing`] value.
    pub fn asset_missing(msg: impl Into<String>) -> Self {
        Self::AssetMissing(msg.into())
    }

    /// Build a [`StackError::Configuration`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`StackError::EmptyComposition`] value.
    pub fn empty_composition(msg: impl Into<String>) -> Self {
        Self::EmptyComposition(msg.into())
    }

    /// Whether this error must abort the whole run rather than a single item.
    pub fn is_fatal_for_run(&self) -> bool {
        matches!(self, Self::AssetMissing(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
