use std::fmt;

use crate::foundation::error::{StackError, StackResult};

/// One of the seven fixed trait groups.
///
/// On disk each category is labelled by its lowercase letter (`a`..`g`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Category {
    /// Category `a`.
    A,
    /// Category `b`.
    B,
    /// Category `c`.
    C,
    /// Category `d`.
    D,
    /// Category `e`.
    E,
    /// Category `f`.
    F,
    /// Category `g`.
    G,
}

impl Category {
    /// All categories in selector order.
    pub const ALL: [Category; 7] = [
        Category::A,
        Category::B,
        Category::C,
        Category::D,
        Category::E,
        Category::F,
        Category::G,
    ];

    /// Position of this category inside a [`Selectors`] tuple.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase file-name label.
    pub fn label(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Parse a lowercase file-name label.
    pub fn from_label(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|cat| cat.label() == c)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One 1-based variant number per category, in `A..G` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Selectors(pub [u32; 7]);

impl Selectors {
    /// Build from raw values, rejecting zero.
    pub fn new(values: [u32; 7]) -> StackResult<Self> {
        if let Some(pos) = values.iter().position(|&v| v == 0) {
            return Err(StackError::config(format!(
                "selector for category {} must be >= 1",
                Category::ALL[pos]
            )));
        }
        Ok(Self(values))
    }

    /// Parse a comma separated design string such as `"1,2,3,4,5,6,7"`.
    pub fn parse(design: &str) -> StackResult<Self> {
        let parts: Vec<&str> = design.split(',').map(str::trim).collect();
        if parts.len() != Category::ALL.len() {
            return Err(StackError::config(format!(
                "design '{design}' must list exactly {} selectors, got {}",
                Category::ALL.len(),
                parts.len()
            )));
        }

        let mut values = [0u32; 7];
        for (slot, part) in values.iter_mut().zip(parts) {
            *slot = part.parse::<u32>().map_err(|_| {
                StackError::config(format!("design '{design}' has non-numeric selector '{part}'"))
            })?;
        }
        Self::new(values)
    }

    /// Selector value for `category`.
    pub fn get(self, category: Category) -> u32 {
        self.0[category.index()]
    }
}

impl fmt::Display for Selectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// One row of the input table: which variants to stack, and how to label the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Variant per category.
    pub selectors: Selectors,
    /// Identifying label, used for the visible text and the output file name.
    pub label: String,
    /// Append the signature overlay on top of the trait layers.
    pub include_signature: bool,
}

impl ItemDescriptor {
    /// Output file stem: the label left-padded with zeros to four characters.
    pub fn file_stem(&self) -> String {
        format!("{:0>4}", self.label)
    }
}

/// How layers smaller than the canvas are positioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionPolicy {
    /// Center each layer on the canvas.
    #[default]
    Centered,
    /// Anchor every layer at the top-left corner.
    Origin,
}

impl PositionPolicy {
    /// Top-left paste offset for a `w x h` layer on a `canvas_w x canvas_h` canvas.
    pub fn offset(self, canvas_w: u32, canvas_h: u32, w: u32, h: u32) -> (i64, i64) {
        match self {
            Self::Centered => (
                (i64::from(canvas_w) - i64::from(w)).div_euclid(2),
                (i64::from(canvas_h) - i64::from(h)).div_euclid(2),
            ),
            Self::Origin => (0, 0),
        }
    }
}

/// Premultiplied RGBA8 pixel.
pub type Rgba8Premul = [u8; 4];

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
