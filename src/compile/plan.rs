//! Layer selection: turns an item's selectors into an ordered list of layers.
//!
//! The order is a fixed z-order over trait categories. Categories `D`, `F` and `G` move to
//! different depths depending on which variant is selected, so they appear several times in
//! [`INSERTION_RULES`] with mutually exclusive conditions. Exactly one rule fires per category.

use crate::{
    assets::catalog::AssetCatalog,
    assets::decode::PreparedImage,
    foundation::core::{Category, Selectors},
    foundation::error::StackResult,
};

/// A category insertion point in the z-order.
#[derive(Clone, Copy, Debug)]
pub struct InsertionRule {
    /// Category drawn when the rule fires.
    pub category: Category,
    /// Predicate over that category's own selector.
    pub when: fn(u32) -> bool,
}

const fn rule(category: Category, when: fn(u32) -> bool) -> InsertionRule {
    InsertionRule { category, when }
}

/// Ordered insertion points, bottom layer first.
///
/// The `D` partition (`{1, 10}` mid, `{3}` top, everything else low) matches the source
/// artwork and must not be merged.
pub const INSERTION_RULES: [InsertionRule; 13] = [
    rule(Category::A, |_| true),
    rule(Category::B, |_| true),
    rule(Category::C, |_| true),
    rule(Category::G, |g| g == 6),
    rule(Category::E, |_| true),
    rule(Category::D, |d| !matches!(d, 1 | 3 | 10)),
    rule(Category::G, |g| !matches!(g, 6..=9)),
    rule(Category::F, |f| f != 8),
    rule(Category::G, |g| g == 8),
    rule(Category::D, |d| matches!(d, 1 | 10)),
    rule(Category::G, |g| matches!(g, 7 | 9)),
    rule(Category::F, |f| f == 8),
    rule(Category::D, |d| d == 3),
];

/// One entry of a layer plan before images are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A trait layer: variant `selector` of `category`.
    Trait {
        /// Trait category.
        category: Category,
        /// 1-based variant.
        selector: u32,
    },
    /// The fixed signature overlay.
    Signature,
}

/// Evaluate [`INSERTION_RULES`] for `selectors`, appending the signature last when requested.
pub fn plan_slots(selectors: Selectors, include_signature: bool) -> Vec<Slot> {
    let mut slots: Vec<Slot> = INSERTION_RULES
        .iter()
        .filter_map(|rule| {
            let selector = selectors.get(rule.category);
            (rule.when)(selector).then_some(Slot::Trait {
                category: rule.category,
                selector,
            })
        })
        .collect();
    if include_signature {
        slots.push(Slot::Signature);
    }
    slots
}

/// A resolved plan entry.
#[derive(Clone, Debug)]
pub struct PlannedLayer {
    /// Where the image came from.
    pub slot: Slot,
    /// The image to draw.
    pub image: PreparedImage,
}

/// Ordered images to stack for one item, bottom first.
#[derive(Clone, Debug, Default)]
pub struct LayerPlan {
    /// Layers in draw order.
    pub layers: Vec<PlannedLayer>,
}

impl LayerPlan {
    /// Slots in draw order.
    pub fn slots(&self) -> Vec<Slot> {
        self.layers.iter().map(|l| l.slot).collect()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the plan has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Resolve the layer plan for one item against `catalog`.
///
/// Fails with an index error when a selector is out of range, or a configuration error when
/// a category has no layers. Never falls back to another variant.
pub fn select_layers(
    selectors: Selectors,
    include_signature: bool,
    catalog: &AssetCatalog,
    signature: &PreparedImage,
) -> StackResult<LayerPlan> {
    let layers = plan_slots(selectors, include_signature)
        .into_iter()
        .map(|slot| {
            let image = match slot {
                Slot::Trait { category, selector } => catalog.layer(category, selector)?.clone(),
                Slot::Signature => signature.clone(),
            };
            Ok(PlannedLayer { slot, image })
        })
        .collect::<StackResult<Vec<_>>>()?;
    Ok(LayerPlan { layers })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
