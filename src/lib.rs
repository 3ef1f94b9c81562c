//! traitstack stacks categorized artwork layers into finished, numbered images.
//!
//! Each item of a batch names one variant per trait category (`A`..`G`). The crate turns that
//! into pixels in three steps:
//!
//! 1. **Select**: `Selectors -> LayerPlan` via a fixed z-order rule table ([`plan_slots`],
//!    [`select_layers`]). Some categories render at different depths depending on the chosen
//!    variant.
//! 2. **Composite**: stack the plan, a text label and the logo onto one canvas ([`Compositor`]).
//! 3. **Write**: one PNG per item, skipping items whose output already exists ([`BatchRunner`]).
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same selectors always produce the same plan.
//! - **IO up front**: every image and the font are loaded into a [`GeneratorContext`] before the
//!   first item; selection and compositing never touch the filesystem.
//! - **Premultiplied RGBA8** internally; PNGs are written with straight alpha.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod batch;
mod compile;
mod config;
mod foundation;
mod render;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use assets::catalog::{AssetCatalog, parse_layer_file_name};
pub use assets::decode::{PreparedImage, decode_image, load_image_file};
pub use assets::font::{Coverage, LabelFont};
pub use assets::store::{FixedAssets, GeneratorContext};
pub use batch::prompt::{AcceptAll, Decision, LinePrompter, Prompter, RunMode, parse_answer};
pub use batch::runner::{BatchReport, BatchRunner, OUTPUT_EXTENSION};
pub use batch::table::{TableRow, parse_table, read_table};
pub use compile::plan::{
    INSERTION_RULES, InsertionRule, LayerPlan, PlannedLayer, Slot, plan_slots, select_layers,
};
pub use config::settings::GeneratorConfig;
pub use foundation::core::{Category, ItemDescriptor, PositionPolicy, Rgba8Premul, Selectors};
pub use foundation::error::{StackError, StackResult};
pub use render::blend::{over, over_at};
pub use render::compositor::{Compositor, FrameRGBA, LOGO_LIFT_Y, save_png};
pub use render::label::{LabelStyle, TEXT_DROP_Y, TEXT_GAP_X, render_label};

/// Load everything named by `config`, read its table and generate every pending item.
pub fn run_batch(config: GeneratorConfig, prompter: &mut dyn Prompter) -> StackResult<BatchReport> {
    let ctx = GeneratorContext::prepare(config)?;
    let rows = read_table(&ctx.config.table_path)?;
    tracing::info!(rows = rows.len(), "loaded item table");
    BatchRunner::new(&ctx).run(&rows, prompter)
}
