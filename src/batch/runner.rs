use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::store::GeneratorContext,
    batch::prompt::{Decision, Prompter},
    batch::table::TableRow,
    compile::plan::select_layers,
    foundation::core::ItemDescriptor,
    foundation::error::StackResult,
    render::compositor::{Compositor, save_png},
};

/// File extension of generated images.
pub const OUTPUT_EXTENSION: &str = "png";

/// Outcome counts of one batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Items written during this run.
    pub generated: usize,
    /// Items whose output already existed.
    pub already_present: usize,
    /// Items skipped at the prompt.
    pub skipped: usize,
    /// Items that failed, with label and error message.
    pub failed: Vec<(String, String)>,
    /// The run was stopped at the prompt.
    pub quit: bool,
}

impl BatchReport {
    /// Whether every attempted item succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Processes table rows one at a time against a prepared context.
#[derive(Clone, Debug)]
pub struct BatchRunner<'a> {
    ctx: &'a GeneratorContext,
    compositor: Compositor<'a>,
}

impl<'a> BatchRunner<'a> {
    /// Runner over a fully prepared context.
    pub fn new(ctx: &'a GeneratorContext) -> Self {
        let compositor = Compositor::new(
            &ctx.fixed,
            ctx.config.label_style(),
            ctx.config.position,
        );
        Self { ctx, compositor }
    }

    /// Destination path for `item`.
    pub fn output_path(&self, item: &ItemDescriptor) -> PathBuf {
        self.ctx
            .config
            .output_dir
            .join(format!("{}.{OUTPUT_EXTENSION}", item.file_stem()))
    }

    /// Generate every row in order.
    ///
    /// Existing outputs are left untouched. A failing item is logged and recorded in the
    /// report; the remaining rows are still processed. Only run-level failures (output
    /// directory, prompt IO, missing assets) are returned as errors.
    pub fn run(&self, rows: &[TableRow], prompter: &mut dyn Prompter) -> StackResult<BatchReport> {
        let out_dir = &self.ctx.config.output_dir;
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

        let mut report = BatchReport::default();
        for row in rows {
            let item = match row.descriptor() {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!(label = %row.label, error = %e, "invalid row");
                    report.failed.push((row.label.clone(), e.to_string()));
                    continue;
                }
            };

            let path = self.output_path(&item);
            if path.exists() {
                tracing::debug!(path = %path.display(), "already exists, skipping");
                report.already_present += 1;
                continue;
            }

            match prompter.decide(&item, &path)? {
                Decision::Accept => {}
                Decision::Skip => {
                    report.skipped += 1;
                    continue;
                }
                Decision::Quit => {
                    tracing::info!(label = %item.label, "stopped at prompt");
                    report.quit = true;
                    break;
                }
            }

            match self.generate_item(&item, &path) {
                Ok(()) => {
                    tracing::info!(label = %item.label, path = %path.display(), "generated");
                    report.generated += 1;
                }
                Err(e) if e.is_fatal_for_run() => return Err(e),
                Err(e) => {
                    tracing::warn!(label = %item.label, error = %e, "item failed");
                    report.failed.push((item.label.clone(), e.to_string()));
                }
            }
        }
        Ok(report)
    }

    /// Select, composite and write one item. Nothing is written if any step fails.
    #[tracing::instrument(skip(self, item), fields(label = %item.label, selectors = %item.selectors))]
    pub fn generate_item(&self, item: &ItemDescriptor, path: &Path) -> StackResult<()> {
        let plan = select_layers(
            item.selectors,
            item.include_signature,
            &self.ctx.catalog,
            &self.ctx.fixed.signature,
        )?;
        let frame = self.compositor.composite(&plan, &item.label)?;
        save_png(&frame, path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/runner.rs"]
mod tests;
