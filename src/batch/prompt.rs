use std::{
    io::{BufRead, Write},
    path::Path,
};

use anyhow::Context;

use crate::{foundation::core::ItemDescriptor, foundation::error::StackResult};

/// How the batch decides whether to generate each pending item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Generate every pending item.
    #[default]
    All,
    /// Ask before each pending item.
    Interactive,
}

/// Answer to a per-item prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Generate the item.
    Accept,
    /// Leave the item for a later run.
    Skip,
    /// Stop the batch; already written files stay.
    Quit,
}

/// Source of per-item decisions.
pub trait Prompter {
    /// Decide what to do with `item`, which would be written to `out_path`.
    fn decide(&mut self, item: &ItemDescriptor, out_path: &Path) -> StackResult<Decision>;
}

/// Accepts everything; used for [`RunMode::All`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl Prompter for AcceptAll {
    fn decide(&mut self, _item: &ItemDescriptor, _out_path: &Path) -> StackResult<Decision> {
        Ok(Decision::Accept)
    }
}

/// Line-based prompt over any reader/writer pair.
///
/// End of input is treated as quit.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Prompt on `output`, read answers from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn decide(&mut self, item: &ItemDescriptor, out_path: &Path) -> StackResult<Decision> {
        loop {
            write!(
                self.output,
                "generate {} [{}] -> {}? [y]es/[s]kip/[q]uit: ",
                item.label,
                item.selectors,
                out_path.display()
            )
            .context("write prompt")?;
            self.output.flush().context("flush prompt")?;

            let mut line = String::new();
            let n = self.input.read_line(&mut line).context("read answer")?;
            if n == 0 {
                return Ok(Decision::Quit);
            }
            if let Some(decision) = parse_answer(&line) {
                return Ok(decision);
            }
            writeln!(self.output, "unrecognized answer '{}'", line.trim())
                .context("write prompt")?;
        }
    }
}

/// Map a typed answer to a decision. Case-insensitive.
pub fn parse_answer(answer: &str) -> Option<Decision> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" | "a" | "accept" => Some(Decision::Accept),
        "s" | "skip" | "n" | "no" => Some(Decision::Skip),
        "q" | "quit" | "exit" => Some(Decision::Quit),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/prompt.rs"]
mod tests;
