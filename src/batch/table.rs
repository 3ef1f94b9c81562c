use std::{io::Read, path::Path};

use anyhow::Context;

use crate::{
    foundation::core::{ItemDescriptor, Selectors},
    foundation::error::{StackError, StackResult},
};

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RawRow {
    #[serde(rename = "NFTDesign")]
    design: Option<String>,
    #[serde(rename = "NFTNumber")]
    number: Option<String>,
    #[serde(rename = "Signature")]
    signature: Option<String>,
}

/// A table row with all required fields present. Selectors are not parsed yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based record number, header excluded.
    pub record: usize,
    /// Raw comma separated selector string.
    pub design: String,
    /// Item label.
    pub label: String,
    /// `Signature` column was exactly `True`.
    pub include_signature: bool,
}

impl TableRow {
    /// Parse the design string into an [`ItemDescriptor`].
    pub fn descriptor(&self) -> StackResult<ItemDescriptor> {
        let selectors = Selectors::parse(&self.design).map_err(|e| {
            StackError::config(format!("record {} (label '{}'): {e}", self.record, self.label))
        })?;
        Ok(ItemDescriptor {
            selectors,
            label: self.label.clone(),
            include_signature: self.include_signature,
        })
    }
}

/// Read the item table at `path`. An unreadable table is a configuration error.
pub fn read_table(path: &Path) -> StackResult<Vec<TableRow>> {
    let file = std::fs::File::open(path).map_err(|e| {
        StackError::config(format!("table '{}' is not readable: {e}", path.display()))
    })?;
    parse_table(file).map_err(|e| match e {
        StackError::Other(err) => {
            StackError::config(format!("table '{}': {err:#}", path.display()))
        }
        other => other,
    })
}

/// Parse CSV with `NFTDesign`, `NFTNumber` and `Signature` columns.
///
/// NUL bytes are dropped before parsing. Rows lacking a design or a label are skipped.
pub fn parse_table(mut reader: impl Read) -> StackResult<Vec<TableRow>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).context("read table")?;
    bytes.retain(|&b| b != 0);
    let text = String::from_utf8_lossy(&bytes);

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (i, record) in csv_reader.deserialize::<RawRow>().enumerate() {
        let record_no = i + 1;
        let raw = record.with_context(|| format!("parse table record {record_no}"))?;
        let (Some(design), Some(label)) = (
            raw.design.filter(|s| !s.is_empty()),
            raw.number.filter(|s| !s.is_empty()),
        ) else {
            tracing::warn!(record = record_no, "skipping row without design or number");
            continue;
        };
        rows.push(TableRow {
            record: record_no,
            design,
            label,
            include_signature: raw.signature.as_deref() == Some("True"),
        });
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/table.rs"]
mod tests;
