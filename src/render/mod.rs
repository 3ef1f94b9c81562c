//! Pixel work: blending, label rasterization and final compositing.

/// Premultiplied source-over blending.
pub mod blend;
/// Canvas assembly and PNG output.
pub mod compositor;
/// Item label layer.
pub mod label;
