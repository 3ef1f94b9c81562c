//! Asset loading. All file IO for images and fonts happens here, before any item is rendered.

/// Per-category layer catalog.
pub mod catalog;
/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Label font.
pub mod font;
/// Fixed assets and the run context.
pub mod store;
