/// Shared value types: categories, selectors, item descriptors, positioning.
pub mod core;
/// Error taxonomy.
pub mod error;
