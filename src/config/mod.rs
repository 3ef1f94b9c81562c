/// Run configuration.
pub mod settings;
