//! Configuration and dependency initialization.

pub mod dependencies;
pub mod settings;

pub use dependencies::Dependencies;
pub use settings::Settings;
