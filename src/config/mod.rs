//! Configuration module for spendscope
//!
//! - Path resolution (env override, then platform config directory)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SpendscopePaths;
pub use settings::Settings;
