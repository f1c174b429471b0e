//! CLI library components for the escape data merger.

pub mod commands;
pub mod logging;
pub mod types;
