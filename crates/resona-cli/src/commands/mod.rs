//! CLI command implementations.

pub mod common;
pub mod export;
pub mod import;
pub mod inspect;
pub mod params;
pub mod presets;
