pub mod cargo_toml;
pub mod changelog;
pub mod checksum;
pub mod config;
pub mod error;
pub mod plugin;
pub mod process;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
