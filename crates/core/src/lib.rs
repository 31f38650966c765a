//! Weather Journal Core Library
//!
//! Shared utilities for the journal server:
//! - Configuration loading (XDG-compliant)
//! - File system utilities

mod config;
pub mod fs;

pub use config::{find_config_file, get_xdg_data_dir, load_config, ConfigSource};
pub use fs::{create_dir_all, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "weather-journal";

/// Default journal server port
pub const DEFAULT_JOURNAL_PORT: u16 = 9810;

/// Default config filename searched for by the journal server
pub const DEFAULT_CONFIG_FILE: &str = "journal.toml";
