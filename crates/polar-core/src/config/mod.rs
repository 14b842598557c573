//! Configuration file helpers shared by the editor binary
//!
//! - YAML loading that falls back to defaults instead of failing startup
//! - Standard locations for the config file and preset dialogs
//!
//! ```ignore
//! use polar_core::config::{default_config_path, load_config, save_config};
//!
//! let path = default_config_path("config.yaml");
//! let config: DesignerConfig = load_config(&path);
//! save_config(&config, &path)?;
//! ```

mod io;
mod paths;

pub use io::{load_config, read_config, save_config};
pub use paths::{default_config_dir, default_config_path, default_preset_dir, APP_DIR_NAME};
