//! Console configuration (the console's own settings, not the backend's)
//!
//! - `types`: `Settings` and its sections
//! - `settings`: TOML load/save under the user config dir

mod settings;
mod types;

pub use settings::{default_settings_path, load_settings, save_settings};
pub use types::{ServerSettings, Settings, UiSettings};
