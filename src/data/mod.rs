mod grid_config;
mod loader;

pub use grid_config::{GridPlaneConfig, UsageOverride};
pub use loader::{load_grid_config_from_path, load_grid_config_from_str};
