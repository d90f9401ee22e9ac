mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{AppearanceConfig, BehaviorConfig, Config};
pub use validation::{unknown_fields, warn_unknown_fields};
