//! GTK4 chip widget.
//!
//! Renders the headless `chip_core::Chip` model: a pill-shaped toggle with an
//! optional icon, a label and a delete button. Live chips follow the
//! process-wide theme held by `chip_core::theme`.

pub mod logging;
pub mod styles;
pub mod watcher;
pub mod widgets;

pub use chip_core::DeletePolicy;
pub use chip_core::config::Config;
pub use chip_types::{ChipIcon, Theme};
pub use watcher::ConfigWatcher;
pub use widgets::ChipWidget;

/// Theme new chips start with
pub fn current_theme() -> Theme {
    chip_core::theme::current_theme()
}

/// Switch every live chip on this thread to `theme`.
///
/// Returns the number of chips repainted.
pub fn apply_theme(theme: Theme) -> usize {
    chip_core::theme::apply_theme(theme)
}

/// Switch every live chip to the theme and delete policy of `config`, and
/// make them the defaults for chips created afterwards.
pub fn apply_config(config: &Config) -> usize {
    chip_core::theme::apply_config(config)
}
