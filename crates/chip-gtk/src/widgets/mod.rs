//! Reusable GTK4 widgets.

pub mod chip;

pub use chip::ChipWidget;
