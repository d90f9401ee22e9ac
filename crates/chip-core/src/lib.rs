//! Headless chip model.
//!
//! Everything a chip widget needs that does not touch a toolkit: state and
//! event decisions (`Chip`), geometry (`ChipLayout`), palette tables, the
//! theme registry and configuration.

pub mod config;
pub mod layout;
pub mod palette;
pub mod theme;

mod chip;
mod error;

#[cfg(test)]
mod tests;

pub use chip::{Chip, DeletePolicy};
pub use error::{Error, Result};
pub use layout::{ChipLayout, metrics};
pub use theme::{ThemeListener, ThemeRegistry};

pub use chip_types::*;
