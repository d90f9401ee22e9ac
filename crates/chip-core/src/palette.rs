//! Palette tables for both themes.
//!
//! Colours are keyed by theme and visual state; renderers resolve one
//! `StateColors` per paint instead of swapping stylesheets.

use chip_types::{DeleteColors, Palette, Rgb, StateColors, Theme, VisualState};

const fn colors(fill: u32, border: u32, text: u32) -> StateColors {
    StateColors {
        fill: Rgb::from_hex(fill),
        border: Rgb::from_hex(border),
        text: Rgb::from_hex(text),
    }
}

pub const LIGHT: Palette = Palette {
    normal: colors(0xf5f5f5, 0xd1d1d1, 0x333333),
    hovered: colors(0xe5e5e5, 0xd1d1d1, 0x333333),
    checked: colors(0xe0f2fe, 0x0078d4, 0x0078d4),
    disabled: colors(0xf0f0f0, 0xe0e0e0, 0xa0a0a0),
    delete: DeleteColors {
        normal: Rgb::from_hex(0x888888),
        hover: Rgb::from_hex(0x444444),
    },
};

pub const DARK: Palette = Palette {
    normal: colors(0x333333, 0x555555, 0xffffff),
    hovered: colors(0x444444, 0x666666, 0xffffff),
    checked: colors(0x0078d4, 0x2b9fff, 0xffffff),
    disabled: colors(0x2a2a2a, 0x404040, 0x808080),
    delete: DeleteColors {
        normal: Rgb::from_hex(0xaaaaaa),
        hover: Rgb::from_hex(0xffffff),
    },
};

#[must_use]
pub fn palette_for(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

/// Colours for a theme and state in one lookup
#[must_use]
pub fn resolve(theme: Theme, state: VisualState) -> &'static StateColors {
    palette_for(theme).colors(state)
}
