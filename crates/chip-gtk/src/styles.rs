//! CSS for chip children.
//!
//! The pill background is painted with cairo; CSS only colours the label and
//! the delete glyph. Rules are generated from the palette tables so the two
//! never drift apart.

use chip_core::metrics;
use chip_core::palette;
use chip_types::{Palette, Theme, VisualState};
use gtk4::gdk;
use std::cell::Cell;
use std::fmt::Write as _;
use tracing::{debug, warn};

thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Full stylesheet for both themes
pub fn chip_css() -> String {
    let mut css = format!(
        r"
chip {{
    min-height: {height}px;
}}

chip label.chip-label {{
    padding: 0;
}}

chip button.chip-delete {{
    background: none;
    border: none;
    box-shadow: none;
    outline: none;
    padding: 0;
    margin: 0;
    min-width: {delete}px;
    min-height: {delete}px;
    font-size: {font}px;
}}

chip button.chip-delete:disabled {{
    opacity: 1;
}}
",
        height = metrics::HEIGHT,
        delete = metrics::DELETE_SIZE,
        font = metrics::DELETE_FONT_SIZE,
    );

    for theme in Theme::ALL {
        css.push_str(&theme_css(theme, palette::palette_for(theme)));
    }

    css
}

fn theme_css(theme: Theme, palette: &Palette) -> String {
    let scope = format!("chip.{}", theme.css_class());
    let mut css = String::new();

    for state in VisualState::ALL {
        let selector = match state.css_class() {
            Some(class) => format!("{scope}.{class}"),
            None => scope.clone(),
        };
        let _ = writeln!(
            css,
            "{selector} label.chip-label {{ color: {}; }}",
            palette.colors(state).text
        );
    }

    let _ = writeln!(
        css,
        "{scope} button.chip-delete {{ color: {}; }}",
        palette.delete.normal
    );
    let _ = writeln!(
        css,
        "{scope} button.chip-delete:hover {{ color: {}; }}",
        palette.delete.hover
    );

    css
}

/// Register the chip stylesheet with the default display, once per thread
pub fn ensure_installed() {
    if INSTALLED.with(Cell::get) {
        return;
    }

    let Some(display) = gdk::Display::default() else {
        warn!("No default display, chip styles not installed");
        return;
    };

    let provider = gtk4::CssProvider::new();
    provider.load_from_string(&chip_css());
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );

    INSTALLED.with(|installed| installed.set(true));
    debug!("Chip stylesheet installed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_scopes_both_themes() {
        let css = chip_css();
        assert!(css.contains("chip.theme-light label.chip-label { color: #333333; }"));
        assert!(css.contains("chip.theme-dark label.chip-label { color: #ffffff; }"));
    }

    #[test]
    fn test_css_state_rules_use_palette_text() {
        let css = chip_css();
        assert!(css.contains("chip.theme-light.checked label.chip-label { color: #0078d4; }"));
        assert!(css.contains("chip.theme-light.disabled label.chip-label { color: #a0a0a0; }"));
        assert!(css.contains("chip.theme-dark.disabled label.chip-label { color: #808080; }"));
    }

    #[test]
    fn test_css_delete_tint() {
        let css = chip_css();
        assert!(css.contains("chip.theme-light button.chip-delete { color: #888888; }"));
        assert!(css.contains("chip.theme-light button.chip-delete:hover { color: #444444; }"));
        assert!(css.contains("chip.theme-dark button.chip-delete { color: #aaaaaa; }"));
        assert!(css.contains("chip.theme-dark button.chip-delete:hover { color: #ffffff; }"));
    }

    #[test]
    fn test_css_delete_metrics() {
        let css = chip_css();
        assert!(css.contains("min-width: 16px;"));
        assert!(css.contains("font-size: 12px;"));
    }

    #[test]
    fn test_css_braces_balanced() {
        let css = chip_css();
        assert_eq!(css.matches('{').count(), css.matches('}').count());
    }
}
