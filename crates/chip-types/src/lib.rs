//! Shared types for chip components.
//!
//! This crate provides the toolkit-free value types used by chip-core and
//! chip-gtk: themes, colours, palettes, icons, events and the small amount of
//! geometry needed for hit testing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Error returned when a theme name or colour string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: &'static str,
    input: String,
}

impl ParseError {
    fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }

    /// What was being parsed ("theme" or "color")
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.kind, self.input)
    }
}

impl std::error::Error for ParseError {}

// ============================================================================
// Theme
// ============================================================================

/// Colour theme shared by every live chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// The other theme
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// CSS class carried by widgets rendered in this theme
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("light") {
            Ok(Theme::Light)
        } else if trimmed.eq_ignore_ascii_case("dark") {
            Ok(Theme::Dark)
        } else {
            Err(ParseError::new("theme", s))
        }
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Visual state
// ============================================================================

/// The palette tier a chip is rendered with.
///
/// Exactly one tier applies at a time. Priority: disabled, checked, hovered,
/// normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    Normal,
    Hovered,
    Checked,
    Disabled,
}

impl VisualState {
    pub const ALL: [VisualState; 4] = [
        VisualState::Normal,
        VisualState::Hovered,
        VisualState::Checked,
        VisualState::Disabled,
    ];

    /// Resolve the tier for a combination of the three state flags
    #[must_use]
    pub fn resolve(enabled: bool, checked: bool, hovered: bool) -> Self {
        if !enabled {
            VisualState::Disabled
        } else if checked {
            VisualState::Checked
        } else if hovered {
            VisualState::Hovered
        } else {
            VisualState::Normal
        }
    }

    /// CSS class for this tier, `None` for the normal tier
    #[must_use]
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            VisualState::Normal => None,
            VisualState::Hovered => Some("hovered"),
            VisualState::Checked => Some("checked"),
            VisualState::Disabled => Some("disabled"),
        }
    }
}

// ============================================================================
// Colours and palettes
// ============================================================================

/// 8-bit sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    #[must_use]
    // Masked shifts always fit in u8
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Channels scaled to 0.0-1.0, as cairo expects them
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseError;

    /// Parses `#rrggbb` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::new("color", s));
        }
        u32::from_str_radix(hex, 16)
            .map(Self::from_hex)
            .map_err(|_| ParseError::new("color", s))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Colours for one visual state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateColors {
    pub fill: Rgb,
    pub border: Rgb,
    pub text: Rgb,
}

/// Tint of the delete glyph, swapped on hover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteColors {
    pub normal: Rgb,
    pub hover: Rgb,
}

/// Complete set of chip colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub normal: StateColors,
    pub hovered: StateColors,
    pub checked: StateColors,
    pub disabled: StateColors,
    pub delete: DeleteColors,
}

impl Palette {
    #[must_use]
    pub fn colors(&self, state: VisualState) -> &StateColors {
        match state {
            VisualState::Normal => &self.normal,
            VisualState::Hovered => &self.hovered,
            VisualState::Checked => &self.checked,
            VisualState::Disabled => &self.disabled,
        }
    }
}

// ============================================================================
// Icons and events
// ============================================================================

/// Leading icon of a chip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ChipIcon {
    /// Icon looked up by name in the icon theme
    Named(String),
    /// Image loaded from a file
    File(PathBuf),
}

impl ChipIcon {
    pub fn named(name: impl Into<String>) -> Self {
        ChipIcon::Named(name.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        ChipIcon::File(path.into())
    }

    /// An empty name or empty path stands for "no icon"
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ChipIcon::Named(name) => name.trim().is_empty(),
            ChipIcon::File(path) => path.as_os_str().is_empty(),
        }
    }

    /// Drop empty icons so callers only ever see real ones
    #[must_use]
    pub fn normalize(icon: Option<Self>) -> Option<Self> {
        icon.filter(|i| !i.is_empty())
    }
}

/// Events emitted by a chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipEvent {
    /// Body click toggled the chip; carries the new checked state
    Activated { checked: bool },
    /// The embedded delete affordance was clicked
    DeleteRequested,
}

// ============================================================================
// Geometry
// ============================================================================

/// Which part of a chip a pointer position falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitRegion {
    Body,
    Delete,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Integer widget size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink the right and bottom edges by `amount`
    #[must_use]
    pub fn shrink_far_edges(&self, amount: f64) -> Self {
        Self {
            width: (self.width - amount).max(0.0),
            height: (self.height - amount).max(0.0),
            ..*self
        }
    }
}


/// Property-based tests for the state resolution and colour parsing rules.
#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn disabled_always_wins(checked in any::<bool>(), hovered in any::<bool>()) {
            prop_assert_eq!(VisualState::resolve(false, checked, hovered), VisualState::Disabled);
        }

        #[test]
        fn checked_wins_over_hover_when_enabled(hovered in any::<bool>()) {
            prop_assert_eq!(VisualState::resolve(true, true, hovered), VisualState::Checked);
        }

        #[test]
        fn formatted_colors_parse_back(value in 0u32..=0x00ff_ffff) {
            let rgb = Rgb::from_hex(value);
            let parsed: Rgb = rgb.to_string().parse().unwrap();
            prop_assert_eq!(parsed, rgb);
        }
    }
}
