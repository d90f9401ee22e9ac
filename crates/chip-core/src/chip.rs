//! Headless chip model.
//!
//! `Chip` owns every piece of chip state and decides which event a click
//! produces. Views forward pointer input here, dispatch the returned
//! `ChipEvent` to their listeners and repaint whenever `revision()` moves.

use crate::layout::{self, ChipLayout, metrics};
use crate::palette;
use crate::theme::ThemeListener;
use chip_types::{
    ChipEvent, ChipIcon, HitRegion, Palette, Point, Size, StateColors, Theme, VisualState,
};
use std::cell::RefCell;
use tracing::{debug, warn};

/// Whether the delete affordance still fires while the chip is disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Delete stays visible but inert while the chip is disabled
    #[default]
    SuppressWhenDisabled,
    /// Delete fires regardless of the enabled flag
    AlwaysActive,
}

#[derive(Debug, Clone)]
pub struct Chip {
    text: String,
    icon: Option<ChipIcon>,
    checked: bool,
    enabled: bool,
    hovered: bool,
    theme: Theme,
    delete_policy: DeletePolicy,
    revision: u64,
}

impl Default for Chip {
    fn default() -> Self {
        Self::new("", None)
    }
}

impl Chip {
    pub fn new(text: impl Into<String>, icon: Option<ChipIcon>) -> Self {
        Self {
            text: text.into(),
            icon: ChipIcon::normalize(icon),
            checked: false,
            enabled: true,
            hovered: false,
            theme: Theme::default(),
            delete_policy: DeletePolicy::default(),
            revision: 0,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn icon(&self) -> Option<&ChipIcon> {
        self.icon.as_ref()
    }

    pub fn has_icon(&self) -> bool {
        self.icon.is_some()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Bumped by every call that changes what the chip looks like
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn visual_state(&self) -> VisualState {
        VisualState::resolve(self.enabled, self.checked, self.hovered)
    }

    pub fn palette(&self) -> &'static Palette {
        palette::palette_for(self.theme)
    }

    /// Colours for the current theme and visual state
    pub fn colors(&self) -> &'static StateColors {
        palette::resolve(self.theme, self.visual_state())
    }

    /// Whether a click on the delete affordance is honoured right now
    pub fn delete_enabled(&self) -> bool {
        self.enabled || self.delete_policy == DeletePolicy::AlwaysActive
    }

    pub fn label_inset(&self) -> i32 {
        layout::label_inset(self.has_icon())
    }

    pub fn preferred_size(&self, label_width: i32) -> Size {
        layout::preferred_size(label_width, self.has_icon())
    }

    /// Layout at the fixed chip height
    pub fn layout(&self, width: i32) -> ChipLayout {
        self.layout_at(width, metrics::HEIGHT)
    }

    /// Layout for an actual allocation, which a container may have stretched
    pub fn layout_at(&self, width: i32, height: i32) -> ChipLayout {
        ChipLayout::compute(width, height, self.has_icon())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.touch();
        }
    }

    /// Set or clear the icon; an empty icon counts as none
    pub fn set_icon(&mut self, icon: Option<ChipIcon>) {
        let icon = ChipIcon::normalize(icon);
        if self.icon != icon {
            self.icon = icon;
            self.touch();
        }
    }

    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.touch();
        }
    }

    /// Programmatic toggle; emits nothing
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
        self.touch();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.touch();
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.touch();
        }
    }

    pub fn set_delete_policy(&mut self, policy: DeletePolicy) {
        if self.delete_policy != policy {
            self.delete_policy = policy;
            self.touch();
        }
    }

    /// Switch palettes. Always repaints, even when the theme is unchanged.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.touch();
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Handle a click on `region` and return the event it produces
    pub fn press(&mut self, region: HitRegion) -> Option<ChipEvent> {
        match region {
            HitRegion::Outside => None,
            HitRegion::Body => {
                if !self.enabled {
                    debug!("Ignoring body click on disabled chip {:?}", self.text);
                    return None;
                }
                self.toggle();
                debug!("Chip {:?} activated, checked={}", self.text, self.checked);
                Some(ChipEvent::Activated {
                    checked: self.checked,
                })
            }
            HitRegion::Delete => {
                if !self.delete_enabled() {
                    debug!("Ignoring delete click on disabled chip {:?}", self.text);
                    return None;
                }
                debug!("Chip {:?} delete requested", self.text);
                Some(ChipEvent::DeleteRequested)
            }
        }
    }

    /// Hit-test `point` against a chip allocated `width` pixels wide, then press
    pub fn click_at(&mut self, point: Point, width: i32) -> Option<ChipEvent> {
        let region = self.layout(width).hit_test(point);
        self.press(region)
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Shared chips follow the registry's theme
impl ThemeListener for RefCell<Chip> {
    fn theme_changed(&self, theme: Theme) {
        match self.try_borrow_mut() {
            Ok(mut chip) => chip.apply_theme(theme),
            Err(_) => warn!("Chip busy during theme change to {theme}, skipped"),
        }
    }

    fn delete_policy_changed(&self, policy: DeletePolicy) {
        match self.try_borrow_mut() {
            Ok(mut chip) => chip.set_delete_policy(policy),
            Err(_) => warn!("Chip busy during delete policy change to {policy:?}, skipped"),
        }
    }
}
