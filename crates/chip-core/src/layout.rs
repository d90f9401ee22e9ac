//! Chip geometry: fixed metrics, preferred size and pointer hit testing.

use chip_types::{HitRegion, Point, Rect, Size};

/// Fixed chip metrics in logical pixels
pub mod metrics {
    pub const HEIGHT: i32 = 32;
    pub const CORNER_RADIUS: f64 = 16.0;
    pub const BORDER_WIDTH: f64 = 1.0;
    /// Background is drawn 1px short of the far edges so the stroke stays inside
    pub const BACKGROUND_INSET: f64 = 1.0;

    pub const MARGIN_START: i32 = 12;
    pub const MARGIN_END: i32 = 8;
    pub const SPACING: i32 = 8;

    pub const ICON_SIZE: i32 = 16;
    pub const ICON_X: i32 = 12;
    /// Extra start margin given to the label while an icon is shown
    pub const ICON_LABEL_INSET: i32 = 24;

    pub const DELETE_SIZE: i32 = 16;
    pub const DELETE_GLYPH: &str = "\u{2715}";
    pub const DELETE_FONT_SIZE: i32 = 12;

    /// Width added to label + delete for margins and spacing
    pub const PADDING_ALLOWANCE: i32 = 40;
    /// Width added when an icon is present
    pub const ICON_ALLOWANCE: i32 = 28;
}

/// Preferred chip size for a label of natural width `label_width`.
///
/// Height is always `metrics::HEIGHT`.
#[must_use]
pub fn preferred_size(label_width: i32, has_icon: bool) -> Size {
    let mut width = label_width
        .max(0)
        .saturating_add(metrics::DELETE_SIZE + metrics::PADDING_ALLOWANCE);
    if has_icon {
        width = width.saturating_add(metrics::ICON_ALLOWANCE);
    }
    Size::new(width, metrics::HEIGHT)
}

/// Start margin of the label inside the content box
#[must_use]
pub fn label_inset(has_icon: bool) -> i32 {
    if has_icon {
        metrics::ICON_LABEL_INSET
    } else {
        0
    }
}

/// Resolved geometry of a chip at a given allocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipLayout {
    pub bounds: Rect,
    /// Rounded rectangle the background and border are drawn into
    pub background: Rect,
    pub corner_radius: f64,
    pub icon: Option<Rect>,
    /// Click target of the delete affordance
    pub delete: Rect,
    pub label_inset: i32,
}

impl ChipLayout {
    #[must_use]
    pub fn compute(width: i32, height: i32, has_icon: bool) -> Self {
        let width = f64::from(width.max(0));
        let height = f64::from(height.max(0));
        let bounds = Rect::new(0.0, 0.0, width, height);
        let background = bounds.shrink_far_edges(metrics::BACKGROUND_INSET);
        let corner_radius = metrics::CORNER_RADIUS
            .min(background.width / 2.0)
            .min(background.height / 2.0);

        let icon_size = f64::from(metrics::ICON_SIZE);
        let icon = has_icon.then(|| {
            Rect::new(
                f64::from(metrics::ICON_X),
                (height - icon_size) / 2.0,
                icon_size,
                icon_size,
            )
        });

        let delete_size = f64::from(metrics::DELETE_SIZE);
        let delete = Rect::new(
            width - f64::from(metrics::MARGIN_END) - delete_size,
            (height - delete_size) / 2.0,
            delete_size,
            delete_size,
        );

        Self {
            bounds,
            background,
            corner_radius,
            icon,
            delete,
            label_inset: label_inset(has_icon),
        }
    }

    /// Classify a pointer position relative to the chip's own origin
    #[must_use]
    pub fn hit_test(&self, point: Point) -> HitRegion {
        if !self.bounds.contains(point) {
            HitRegion::Outside
        } else if self.delete.contains(point) {
            HitRegion::Delete
        } else {
            HitRegion::Body
        }
    }
}
