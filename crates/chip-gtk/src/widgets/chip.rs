//! Chip widget for GTK4.
//!
//! A pill-shaped toggle with an optional leading icon, a label and a trailing
//! delete button. All state lives in the headless `chip_core::Chip`; this
//! widget forwards pointer input to it, dispatches the events it returns and
//! repaints from its palette.
//!
//! Child tree:
//! - `Overlay`
//!   - `DrawingArea` (background and border, painted with cairo)
//!   - `Image` (leading icon, overlaid at the start edge)
//!   - `Box`
//!     - `Label`
//!     - `Button` (delete glyph)

use crate::styles;
use chip_core::metrics;
use chip_core::theme::{self, ThemeListener};
use chip_core::{Chip, ChipLayout, DeletePolicy};
use chip_types::{ChipEvent, ChipIcon, HitRegion, Point, StateColors, Theme, VisualState};
use gtk4::cairo;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use std::cell::{OnceCell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;
use tracing::{debug, warn};

type ActivatedCallback = RefCell<Option<Box<dyn Fn(bool)>>>;
type DeleteCallback = RefCell<Option<Box<dyn Fn()>>>;

mod imp {
    use super::{
        ActivatedCallback, Chip, DeleteCallback, DeletePolicy, ObjectImpl, ObjectImplExt,
        ObjectSubclass, ObjectSubclassExt, OnceCell, Rc, RefCell, Theme, ThemeListener, WidgetExt,
        WidgetImpl, WidgetClassExt, glib,
    };

    /// Child widgets, created once in `constructed`
    #[derive(Debug)]
    pub struct Parts {
        pub canvas: gtk4::DrawingArea,
        pub icon: gtk4::Image,
        pub label: gtk4::Label,
        pub delete_button: gtk4::Button,
    }

    /// Registry entry for one widget. Holds the widget weakly so the
    /// registry never keeps a chip alive.
    pub struct ThemeLink(pub glib::WeakRef<super::ChipWidget>);

    impl ThemeListener for ThemeLink {
        fn theme_changed(&self, theme: Theme) {
            if let Some(chip) = self.0.upgrade() {
                chip.apply_theme(theme);
            }
        }

        fn delete_policy_changed(&self, policy: DeletePolicy) {
            if let Some(chip) = self.0.upgrade() {
                chip.set_delete_policy(policy);
            }
        }
    }

    #[derive(Default)]
    pub struct ChipWidgetInner {
        pub model: RefCell<Chip>,
        pub parts: OnceCell<Parts>,
        pub theme_link: OnceCell<Rc<ThemeLink>>,
        pub on_activated: ActivatedCallback,
        pub on_delete: DeleteCallback,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ChipWidgetInner {
        const NAME: &'static str = "ChipWidget";
        type Type = super::ChipWidget;
        type ParentType = gtk4::Widget;

        fn class_init(klass: &mut Self::Class) {
            klass.set_css_name("chip");
            klass.set_layout_manager_type::<gtk4::BinLayout>();
            klass.set_accessible_role(gtk4::AccessibleRole::ToggleButton);
        }
    }

    impl ObjectImpl for ChipWidgetInner {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().build();
        }

        fn dispose(&self) {
            while let Some(child) = self.obj().first_child() {
                child.unparent();
            }
        }
    }

    impl WidgetImpl for ChipWidgetInner {}
}

glib::wrapper! {
    pub struct ChipWidget(ObjectSubclass<imp::ChipWidgetInner>)
        @extends gtk4::Widget,
        @implements gtk4::Accessible, gtk4::Buildable, gtk4::ConstraintTarget;
}

impl Default for ChipWidget {
    fn default() -> Self {
        Self::new("", None)
    }
}

impl ChipWidget {
    /// Create an unchecked, enabled chip in the current process-wide theme
    /// and delete policy.
    ///
    /// An icon with an empty name or path is treated as no icon.
    pub fn new(text: &str, icon: Option<ChipIcon>) -> Self {
        let obj: Self = glib::Object::builder().build();
        obj.imp()
            .model
            .replace(
                Chip::new(text, icon)
                    .with_theme(theme::current_theme())
                    .with_delete_policy(theme::current_delete_policy()),
            );
        obj.sync_icon();
        obj.refresh();
        obj
    }

    fn build(&self) {
        styles::ensure_installed();

        // Height is fixed; never stretch to a taller row
        self.set_valign(gtk4::Align::Center);
        self.set_vexpand(false);

        let canvas = gtk4::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .can_target(false)
            .build();
        canvas.set_draw_func(glib::clone!(
            #[weak(rename_to = obj)]
            self,
            move |_area, cr, width, height| {
                obj.draw(cr, width, height);
            }
        ));

        let icon = gtk4::Image::builder()
            .pixel_size(metrics::ICON_SIZE)
            .halign(gtk4::Align::Start)
            .valign(gtk4::Align::Center)
            .margin_start(metrics::ICON_X)
            .css_classes(["chip-icon"])
            .can_target(false)
            .visible(false)
            .build();

        let label = gtk4::Label::builder()
            .css_classes(["chip-label"])
            .halign(gtk4::Align::Start)
            .valign(gtk4::Align::Center)
            .hexpand(true)
            .xalign(0.0)
            .build();

        let delete_button = gtk4::Button::builder()
            .label(metrics::DELETE_GLYPH)
            .css_classes(["chip-delete"])
            .width_request(metrics::DELETE_SIZE)
            .height_request(metrics::DELETE_SIZE)
            .halign(gtk4::Align::End)
            .valign(gtk4::Align::Center)
            .focus_on_click(false)
            .tooltip_text("Remove")
            .build();
        delete_button.set_cursor_from_name(Some("pointer"));
        delete_button.connect_clicked(glib::clone!(
            #[weak(rename_to = obj)]
            self,
            move |_| {
                obj.press(HitRegion::Delete);
            }
        ));

        let content = gtk4::Box::builder()
            .orientation(gtk4::Orientation::Horizontal)
            .spacing(metrics::SPACING)
            .margin_start(metrics::MARGIN_START)
            .margin_end(metrics::MARGIN_END)
            .valign(gtk4::Align::Center)
            .build();
        content.append(&label);
        content.append(&delete_button);

        let overlay = gtk4::Overlay::new();
        overlay.set_child(Some(&canvas));
        overlay.add_overlay(&icon);
        overlay.add_overlay(&content);
        overlay.set_measure_overlay(&content, true);
        overlay.set_parent(self);

        // Body clicks only; the delete button reports its own
        let click = gtk4::GestureClick::new();
        click.set_button(gtk4::gdk::BUTTON_PRIMARY);
        click.connect_released(glib::clone!(
            #[weak(rename_to = obj)]
            self,
            move |_, _, x, y| {
                obj.handle_release(x, y);
            }
        ));
        self.add_controller(click);

        let motion = gtk4::EventControllerMotion::new();
        motion.connect_enter(glib::clone!(
            #[weak(rename_to = obj)]
            self,
            move |_, _, _| {
                obj.set_hovered(true);
            }
        ));
        motion.connect_leave(glib::clone!(
            #[weak(rename_to = obj)]
            self,
            move |_| {
                obj.set_hovered(false);
            }
        ));
        self.add_controller(motion);

        let parts = imp::Parts {
            canvas,
            icon,
            label,
            delete_button,
        };
        if self.imp().parts.set(parts).is_err() {
            warn!("Chip children built twice");
        }

        let link = Rc::new(imp::ThemeLink(self.downgrade()));
        let listener = Rc::downgrade(&link);
        theme::subscribe(listener);
        if self.imp().theme_link.set(link).is_err() {
            warn!("Chip subscribed to theme registry twice");
        }
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub fn text(&self) -> String {
        self.imp().model.borrow().text().to_string()
    }

    pub fn set_text(&self, text: &str) {
        self.imp().model.borrow_mut().set_text(text);
        self.refresh();
    }

    pub fn icon(&self) -> Option<ChipIcon> {
        self.imp().model.borrow().icon().cloned()
    }

    /// Set or clear the leading icon. The label shifts to make room for it.
    pub fn set_icon(&self, icon: Option<ChipIcon>) {
        self.imp().model.borrow_mut().set_icon(icon);
        self.sync_icon();
        self.refresh();
    }

    pub fn is_checked(&self) -> bool {
        self.imp().model.borrow().is_checked()
    }

    /// Programmatic check; does not emit `activated`
    pub fn set_checked(&self, checked: bool) {
        self.imp().model.borrow_mut().set_checked(checked);
        self.refresh();
    }

    /// Programmatic toggle; does not emit `activated`
    pub fn toggle(&self) {
        self.imp().model.borrow_mut().toggle();
        self.refresh();
    }

    pub fn is_enabled(&self) -> bool {
        self.imp().model.borrow().is_enabled()
    }

    /// A disabled chip ignores body clicks and paints in the disabled tier
    pub fn set_enabled(&self, enabled: bool) {
        self.imp().model.borrow_mut().set_enabled(enabled);
        self.refresh();
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.imp().model.borrow().delete_policy()
    }

    pub fn set_delete_policy(&self, policy: DeletePolicy) {
        self.imp().model.borrow_mut().set_delete_policy(policy);
        self.refresh();
    }

    pub fn theme(&self) -> Theme {
        self.imp().model.borrow().theme()
    }

    /// Repaint this chip in `theme`. Use `chip_gtk::apply_theme` to switch
    /// every live chip at once.
    pub fn apply_theme(&self, theme: Theme) {
        let Ok(mut model) = self.imp().model.try_borrow_mut() else {
            warn!("Chip busy during theme change to {theme}, skipped");
            return;
        };
        model.apply_theme(theme);
        drop(model);
        self.refresh();
    }

    pub fn visual_state(&self) -> VisualState {
        self.imp().model.borrow().visual_state()
    }

    // ------------------------------------------------------------------
    // Signals
    // ------------------------------------------------------------------

    /// Called with the new checked state after a body click toggles the chip
    pub fn connect_activated<F: Fn(bool) + 'static>(&self, callback: F) {
        *self.imp().on_activated.borrow_mut() = Some(Box::new(callback));
    }

    /// Called when the delete button is clicked
    pub fn connect_delete_requested<F: Fn() + 'static>(&self, callback: F) {
        *self.imp().on_delete.borrow_mut() = Some(Box::new(callback));
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    fn handle_release(&self, x: f64, y: f64) {
        let region = self
            .imp()
            .model
            .borrow()
            .layout_at(self.width(), self.height())
            .hit_test(Point::new(x, y));
        if region == HitRegion::Body {
            self.press(region);
        }
    }

    fn press(&self, region: HitRegion) {
        let event = self.imp().model.borrow_mut().press(region);
        self.refresh();
        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    fn dispatch(&self, event: ChipEvent) {
        match event {
            ChipEvent::Activated { checked } => {
                if let Some(ref callback) = *self.imp().on_activated.borrow() {
                    callback(checked);
                }
            }
            ChipEvent::DeleteRequested => {
                if let Some(ref callback) = *self.imp().on_delete.borrow() {
                    callback();
                }
            }
        }
    }

    fn set_hovered(&self, hovered: bool) {
        self.imp().model.borrow_mut().set_hovered(hovered);
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn sync_icon(&self) {
        let Some(parts) = self.imp().parts.get() else {
            return;
        };
        let model = self.imp().model.borrow();
        match model.icon() {
            Some(ChipIcon::Named(name)) => {
                parts.icon.set_icon_name(Some(name.as_str()));
                parts.icon.set_visible(true);
            }
            Some(ChipIcon::File(path)) => {
                if !path.exists() {
                    debug!("Chip icon {} not found", path.display());
                }
                parts.icon.set_from_file(Some(path));
                parts.icon.set_visible(true);
            }
            None => {
                parts.icon.clear();
                parts.icon.set_visible(false);
            }
        }
    }

    /// Push model state into the children and schedule a repaint
    fn refresh(&self) {
        let Some(parts) = self.imp().parts.get() else {
            return;
        };
        let model = self.imp().model.borrow();

        if parts.label.label().as_str() != model.text() {
            parts.label.set_label(model.text());
        }
        parts.label.set_margin_start(model.label_inset());

        let state = model.visual_state();
        for candidate in VisualState::ALL {
            if let Some(class) = candidate.css_class() {
                if candidate == state {
                    self.add_css_class(class);
                } else {
                    self.remove_css_class(class);
                }
            }
        }
        for candidate in Theme::ALL {
            if candidate == model.theme() {
                self.add_css_class(candidate.css_class());
            } else {
                self.remove_css_class(candidate.css_class());
            }
        }

        parts.delete_button.set_sensitive(model.delete_enabled());
        self.update_state(&[gtk4::accessible::State::Pressed(pressed_state(
            model.is_checked(),
        ))]);
        self.set_cursor_from_name(Some(if model.is_enabled() {
            "pointer"
        } else {
            "default"
        }));

        let (_, label_width, _, _) = parts.label.measure(gtk4::Orientation::Horizontal, -1);
        let size = model.preferred_size(label_width);
        self.set_size_request(size.width, size.height);

        parts.canvas.queue_draw();
    }

    fn draw(&self, cr: &cairo::Context, width: i32, height: i32) {
        let model = self.imp().model.borrow();
        let layout = ChipLayout::compute(width, height, model.has_icon());
        if let Err(e) = paint_background(cr, &layout, model.colors()) {
            warn!("Failed to paint chip {:?}: {e}", model.text());
        }
    }
}

fn pressed_state(checked: bool) -> gtk4::AccessibleTristate {
    if checked {
        gtk4::AccessibleTristate::True
    } else {
        gtk4::AccessibleTristate::False
    }
}

/// Paint the pill background and its 1px border.
///
/// # Errors
///
/// Returns the cairo error if filling or stroking fails.
pub fn paint_background(
    cr: &cairo::Context,
    layout: &ChipLayout,
    colors: &StateColors,
) -> Result<(), cairo::Error> {
    // Half-pixel offset keeps the border on whole pixels
    let rect = layout.background;
    rounded_rect(
        cr,
        rect.x + 0.5,
        rect.y + 0.5,
        rect.width,
        rect.height,
        layout.corner_radius,
    );

    let (r, g, b) = colors.fill.to_unit();
    cr.set_source_rgb(r, g, b);
    cr.fill_preserve()?;

    let (r, g, b) = colors.border.to_unit();
    cr.set_source_rgb(r, g, b);
    cr.set_line_width(metrics::BORDER_WIDTH);
    cr.stroke()
}

fn rounded_rect(cr: &cairo::Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    cr.new_sub_path();
    cr.arc(x + width - radius, y + radius, radius, -PI / 2.0, 0.0);
    cr.arc(x + width - radius, y + height - radius, radius, 0.0, PI / 2.0);
    cr.arc(x + radius, y + height - radius, radius, PI / 2.0, PI);
    cr.arc(x + radius, y + radius, radius, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip_core::palette;
    use std::cell::Cell;

    /// Render a 100x32 chip background and return a pixel reader
    fn render(colors: &StateColors) -> impl Fn(usize, usize) -> (u8, u8, u8, u8) {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 100, 32).unwrap();
        {
            let cr = cairo::Context::new(&surface).unwrap();
            let layout = ChipLayout::compute(100, 32, false);
            paint_background(&cr, &layout, colors).unwrap();
        }
        surface.flush();

        let stride = usize::try_from(surface.stride()).unwrap();
        let data = surface.data().unwrap().to_vec();
        move |x, y| {
            let i = y * stride + x * 4;
            let pixel = u32::from_ne_bytes(data[i..i + 4].try_into().unwrap());
            let [a, r, g, b] = pixel.to_be_bytes();
            (r, g, b, a)
        }
    }

    #[test]
    fn test_background_uses_fill_colour() {
        let colors = palette::resolve(Theme::Light, VisualState::Checked);
        let pixel = render(colors);
        assert_eq!(pixel(50, 16), (0xe0, 0xf2, 0xfe, 0xff));
    }

    #[test]
    fn test_border_uses_border_colour() {
        let colors = palette::resolve(Theme::Light, VisualState::Checked);
        let pixel = render(colors);
        assert_eq!(pixel(50, 0), (0x00, 0x78, 0xd4, 0xff));
    }

    #[test]
    fn test_corners_are_transparent() {
        let colors = palette::resolve(Theme::Dark, VisualState::Normal);
        let pixel = render(colors);
        assert_eq!(pixel(0, 0).3, 0);
        assert_eq!(pixel(99, 31).3, 0);
    }

    #[test]
    fn test_dark_normal_fill() {
        let colors = palette::resolve(Theme::Dark, VisualState::Normal);
        let pixel = render(colors);
        assert_eq!(pixel(50, 16), (0x33, 0x33, 0x33, 0xff));
    }

    #[test]
    fn test_pressed_state_tracks_checked() {
        assert_eq!(pressed_state(true), gtk4::AccessibleTristate::True);
        assert_eq!(pressed_state(false), gtk4::AccessibleTristate::False);
    }

    // GTK initialises once per process on one thread, so every widget check
    // runs inside this single test. Skipped when no display is available.
    #[test]
    fn test_widget_behaviour() {
        if gtk4::init().is_err() {
            eprintln!("No display available, skipping widget checks");
            return;
        }

        check_label_follows_text();
        check_delete_button_emits_delete_only();
        check_body_press_toggles_once();
        check_disabled_chip_delete_button();
        check_icon_shifts_label();
        check_fixed_height();
        check_registry_updates_widgets();
    }

    fn parts(chip: &ChipWidget) -> &imp::Parts {
        chip.imp().parts.get().unwrap()
    }

    fn record_events(chip: &ChipWidget) -> (Rc<RefCell<Vec<bool>>>, Rc<Cell<usize>>) {
        let activated = Rc::new(RefCell::new(Vec::new()));
        let deleted = Rc::new(Cell::new(0));

        let seen = activated.clone();
        chip.connect_activated(move |checked| seen.borrow_mut().push(checked));
        let count = deleted.clone();
        chip.connect_delete_requested(move || count.set(count.get() + 1));

        (activated, deleted)
    }

    fn check_label_follows_text() {
        let chip = ChipWidget::new("Tag", None);
        assert_eq!(parts(&chip).label.label().as_str(), "Tag");

        chip.set_text("Renamed");
        assert_eq!(chip.text(), "Renamed");
        assert_eq!(parts(&chip).label.label().as_str(), "Renamed");

        chip.set_text("");
        assert_eq!(parts(&chip).label.label().as_str(), "");
    }

    fn check_delete_button_emits_delete_only() {
        let chip = ChipWidget::new("Tag", None);
        let (activated, deleted) = record_events(&chip);

        parts(&chip).delete_button.emit_clicked();

        assert_eq!(deleted.get(), 1);
        assert!(activated.borrow().is_empty());
        assert!(!chip.is_checked());
    }

    fn check_body_press_toggles_once() {
        let chip = ChipWidget::new("Tag", None);
        let (activated, deleted) = record_events(&chip);

        chip.press(HitRegion::Body);
        assert_eq!(*activated.borrow(), vec![true]);
        assert!(chip.is_checked());
        assert!(chip.has_css_class("checked"));

        chip.press(HitRegion::Body);
        assert_eq!(*activated.borrow(), vec![true, false]);
        assert!(!chip.is_checked());
        assert_eq!(deleted.get(), 0);
    }

    fn check_disabled_chip_delete_button() {
        let chip = ChipWidget::new("Tag", None);
        let (activated, deleted) = record_events(&chip);
        chip.set_enabled(false);

        assert!(!parts(&chip).delete_button.is_sensitive());
        assert!(chip.has_css_class("disabled"));

        chip.press(HitRegion::Body);
        chip.press(HitRegion::Delete);
        assert!(activated.borrow().is_empty());
        assert_eq!(deleted.get(), 0);
        assert!(!chip.is_checked());

        chip.set_delete_policy(DeletePolicy::AlwaysActive);
        assert!(parts(&chip).delete_button.is_sensitive());
        parts(&chip).delete_button.emit_clicked();
        assert_eq!(deleted.get(), 1);
    }

    fn check_icon_shifts_label() {
        let chip = ChipWidget::new("Tag", Some(ChipIcon::named("document-new")));
        assert!(parts(&chip).icon.is_visible());
        assert_eq!(parts(&chip).label.margin_start(), metrics::ICON_LABEL_INSET);

        chip.set_icon(Some(ChipIcon::named("")));
        assert!(chip.icon().is_none());
        assert!(!parts(&chip).icon.is_visible());
        assert_eq!(parts(&chip).label.margin_start(), 0);
    }

    fn check_fixed_height() {
        let chip = ChipWidget::new("Tag", None);
        assert_eq!(chip.valign(), gtk4::Align::Center);
        assert!(!chip.vexpands());
        assert_eq!(chip.size_request().1, metrics::HEIGHT);
    }

    fn check_registry_updates_widgets() {
        let chip = ChipWidget::new("Tag", None);

        theme::apply_theme(Theme::Dark);
        assert_eq!(chip.theme(), Theme::Dark);
        assert!(chip.has_css_class("theme-dark"));
        assert!(!chip.has_css_class("theme-light"));

        theme::apply_delete_policy(DeletePolicy::AlwaysActive);
        assert_eq!(chip.delete_policy(), DeletePolicy::AlwaysActive);
        let later = ChipWidget::new("Later", None);
        assert_eq!(later.delete_policy(), DeletePolicy::AlwaysActive);
        assert_eq!(later.theme(), Theme::Dark);

        theme::apply_delete_policy(DeletePolicy::SuppressWhenDisabled);
        theme::apply_theme(Theme::Light);
        assert_eq!(chip.theme(), Theme::Light);
    }
}
