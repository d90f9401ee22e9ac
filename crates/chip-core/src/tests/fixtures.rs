//! Test fixtures and helpers

use crate::Chip;
use chip_types::{ChipIcon, Point};
use std::cell::RefCell;
use std::rc::Rc;

/// Width used for click tests; the delete zone is then x 76..92, y 8..24
pub const CHIP_WIDTH: i32 = 100;

pub const BODY_POINT: Point = Point::new(20.0, 16.0);
pub const DELETE_POINT: Point = Point::new(84.0, 16.0);

/// A plain chip with text "Tag" and no icon
pub fn make_chip() -> Chip {
    Chip::new("Tag", None)
}

pub fn make_icon_chip() -> Chip {
    Chip::new("Settings", Some(ChipIcon::named("preferences-system")))
}

pub fn make_shared_chip(text: &str) -> Rc<RefCell<Chip>> {
    Rc::new(RefCell::new(Chip::new(text, None)))
}
