//! Hover tooltips for the weapon and skill dropdowns.
//!
//! A `DropdownTooltip` is the show/move/hide state for one dropdown. It owns
//! at most one tooltip node and draws it through a `TooltipSurface`, which
//! the browser backs with a real `<div>` and tests back with a fake.

use log::warn;

/// Distance in px from the cursor to the tooltip's top-left corner.
pub const CURSOR_OFFSET: i32 = 10;

/// Inline style applied to every tooltip node.
pub const TOOLTIP_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("background", "#33363a"),
    ("color", "#ffe600"),
    ("border", "2px solid #ff003c"),
    ("border-radius", "8px"),
    ("padding", "8px 14px"),
    ("z-index", "1000"),
    ("font-size", "1em"),
    ("pointer-events", "none"),
];

/// Cursor position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn offset(self) -> Self {
        Self::new(self.x + CURSOR_OFFSET, self.y + CURSOR_OFFSET)
    }
}

/// Where tooltip nodes live.
pub trait TooltipSurface {
    type Node;

    /// Create a styled node showing `text` and attach it to the document.
    fn create(&self, text: &str) -> Result<Self::Node, String>;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn place(&self, node: &Self::Node, at: Point) -> Result<(), String>;
    /// Detach the node from the document.
    fn remove(&self, node: Self::Node);
}

/// Looks up the text for a dropdown value. `None` means "no tooltip".
pub type Describe = Box<dyn Fn(&str) -> Option<String>>;

pub struct DropdownTooltip<S: TooltipSurface> {
    surface: S,
    describe: Describe,
    node: Option<S::Node>,
}

impl<S: TooltipSurface> DropdownTooltip<S> {
    pub fn new(surface: S, describe: Describe) -> Self {
        Self {
            surface,
            describe,
            node: None,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.node.is_some()
    }

    /// Pointer entered the dropdown. `selected` is the value of the selected
    /// option, if there is one.
    pub fn enter(&mut self, selected: Option<&str>, at: Point) {
        let Some(text) = selected
            .and_then(|value| (self.describe)(value))
            .filter(|text| !text.is_empty())
        else {
            self.leave();
            return;
        };
        match &self.node {
            Some(node) => self.surface.set_text(node, &text),
            None => match self.surface.create(&text) {
                Ok(node) => self.node = Some(node),
                Err(e) => {
                    warn!("tooltip: create failed: {}", e);
                    return;
                }
            },
        }
        self.move_to(at);
    }

    /// Pointer moved over the dropdown.
    pub fn move_to(&mut self, at: Point) {
        if let Some(node) = &self.node {
            if let Err(e) = self.surface.place(node, at.offset()) {
                warn!("tooltip: place failed: {}", e);
            }
        }
    }

    /// Pointer left the dropdown.
    pub fn leave(&mut self) {
        if let Some(node) = self.node.take() {
            self.surface.remove(node);
        }
    }
}
