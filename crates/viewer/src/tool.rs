//! Tool palette and cursor feedback

use serde::{Deserialize, Serialize};

/// Active markup tool. Exactly one is active at a time; switching tools
/// cancels any in-progress gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Cursor,
    Highlight,
    Rectangle,
    Circle,
    Text,
    Comment,
}

impl ToolMode {
    /// Tools that drag out a shape on pointer-down.
    pub fn is_drawing_tool(&self) -> bool {
        matches!(self, Self::Highlight | Self::Rectangle | Self::Circle)
    }
}

/// Pointer cursor the host should display, derived from interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
    Grab,
    Grabbing,
    Crosshair,
    ResizeNwSe,
    ResizeNeSw,
    ResizeNs,
    ResizeEw,
}
