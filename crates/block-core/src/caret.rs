use serde::{Deserialize, Serialize};

use crate::document::BlockId;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Caret position relative to the editor container, including its scroll
/// offset. `None` when there is no selection or the caret has no client rect
/// (an empty block, for instance); callers pick their own fallback anchor.
pub fn caret_coordinates<S: Surface + ?Sized>(surface: &S) -> Option<Position> {
    let caret = surface.caret_rect()?;
    let container = surface.container_rect();
    let scroll = surface.container_scroll();
    Some(Position {
        x: caret.x - container.x + scroll.x,
        y: caret.y - container.y + scroll.y,
    })
}

pub fn set_caret_to_end<S: Surface + ?Sized>(surface: &mut S, block: BlockId) {
    surface.collapse_selection_to_end(block);
    surface.focus(block);
}
