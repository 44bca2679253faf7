//! Moving a window that has no native title bar

use eframe::egui::{Pos2, Vec2};

/// Drag state for a frameless window
///
/// All positions are in global (screen) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowDrag {
    dragging: bool,
    offset: Vec2,
}

impl WindowDrag {
    /// Idle drag state
    pub fn new() -> Self {
        Self::default()
    }

    /// True between [`begin`](Self::begin) and [`end`](Self::end)
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer position relative to the window origin, captured at drag start
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Start dragging; remembers where inside the window the pointer grabbed it
    pub fn begin(&mut self, pointer: Pos2, window_origin: Pos2) {
        self.dragging = true;
        self.offset = pointer - window_origin;
    }

    /// New window origin for the pointer position, or `None` when not dragging
    pub fn update(&self, pointer: Pos2) -> Option<Pos2> {
        self.dragging.then(|| pointer - self.offset)
    }

    /// Stop dragging
    pub fn end(&mut self) {
        self.dragging = false;
    }
}
