//! Activation targets: screen regions paired with the action a click emits.

use ratatui::layout::{Position, Rect};

use crate::action::Action;

/// Click targets collected during one render pass.
///
/// Later entries sit on top of earlier ones, so overlays drawn after the grid
/// win hit tests over the tiles beneath them.
#[derive(Debug, Default, Clone)]
pub struct Targets {
    entries: Vec<(Rect, Action)>,
}

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, area: Rect, action: Action) {
        if area.area() > 0 {
            self.entries.push((area, action));
        }
    }

    /// Mark a region as inert so clicks do not fall through to what is below.
    pub fn block(&mut self, area: Rect) {
        self.push(area, Action::None);
    }

    /// Topmost action at a cell.
    pub fn hit(&self, x: u16, y: u16) -> Option<&Action> {
        let pos = Position::new(x, y);
        self.entries
            .iter()
            .rev()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, action)| action)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &(Rect, Action)> {
        self.entries.iter()
    }
}
