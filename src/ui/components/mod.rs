//! UI components module.

pub mod library_view;
pub mod media_actions;
pub mod media_grid;
pub mod media_tile;
pub mod page_header;
pub mod playing_bar;

pub use library_view::{render_library_view, LibraryViewProps};
pub use media_actions::{render_media_actions, MediaActionsProps};
pub use page_header::HEADER_HEIGHT;

/// First visible index of a list scrolled just far enough to show `selected`.
pub(crate) fn scroll_offset(selected: Option<usize>, visible: usize) -> usize {
    match selected {
        Some(selected) if visible > 0 && selected >= visible => selected + 1 - visible,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(None, 5), 0);
        assert_eq!(scroll_offset(Some(4), 5), 0);
        assert_eq!(scroll_offset(Some(5), 5), 1);
        assert_eq!(scroll_offset(Some(9), 3), 7);
        assert_eq!(scroll_offset(Some(9), 0), 0);
    }
}
