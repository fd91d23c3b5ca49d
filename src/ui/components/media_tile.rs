//! A single library tile: cover art above a one-line title.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
    Frame,
};
use ratatui_image::StatefulImage;

use crate::action::Action;
use crate::artwork::{ArtSlot, ArtworkCache};
use crate::icon::{Icon, IconSet};
use crate::model::Track;
use crate::ui::targets::Targets;
use crate::ui::text::single_line;
use crate::ui::theme;

/// Inputs of a tile.
#[derive(Debug, Clone, Copy)]
pub struct MediaTileProps<'a> {
    pub track: &'a Track,
    pub selected: bool,
    pub icons: IconSet,
}

/// Rows used by the artwork of a tile `width` columns wide.
///
/// Terminal cells are roughly twice as tall as they are wide, so a square
/// cover takes half as many rows as columns.
pub fn art_height(width: u16) -> u16 {
    (width / 2).clamp(2, 10)
}

/// Total rows of a tile: artwork plus the title line.
pub fn tile_height(width: u16) -> u16 {
    art_height(width) + 1
}

/// Render a tile and register it as a selection target.
pub fn render_media_tile(
    frame: &mut Frame,
    area: Rect,
    props: MediaTileProps,
    artwork: &mut ArtworkCache,
    targets: &mut Targets,
) {
    if area.height < 2 || area.width == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let protocol = props
        .track
        .cover_uri()
        .and_then(|uri| artwork.protocol_mut(uri, ArtSlot::Tile));
    match protocol {
        Some(protocol) => {
            frame.render_stateful_widget(StatefulImage::default(), chunks[0], protocol);
        }
        None => render_placeholder(frame, chunks[0], props.icons),
    }

    let title_style = if props.selected {
        Style::default()
            .fg(theme::SURFACE_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme::TEXT)
            .add_modifier(Modifier::BOLD)
    };
    let title = single_line(&props.track.title, chunks[1].width as usize);
    let title = Paragraph::new(title.into_owned())
        .style(title_style)
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    targets.push(area, Action::TileSelected(props.track.id.clone()));
}

/// Artwork stand-in used while loading, after a failure, or with no cover.
pub fn render_placeholder(frame: &mut Frame, area: Rect, icons: IconSet) {
    let block = Block::default().style(Style::default().bg(theme::PLACEHOLDER_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }
    let middle = Rect {
        y: inner.y + inner.height / 2,
        height: 1,
        ..inner
    };
    let glyph = Paragraph::new(icons.glyph(Icon::Music))
        .style(Style::default().fg(theme::TEXT_MUTED))
        .alignment(Alignment::Center);
    frame.render_widget(glyph, middle);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn draw(track: &Track, width: u16, selected: bool) -> (Terminal<TestBackend>, Targets) {
        draw_with(track, width, selected, &mut ArtworkCache::disabled())
    }

    fn draw_with(
        track: &Track,
        width: u16,
        selected: bool,
        artwork: &mut ArtworkCache,
    ) -> (Terminal<TestBackend>, Targets) {
        let height = tile_height(width);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut targets = Targets::new();
        terminal
            .draw(|frame| {
                let props = MediaTileProps {
                    track,
                    selected,
                    icons: IconSet::Unicode,
                };
                render_media_tile(frame, frame.area(), props, artwork, &mut targets);
            })
            .unwrap();
        (terminal, targets)
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_title_below_placeholder() {
        let track = Track::new("ging", "The Way of Ging");
        let (terminal, _) = draw(&track, 20, false);

        let title_row = tile_height(20) - 1;
        assert_eq!(row_text(&terminal, title_row).trim(), "The Way of Ging");

        let art: String = (0..title_row).map(|y| row_text(&terminal, y)).collect();
        assert!(art.contains('♪'));
    }

    fn assert_placeholder_with_title(terminal: &Terminal<TestBackend>, width: u16) {
        let title_row = tile_height(width) - 1;
        assert_eq!(row_text(terminal, title_row).trim(), "Electric Prince");
        let art: String = (0..title_row).map(|y| row_text(terminal, y)).collect();
        assert!(art.contains('♪'));
    }

    #[test]
    fn test_failed_cover_shows_placeholder() {
        let track = Track::new("ep", "Electric Prince").with_cover("x.png");
        let mut artwork = ArtworkCache::disabled();
        artwork.fail("x.png");
        let (terminal, targets) = draw_with(&track, 20, false, &mut artwork);
        assert_placeholder_with_title(&terminal, 20);
        assert_eq!(targets.iter().count(), 1);
    }

    #[test]
    fn test_loading_cover_shows_placeholder() {
        let track = Track::new("ep", "Electric Prince").with_cover("x.png");
        let mut artwork = ArtworkCache::disabled();
        artwork.mark_loading("x.png");
        let (terminal, _) = draw_with(&track, 20, false, &mut artwork);
        assert_placeholder_with_title(&terminal, 20);
    }

    #[test]
    fn test_long_title_truncated_to_one_line() {
        let track = Track::new("long", "A Title That Is Far Too Long For This Tile");
        let (terminal, _) = draw(&track, 12, false);

        let title_row = tile_height(12) - 1;
        let text = row_text(&terminal, title_row);
        assert!(text.contains('…'));
        assert!(text.starts_with("A Title"));
        // No other row carries title text
        for y in 0..title_row {
            assert!(!row_text(&terminal, y).contains("Title"));
        }
    }

    #[test]
    fn test_empty_title_renders_blank_label() {
        let track = Track::new("blank", "");
        let (terminal, targets) = draw(&track, 10, false);
        assert_eq!(row_text(&terminal, tile_height(10) - 1).trim(), "");
        assert_eq!(targets.iter().count(), 1);
    }

    #[test]
    fn test_registers_selection_target() {
        let track = Track::new("ging", "The Way of Ging");
        let (_, targets) = draw(&track, 16, true);
        assert_eq!(
            targets.hit(3, 1),
            Some(&Action::TileSelected(track.id.clone()))
        );
    }

    #[test]
    fn test_art_height_bounds() {
        assert_eq!(art_height(2), 2);
        assert_eq!(art_height(12), 6);
        assert_eq!(art_height(80), 10);
    }
}
