//! Library screen: header, tile grid and the floating now playing bar.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Block,
    Frame,
};

use super::media_grid::{render_media_grid, MediaGridProps};
use super::page_header::{render_page_header, PageHeaderProps, HEADER_HEIGHT};
use super::playing_bar::{render_playing_bar, PlayingBarProps, BAR_HEIGHT};
use crate::artwork::ArtworkCache;
use crate::config::HeaderAction;
use crate::icon::IconSet;
use crate::model::{LibraryCollection, PlaybackState};
use crate::ui::targets::Targets;
use crate::ui::theme;

const BAR_SIDE_MARGIN: u16 = 2;
const BAR_BOTTOM_MARGIN: u16 = 1;

/// Inputs of the library screen.
#[derive(Debug, Clone, Copy)]
pub struct LibraryViewProps<'a> {
    pub title: &'a str,
    pub header_actions: &'a [HeaderAction],
    pub collection: &'a LibraryCollection,
    pub columns: usize,
    pub selected: Option<usize>,
    pub playback: &'a PlaybackState,
    pub icons: IconSet,
}

/// Where the playing bar floats inside the content area, if it fits.
pub fn bar_area(content: Rect) -> Option<Rect> {
    let needed = BAR_HEIGHT + BAR_BOTTOM_MARGIN + 1;
    if content.height < needed || content.width <= BAR_SIDE_MARGIN * 2 {
        return None;
    }
    Some(Rect {
        x: content.x + BAR_SIDE_MARGIN,
        y: content.bottom() - BAR_BOTTOM_MARGIN - BAR_HEIGHT,
        width: content.width - BAR_SIDE_MARGIN * 2,
        height: BAR_HEIGHT,
    })
}

/// Render the library screen into `area`.
pub fn render_library_view(
    frame: &mut Frame,
    area: Rect,
    props: LibraryViewProps,
    artwork: &mut ArtworkCache,
    targets: &mut Targets,
) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::SCREEN_BG)),
        area,
    );

    let header_height = HEADER_HEIGHT.min(area.height);
    let header = Rect {
        height: header_height,
        ..area
    };
    let content = Rect {
        y: area.y + header_height,
        height: area.height - header_height,
        ..area
    };

    render_page_header(
        frame,
        header,
        PageHeaderProps {
            title: props.title,
            actions: props.header_actions,
            icons: props.icons,
        },
        targets,
    );

    let bar = props
        .playback
        .track
        .as_ref()
        .and_then(|_| bar_area(content));
    let bottom_inset = if bar.is_some() {
        BAR_HEIGHT + BAR_BOTTOM_MARGIN
    } else {
        0
    };

    render_media_grid(
        frame,
        content,
        MediaGridProps {
            collection: props.collection,
            columns: props.columns,
            selected: props.selected,
            bottom_inset,
            icons: props.icons,
        },
        artwork,
        targets,
    );

    // Drawn last so it floats over the grid
    if let Some(bar) = bar {
        render_playing_bar(
            frame,
            bar,
            PlayingBarProps {
                state: props.playback,
                icons: props.icons,
            },
            artwork,
            targets,
        );
    }
}
