//! Library grid: tiles laid out row-major across a fixed number of columns.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use super::media_tile::{render_media_tile, tile_height, MediaTileProps};
use super::scroll_offset;
use crate::artwork::ArtworkCache;
use crate::icon::IconSet;
use crate::model::LibraryCollection;
use crate::ui::targets::Targets;
use crate::ui::theme;

const COLUMN_GAP: u16 = 2;
const ROW_GAP: u16 = 1;
/// Narrowest tile that still shows a glyph and a clipped title.
const MIN_TILE_WIDTH: u16 = 4;

/// Inputs of the grid.
#[derive(Debug, Clone, Copy)]
pub struct MediaGridProps<'a> {
    pub collection: &'a LibraryCollection,
    pub columns: usize,
    /// Index of the selected track in the collection
    pub selected: Option<usize>,
    /// Rows at the bottom hidden behind a floating overlay
    pub bottom_inset: u16,
    pub icons: IconSet,
}

/// Split `len` items into `columns` columns, row-major: item `i` goes to
/// column `i % columns`. Each column lists collection indices in order.
pub fn partition(len: usize, columns: usize) -> Vec<Vec<usize>> {
    let columns = columns.max(1);
    let mut out = vec![Vec::with_capacity(len.div_ceil(columns)); columns];
    for i in 0..len {
        out[i % columns].push(i);
    }
    out
}

/// Columns and gap that fit `width` cells when `columns` are requested.
///
/// The gap collapses first; if the tiles still do not fit, the column count
/// drops to as many minimum-width tiles as the width holds.
pub fn fit_columns(width: u16, columns: usize) -> (usize, u16) {
    let columns = columns.max(1);
    let needed = |gap: u16| {
        let columns = columns as u64;
        let tiles = columns.saturating_mul(u64::from(MIN_TILE_WIDTH));
        tiles.saturating_add((columns - 1).saturating_mul(u64::from(gap)))
    };
    if needed(COLUMN_GAP) <= u64::from(width) {
        (columns, COLUMN_GAP)
    } else if needed(0) <= u64::from(width) {
        (columns, 0)
    } else {
        ((width / MIN_TILE_WIDTH).max(1) as usize, 0)
    }
}

/// Columns the grid actually lays out inside an area `width` cells wide.
pub fn grid_columns(width: u16, columns: usize) -> usize {
    fit_columns(width.saturating_sub(2), columns).0
}

/// Number of rows needed for `len` items.
pub fn row_count(len: usize, columns: usize) -> usize {
    len.div_ceil(columns.max(1))
}

/// Render the grid and register every drawn tile as a target.
pub fn render_media_grid(
    frame: &mut Frame,
    area: Rect,
    props: MediaGridProps,
    artwork: &mut ArtworkCache,
    targets: &mut Targets,
) {
    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(1),
    };
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if props.collection.is_empty() {
        let hint = Paragraph::new("No tracks")
            .style(Style::default().fg(theme::TEXT_MUTED))
            .alignment(Alignment::Center);
        frame.render_widget(hint, Rect { height: 1, ..inner });
        return;
    }

    let (columns, gap) = fit_columns(inner.width, props.columns);
    let column_areas = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
        .spacing(gap)
        .split(inner);
    let column_width = column_areas.iter().map(|c| c.width).min().unwrap_or(0);
    let tile_h = tile_height(column_width);
    let row_h = tile_h + ROW_GAP;

    let usable = inner.height.saturating_sub(props.bottom_inset).max(tile_h);
    let visible_rows = (usable / row_h).max(1) as usize;
    let first_row = scroll_offset(props.selected.map(|i| i / columns), visible_rows);

    let rows = row_count(props.collection.len(), columns);
    let last_row = rows.min(first_row + visible_rows + 1);
    let layout = partition(props.collection.len(), columns);
    for (column_area, indices) in column_areas.iter().zip(&layout) {
        for (row, &index) in indices.iter().enumerate().take(last_row).skip(first_row) {
            let y = inner.y + ((row - first_row) as u16) * row_h;
            if y + tile_h > inner.bottom() {
                break;
            }
            let Some(track) = props.collection.get(index) else {
                break;
            };
            let tile_area = Rect {
                x: column_area.x,
                y,
                width: column_area.width,
                height: tile_h,
            };
            let tile = MediaTileProps {
                track,
                selected: props.selected == Some(index),
                icons: props.icons,
            };
            render_media_tile(frame, tile_area, tile, artwork, targets);
        }
    }
}
