//! Item action sheet anchored to the bottom of the screen.

use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};

use super::scroll_offset;
use crate::action::Action;
use crate::icon::IconSet;
use crate::model::{ActionDescriptor, Track};
use crate::ui::targets::Targets;
use crate::ui::text::single_line;
use crate::ui::theme;

const SIDE_MARGIN: u16 = 2;
const BOTTOM_MARGIN: u16 = 1;

/// Inputs of the sheet.
#[derive(Debug, Clone, Copy)]
pub struct MediaActionsProps<'a> {
    pub track: &'a Track,
    pub actions: &'a [ActionDescriptor],
    /// Row highlighted for keyboard invocation
    pub highlighted: Option<usize>,
    pub icons: IconSet,
}

/// Area of the sheet for `rows` entries, anchored to the bottom of `screen`
/// and never reaching above `top`.
pub fn sheet_area(screen: Rect, rows: usize, top: u16) -> Rect {
    let width = screen.width.saturating_sub(SIDE_MARGIN * 2);
    let bottom = screen.bottom().saturating_sub(BOTTOM_MARGIN);
    let available = bottom.saturating_sub(top.max(screen.y));
    let wanted = (rows as u16).saturating_add(2);
    let height = wanted.min(available);
    Rect {
        x: screen.x + SIDE_MARGIN.min(screen.width / 2),
        y: bottom - height,
        width,
        height,
    }
}

/// Render the sheet over `screen`, below row `top`.
pub fn render_media_actions(
    frame: &mut Frame,
    screen: Rect,
    top: u16,
    props: MediaActionsProps,
    targets: &mut Targets,
) {
    let area = sheet_area(screen, props.actions.len(), top);
    if area.height < 3 || area.width < 8 {
        return;
    }

    frame.render_widget(Clear, area);
    let title_width = area.width.saturating_sub(4) as usize;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::TEXT_MUTED))
        .style(Style::default().bg(theme::SURFACE_BG))
        .title(Span::styled(
            format!(" {} ", single_line(&props.track.title, title_width.saturating_sub(2))),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    targets.block(area);

    let visible = inner.height as usize;
    let offset = scroll_offset(props.highlighted, visible);
    let overflow = props.actions.len() > visible;
    let row_width = if overflow {
        inner.width.saturating_sub(1)
    } else {
        inner.width
    };

    for (i, action) in props.actions.iter().enumerate().skip(offset).take(visible) {
        let row = Rect {
            x: inner.x,
            y: inner.y + (i - offset) as u16,
            width: row_width,
            height: 1,
        };
        let style = if props.highlighted == Some(i) {
            Style::default()
                .fg(theme::SURFACE_BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT)
        };
        let glyph = props.icons.glyph(action.icon);
        let label_width = (row_width as usize).saturating_sub(6);
        let line = Line::from(vec![
            Span::raw(" "),
            Span::raw(glyph),
            Span::raw("   "),
            Span::raw(single_line(&action.label, label_width).into_owned()),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), row);
        targets.push(
            row,
            Action::ItemAction(action.id.clone(), props.track.id.clone()),
        );
    }

    if overflow {
        let mut scrollbar = ScrollbarState::new(props.actions.len().saturating_sub(visible))
            .position(offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar,
        );
    }
}
