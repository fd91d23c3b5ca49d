//! Page header: screen title on the left, global actions on the right.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::action::Action;
use crate::config::HeaderAction;
use crate::icon::IconSet;
use crate::ui::targets::Targets;
use crate::ui::text::single_line;
use crate::ui::theme;

/// Rows taken by the header.
pub const HEADER_HEIGHT: u16 = 3;

const PADDING_LEFT: u16 = 2;
const PADDING_RIGHT: u16 = 3;
const ACTION_GAP: u16 = 3;

/// Inputs of the header.
#[derive(Debug, Clone, Copy)]
pub struct PageHeaderProps<'a> {
    pub title: &'a str,
    pub actions: &'a [HeaderAction],
    pub icons: IconSet,
}

/// Render the header. Actions keep their space; only the title shrinks.
pub fn render_page_header(
    frame: &mut Frame,
    area: Rect,
    props: PageHeaderProps,
    targets: &mut Targets,
) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::HEADER_BG)),
        area,
    );
    if area.height == 0 {
        return;
    }

    let row_y = area.y + area.height.min(HEADER_HEIGHT) / 2;
    let glyph_widths: Vec<u16> = props
        .actions
        .iter()
        .map(|a| props.icons.glyph(a.icon).width() as u16)
        .collect();
    let actions_width = glyph_widths.iter().sum::<u16>()
        + ACTION_GAP * (glyph_widths.len().saturating_sub(1) as u16);

    let right_edge = area.right().saturating_sub(PADDING_RIGHT);
    let mut x = right_edge.saturating_sub(actions_width).max(area.x);
    for (action, width) in props.actions.iter().zip(&glyph_widths) {
        if x + width > area.right() {
            break;
        }
        let icon_area = Rect::new(x, row_y, *width, 1);
        let glyph = Paragraph::new(props.icons.glyph(action.icon))
            .style(Style::default().fg(theme::TEXT).bg(theme::HEADER_BG));
        frame.render_widget(glyph, icon_area);
        // A little slack around the glyph makes it easier to hit.
        let hit_area = Rect::new(x.saturating_sub(1), area.y, width + 2, area.height)
            .intersection(area);
        targets.push(hit_area, Action::GlobalAction(action.id.clone()));
        x += width + ACTION_GAP;
    }

    let title_x = area.x + PADDING_LEFT;
    let actions_start = right_edge.saturating_sub(actions_width);
    let title_width = actions_start.saturating_sub(title_x + 1);
    if title_width > 0 {
        let title = single_line(props.title, title_width as usize);
        let title = Paragraph::new(title.into_owned()).style(
            Style::default()
                .fg(theme::TEXT)
                .bg(theme::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(title, Rect::new(title_x, row_y, title_width, 1));
    }
}
