//! Now playing bar component.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use ratatui_image::StatefulImage;
use unicode_width::UnicodeWidthStr;

use super::media_tile::render_placeholder;
use crate::action::Action;
use crate::artwork::{ArtSlot, ArtworkCache};
use crate::icon::{Icon, IconSet};
use crate::model::PlaybackState;
use crate::ui::targets::Targets;
use crate::ui::text::single_line;
use crate::ui::theme;

/// Rows taken by the bar: border, title, subtitle, progress, border.
pub const BAR_HEIGHT: u16 = 5;

const ART_WIDTH: u16 = 6;
const CONTROL_WIDTH: u16 = 5;

/// Inputs of the bar.
#[derive(Debug, Clone, Copy)]
pub struct PlayingBarProps<'a> {
    pub state: &'a PlaybackState,
    pub icons: IconSet,
}

/// Icon of the play/pause affordance: the action a press would take.
pub fn toggle_icon(state: &PlaybackState) -> Icon {
    if state.is_playing {
        Icon::Pause
    } else {
        Icon::Play
    }
}

/// Filled cells of a progress bar `width` cells wide.
pub fn progress_cells(ratio: f64, width: u16) -> u16 {
    (ratio.clamp(0.0, 1.0) * f64::from(width)).round() as u16
}

/// Render the bar. Draws nothing and returns `false` when nothing is loaded.
pub fn render_playing_bar(
    frame: &mut Frame,
    area: Rect,
    props: PlayingBarProps,
    artwork: &mut ArtworkCache,
    targets: &mut Targets,
) -> bool {
    let Some(track) = &props.state.track else {
        return false;
    };
    if area.height < BAR_HEIGHT || area.width < ART_WIDTH + CONTROL_WIDTH + 4 {
        return false;
    }

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::SURFACE_BG))
        .style(Style::default().bg(theme::SURFACE_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    targets.block(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ART_WIDTH),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(CONTROL_WIDTH),
        ])
        .split(inner);

    // Cover art
    let protocol = track
        .cover_uri()
        .and_then(|uri| artwork.protocol_mut(uri, ArtSlot::Bar));
    match protocol {
        Some(protocol) => {
            frame.render_stateful_widget(StatefulImage::default(), columns[0], protocol);
        }
        None => render_placeholder(frame, columns[0], props.icons),
    }

    // Title, subtitle, progress
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(columns[2]);

    let info_width = rows[0].width as usize;
    let title = Paragraph::new(single_line(&track.title, info_width).into_owned()).style(
        Style::default()
            .fg(theme::TEXT)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, rows[0]);

    let subtitle = Paragraph::new(single_line(&track.subtitle(), info_width).into_owned())
        .style(Style::default().fg(theme::TEXT_MUTED));
    frame.render_widget(subtitle, rows[1]);

    render_progress(frame, rows[2], props.state);

    // Play/pause affordance
    let glyph = props.icons.glyph(toggle_icon(props.state));
    let control = Rect {
        y: columns[3].y + columns[3].height / 2,
        height: 1,
        ..columns[3]
    };
    let toggle = Paragraph::new(glyph)
        .style(Style::default().fg(theme::TEXT))
        .alignment(Alignment::Center);
    frame.render_widget(toggle, control);
    targets.push(columns[3], Action::TogglePlayback);

    true
}

/// Progress line: filled bar followed by "elapsed / total".
fn render_progress(frame: &mut Frame, area: Rect, state: &PlaybackState) {
    let time = format!(
        " {} / {}",
        state.elapsed_string(),
        state.duration_string()
    );
    let time_width = time.width() as u16;
    let (bar_width, show_time) = if area.width > time_width + 4 {
        (area.width - time_width, true)
    } else {
        (area.width, false)
    };

    let filled = progress_cells(state.progress(), bar_width);
    let mut spans = vec![
        Span::styled(
            "━".repeat(filled as usize),
            Style::default().fg(theme::TEXT),
        ),
        Span::styled(
            "─".repeat((bar_width - filled) as usize),
            Style::default().fg(theme::TEXT_MUTED),
        ),
    ];
    if show_time {
        spans.push(Span::styled(time, Style::default().fg(theme::TEXT_MUTED)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
