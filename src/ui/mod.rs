//! Main UI layout and rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

pub mod components;
pub mod targets;
pub mod text;
pub mod theme;

pub use components::*;

/// Render the entire UI and collect this frame's click targets.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.targets.clear();

    let grid_columns = components::media_grid::grid_columns(area.width, app.columns);
    if grid_columns != app.grid_columns {
        if grid_columns < app.columns {
            tracing::warn!(
                "{} columns do not fit {} cells, showing {}",
                app.columns,
                area.width,
                grid_columns
            );
        }
        app.grid_columns = grid_columns;
    }

    let props = LibraryViewProps {
        title: &app.title,
        header_actions: &app.header_actions,
        collection: &app.collection,
        columns: app.columns,
        selected: app.selected,
        playback: app.store.snapshot(),
        icons: app.icons,
    };
    render_library_view(frame, area, props, &mut app.artwork, &mut app.targets);

    // Render item action sheet if open
    if let Some(sheet) = &app.sheet {
        if let Some(track) = app.collection.find(&sheet.track) {
            let props = MediaActionsProps {
                track,
                actions: &app.item_actions,
                highlighted: Some(sheet.highlighted),
                icons: app.icons,
            };
            render_media_actions(frame, area, area.y + HEADER_HEIGHT, props, &mut app.targets);
        }
    }

    // Render transient status on the bottom row
    if let Some(status) = app.status_text() {
        let line = Rect {
            y: area.bottom().saturating_sub(1),
            height: area.height.min(1),
            ..area
        };
        let status = text::single_line(status, line.width.saturating_sub(2) as usize);
        frame.render_widget(
            Paragraph::new(format!(" {status}")).style(Style::default().fg(theme::TEXT_MUTED)),
            line,
        );
    }

    // Render help overlay if active
    if app.show_help {
        render_help(frame, area);
    }

    // Render error message if present
    if let Some(error) = &app.error_message {
        render_error(frame, area, error);
    }
}

/// Render the help overlay.
fn render_help(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Library"),
        Line::from("  h/j/k/l or arrows  Move between tiles"),
        Line::from("  g/G                First/last tile"),
        Line::from("  Enter              Play selected tile"),
        Line::from("  m                  Actions for selected tile"),
        Line::from(""),
        heading("Playback"),
        Line::from("  Space              Play/Pause"),
        Line::from("  , / .              Seek -/+10s"),
        Line::from("  s                  Stop"),
        Line::from(""),
        heading("Header"),
        Line::from("  a                  Add"),
        Line::from("  /                  Search"),
        Line::from(""),
        heading("Action sheet"),
        Line::from("  j/k or arrows      Move"),
        Line::from("  Enter              Run action"),
        Line::from("  Esc                Close"),
        Line::from(""),
        heading("Other"),
        Line::from("  ?                  Show this help"),
        Line::from("  x                  Clear error message"),
        Line::from("  q                  Quit"),
        Line::from(""),
        heading("Mouse"),
        Line::from("  Click tile         Play tile"),
        Line::from("  Click icon         Run header action / play-pause"),
        Line::from("  Scroll             Move selection"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help")
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

/// Render an error message overlay.
fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let popup_area = centered_rect(60, 20, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Error")
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Red))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
