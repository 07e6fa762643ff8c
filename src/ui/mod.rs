mod diff_view;
pub mod layout;
mod list_view;
pub mod styles;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};
use styles::Theme;

/// Render the entire UI. A surfaced error replaces all normal content until
/// the next successful fetch clears it.
pub fn draw(f: &mut Frame, app: &App, theme: &Theme) {
    if let Some(err) = &app.last_error {
        // J/K only work in Diff mode, so don't advertise them from the list
        let hint = match app.mode {
            Mode::List => "j/k move · Enter retry · q quit",
            Mode::Diff => "J/K try another commit · q back",
        };
        let lines = vec![
            Line::styled(format!("Error: {err}"), theme.error),
            Line::from(""),
            Line::styled(hint, theme.hint),
        ];
        f.render_widget(Paragraph::new(lines), f.area());
        return;
    }

    match app.mode {
        Mode::List => list_view::render(f, f.area(), app, theme),
        Mode::Diff => {
            // Row heights come from the layout engine, not from the raw
            // frame size — both sub-views are pure consumers of it
            let l = app.layout;
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(l.header),
                    Constraint::Length(l.viewport),
                    Constraint::Length(l.footer),
                    Constraint::Length(l.list),
                ])
                .split(f.area());

            diff_view::render_header(f, rows[0], app, theme);
            diff_view::render_viewport(f, rows[1], app, theme);
            diff_view::render_footer(f, rows[2], app, theme);
            list_view::render(f, rows[3], app, theme);
        }
    }
}
