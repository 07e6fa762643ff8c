use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::styles::Theme;
use crate::app::{App, InputMode};

/// Render the commit list. Each commit takes two rows: `id subject` and a
/// dim `author, date` byline, with the selection highlighted.
pub fn render(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if area.height == 0 {
        return;
    }

    // Reserve the bottom row for the filter prompt while one is active
    let show_filter = app.input_mode == InputMode::Filter || !app.filter_query.is_empty();
    let (list_area, filter_area) = if show_filter && area.height > 1 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (rows[0], Some(rows[1]))
    } else {
        (area, None)
    };

    if app.visible_len() == 0 {
        let msg = if app.filter_query.is_empty() {
            "  no commits touch this file"
        } else {
            "  no commits match the filter"
        };
        f.render_widget(Paragraph::new(Line::styled(msg, theme.dim)), list_area);
    } else {
        let items: Vec<ListItem> = app
            .visible_commits()
            .map(|c| {
                ListItem::new(vec![
                    Line::styled(c.title(), theme.text),
                    Line::styled(format!("  {}", c.byline()), theme.dim),
                ])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(theme.selected)
            .highlight_symbol("│ ");

        let mut state = ListState::default().with_selected(Some(app.selected));
        f.render_stateful_widget(list, list_area, &mut state);
    }

    if let Some(filter_area) = filter_area {
        let cursor = if app.input_mode == InputMode::Filter {
            "▏"
        } else {
            ""
        };
        let prompt = Line::from(vec![
            Span::styled("/", theme.hint),
            Span::styled(app.filter_query.clone(), theme.text),
            Span::styled(cursor, theme.hint),
        ]);
        f.render_widget(Paragraph::new(prompt), filter_area);
    }
}
