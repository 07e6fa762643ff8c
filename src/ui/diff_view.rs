use ansi_to_tui::IntoText;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use super::styles::Theme;
use crate::app::App;

/// Title bar above the viewport: `┤ path ├` flush left, rule fill to the edge.
pub fn render_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let title = format!("┤ {} ├", app.path);
    let fill = (area.width as usize).saturating_sub(title.chars().count());
    let line = Line::from(vec![
        Span::styled(title, theme.title),
        Span::styled("─".repeat(fill), theme.rule),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// The scrollable diff viewport. The diff text arrives pre-colorized with
/// ANSI escapes; conversion failure degrades to plain uncolored lines.
pub fn render_viewport(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let raw = app.diff.as_deref().unwrap_or("");
    let text = match raw.as_bytes().to_vec().into_text() {
        Ok(text) => text,
        Err(_) => Text::from(
            raw.lines()
                .map(|l| Line::styled(l.to_string(), theme.text))
                .collect::<Vec<_>>(),
        ),
    };
    f.render_widget(Paragraph::new(text).scroll((app.scroll, 0)), area);
}

/// Scroll-percentage bar below the viewport: rule fill, `┤ 42% ├` flush right.
pub fn render_footer(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let info = format!("┤ {:>3.0}% ├", app.scroll_percent() * 100.0);
    let fill = (area.width as usize).saturating_sub(info.chars().count());
    let line = Line::from(vec![
        Span::styled("─".repeat(fill), theme.rule),
        Span::styled(info, theme.percent),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
