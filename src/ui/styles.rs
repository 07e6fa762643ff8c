use ratatui::style::{Color, Modifier, Style};

/// Immutable chrome styling, built once in `main` and passed by reference
/// into the renderer. No mutable style singleton anywhere.
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Style,
    pub dim: Style,
    pub title: Style,
    pub rule: Style,
    pub selected: Style,
    pub error: Style,
    pub hint: Style,
    pub percent: Style,
}

impl Default for Theme {
    fn default() -> Self {
        const DIM: Color = Color::Rgb(102, 102, 102);
        const BRIGHT: Color = Color::Rgb(232, 232, 232);
        const BLUE: Color = Color::Rgb(96, 165, 250);
        const RED: Color = Color::Rgb(248, 113, 113);
        const MUTED: Color = Color::Rgb(136, 136, 136);

        Self {
            text: Style::default().fg(Color::Rgb(200, 200, 200)),
            dim: Style::default().fg(DIM),
            title: Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
            rule: Style::default().fg(DIM),
            selected: Style::default()
                .fg(BLUE)
                .bg(Color::Rgb(26, 42, 58))
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(RED).add_modifier(Modifier::BOLD),
            hint: Style::default().fg(MUTED),
            percent: Style::default().fg(BRIGHT),
        }
    }
}
