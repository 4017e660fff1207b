use ratatui::style::{Color, Modifier, Style};

/// Accent color used for titles, focus, and the price sparkline.
pub const ACCENT: Color = Color::Indexed(208);

pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn focused_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn hint_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}
