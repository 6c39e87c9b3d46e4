use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Filter => "FILTER",
            Mode::Help => "HELP",
        };

        let focus_str = match app.focus {
            Focus::DeckList => "Decks",
            Focus::Carousel => "Cards",
            Focus::Detail => "Card",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let decks = app
                .visible_rows()
                .iter()
                .filter(|row| row.subdeck.is_none())
                .count();
            format!(
                " {} | {} | Decks: {} | Cards: {}",
                mode_str,
                focus_str,
                decks,
                app.current_cards().len()
            )
        };

        let help_hint = " q:quit h/l:panels n/p:cards Enter:open ?:help ";

        let line = Line::from(vec![
            Span::styled(
                status_text.clone(),
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
            Span::styled(
                padding(area.width, &status_text, help_hint),
                Style::default().bg(theme.bg2),
            ),
            Span::styled(
                help_hint,
                Style::default().fg(theme.grey1).bg(theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Spaces between the left and right segments, measured in display
/// columns rather than bytes so non-ASCII status messages line up
fn padding(area_width: u16, left: &str, right: &str) -> String {
    let used = left.width() + right.width();
    " ".repeat((area_width as usize).saturating_sub(used))
}
