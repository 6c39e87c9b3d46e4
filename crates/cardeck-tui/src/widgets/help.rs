use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use cardeck_core::config::KeymapConfig;

use crate::app::App;

pub struct HelpWidget;

impl HelpWidget {
    /// Render the key binding overlay
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keymap = &app.config.keymap;

        let rows = bindings(keymap);
        let area = frame.area();
        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (rows.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered(popup_width, popup_height, area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(popup_area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(block, popup_area);

        let mut lines = vec![Line::default()];
        for (key, what) in rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:>8}  ", key),
                    Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
                ),
                Span::styled(what, Style::default().fg(theme.fg0)),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "press any key to close",
            Style::default().fg(theme.grey1),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn bindings(keymap: &KeymapConfig) -> Vec<(String, &'static str)> {
    vec![
        (keymap.quit.clone(), "quit"),
        (keymap.focus_left.clone(), "focus deck list"),
        (keymap.focus_right.clone(), "focus cards"),
        (format!("{}/{}", keymap.move_down, keymap.move_up), "move / scroll"),
        (format!("{}/{}", keymap.next_card, keymap.prev_card), "next / previous card"),
        (format!("{}/{}", keymap.first_card, keymap.last_card), "first / last card"),
        (keymap.select.clone(), "open card"),
        (keymap.flip.clone(), "flip opened card"),
        (keymap.filter.clone(), "filter decks"),
        (keymap.reload.clone(), "reload decks"),
    ]
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
