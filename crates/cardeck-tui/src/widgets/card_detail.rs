use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, CardSide};
use crate::content::html_to_text;

pub struct CardDetailWidget;

impl CardDetailWidget {
    /// Render the opened card as a centred overlay
    pub fn render(frame: &mut Frame, app: &App) {
        let Some(card) = app.opened_card() else {
            return;
        };
        let theme = &app.theme;
        let accent = theme.deck_accent(
            app.current_deck().and_then(|d| d.theme.as_deref()),
        );

        let area = frame.area();
        let popup_width = (area.width * 7 / 10).clamp(20, area.width.saturating_sub(4));
        let popup_height = (area.height * 7 / 10).clamp(8, area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        let side = match app.detail_side {
            CardSide::Front => "front",
            CardSide::Back => "back",
        };

        let block = Block::default()
            .title(format!(" {} — {} ", card.title, side))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(popup_area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Body
                Constraint::Length(1), // Keywords
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        let html = match app.detail_side {
            CardSide::Front => &card.front_html,
            CardSide::Back => &card.back_html,
        };
        let body = Paragraph::new(html_to_text(html, chunks[0].width as usize))
            .style(Style::default().fg(theme.fg0))
            .wrap(Wrap { trim: false })
            .scroll((app.detail_scroll, 0));
        frame.render_widget(body, chunks[0]);

        if !card.keywords.is_empty() {
            let keywords = Paragraph::new(Line::from(Span::styled(
                card.keywords.join(" · "),
                Style::default().fg(accent),
            )));
            frame.render_widget(keywords, chunks[1]);
        }

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("f", Style::default().fg(theme.green).add_modifier(Modifier::BOLD)),
            Span::styled(":flip  ", Style::default().fg(theme.grey1)),
            Span::styled("j/k", Style::default().fg(theme.green).add_modifier(Modifier::BOLD)),
            Span::styled(":scroll  ", Style::default().fg(theme.grey1)),
            Span::styled("Esc", Style::default().fg(theme.green).add_modifier(Modifier::BOLD)),
            Span::styled(":close", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(hint, chunks[2]);
    }
}

/// Centre a fixed-size rect inside an area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 20, area);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (20, 10, 60, 20));
    }

    #[test]
    fn test_centered_rect_oversized() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(60, 20, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
