use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};
use crate::content::html_to_text;

pub struct CardCarouselWidget;

impl CardCarouselWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();
        let is_focused = app.focus == Focus::Carousel;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let title = match app.current_location() {
            Some(location) if !app.current_cards().is_empty() => format!(
                " {} ({}/{}) ",
                location,
                app.carousel.current_real_index() + 1,
                app.current_cards().len()
            ),
            Some(location) => format!(" {} ", location),
            None => " Cards ".to_string(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // The pointer mapping in App::on_mouse works off this rect
        app.carousel_area = inner;

        let Some(deck) = app.current_deck() else {
            let hint = Paragraph::new("No deck selected")
                .style(Style::default().fg(theme.grey1))
                .alignment(Alignment::Center);
            frame.render_widget(hint, inner);
            return;
        };
        let accent = theme.deck_accent(deck.theme.as_deref());
        let cards = app.current_cards();
        if cards.is_empty() {
            let hint = Paragraph::new("No cards here")
                .style(Style::default().fg(theme.grey1))
                .alignment(Alignment::Center);
            frame.render_widget(hint, inner);
            return;
        }

        let ppc = app.px_per_cell();
        let viewport = app.viewport_width_px();

        // Paint back-to-front so overlapping faces occlude correctly
        let mut slots = app.carousel.visible_slots(viewport);
        slots.sort_by_key(|&(slot, _)| app.carousel.stack_order(slot, viewport));

        let card_width = app.config.ui.card_width_cells;
        let hovered = app.carousel.hovered();
        let centred = app.carousel.virtual_index();

        for (slot, x_px) in slots {
            let card = &cards[app.carousel.real_index(slot)];

            let left = inner.x as i32 + (x_px / ppc).round() as i32;
            let Some(rect) = clip(left, card_width, inner) else {
                continue;
            };

            let face_style = if hovered == Some(slot) {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else if slot == centred {
                Style::default().fg(accent)
            } else {
                Style::default().fg(theme.grey0)
            };

            let face = Block::default()
                .borders(Borders::ALL)
                .border_style(face_style)
                .style(Style::default().bg(theme.bg1).fg(theme.fg0));
            let body = face.inner(rect);

            frame.render_widget(Clear, rect);
            frame.render_widget(face, rect);
            render_face(frame, body, card, &theme, accent, app.config.ui.show_keywords);
        }
    }
}

/// Clip a card rect to the panel; cards sliding past the edges render
/// partially instead of disappearing
fn clip(left: i32, width: u16, inner: Rect) -> Option<Rect> {
    let right = left + width as i32;
    let clipped_left = left.max(inner.x as i32);
    let clipped_right = right.min((inner.x + inner.width) as i32);
    if clipped_right <= clipped_left {
        return None;
    }
    Some(Rect::new(
        clipped_left as u16,
        inner.y,
        (clipped_right - clipped_left) as u16,
        inner.height,
    ))
}

fn render_face(
    frame: &mut Frame,
    body: Rect,
    card: &cardeck_core::Card,
    theme: &crate::theme::Theme,
    accent: ratatui::style::Color,
    show_keywords: bool,
) {
    if body.width == 0 || body.height == 0 {
        return;
    }

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        truncate(&card.title, body.width as usize),
        Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    let preview_rows = body.height.saturating_sub(if show_keywords { 3 } else { 2 }) as usize;
    let text = html_to_text(&card.front_html, body.width as usize);
    for row in text.lines().take(preview_rows) {
        lines.push(Line::from(Span::styled(
            truncate(row, body.width as usize),
            Style::default().fg(theme.fg0),
        )));
    }

    if show_keywords && !card.keywords.is_empty() {
        // Bottom row: keyword chips in the deck accent
        while lines.len() + 1 < body.height as usize {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            truncate(&card.keywords.join(" · "), body.width as usize),
            Style::default().fg(accent),
        )));
    }

    frame.render_widget(Paragraph::new(lines), body);
}

/// Truncate a string to a display width, appending an ellipsis when cut
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 2 > max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
