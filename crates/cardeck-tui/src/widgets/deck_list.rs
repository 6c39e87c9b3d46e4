use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Focus, Mode};

pub struct DeckListWidget;

impl DeckListWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::DeckList;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let title = if app.mode == Mode::Filter {
            format!(" Decks /{}_ ", app.filter)
        } else if app.filter.is_empty() {
            " Decks ".to_string()
        } else {
            format!(" Decks /{} ", app.filter)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let items: Vec<ListItem> = app
            .visible_rows()
            .into_iter()
            .map(|row| {
                let deck = &app.decks[row.deck];
                let line = match row.subdeck {
                    None => {
                        let marker = if deck.is_favorite { "★ " } else { "  " };
                        let count = format!(" ({})", deck.total_card_count());
                        Line::from(vec![
                            Span::styled(marker, Style::default().fg(theme.yellow)),
                            Span::styled(deck.title.clone(), Style::default().fg(theme.fg0)),
                            Span::styled(count, Style::default().fg(theme.grey1)),
                        ])
                    }
                    Some(s) => {
                        let sub = &deck.subdecks[s];
                        let count = format!(" ({})", sub.cards.len());
                        Line::from(vec![
                            Span::styled("   ▸ ", Style::default().fg(theme.grey1)),
                            Span::styled(sub.title.clone(), Style::default().fg(theme.fg0)),
                            Span::styled(count, Style::default().fg(theme.grey1)),
                        ])
                    }
                };
                ListItem::new(line)
            })
            .collect();

        let empty = items.is_empty();
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default();
        if !empty {
            state.select(Some(app.selected_row));
        }

        frame.render_stateful_widget(list, area, &mut state);
    }
}
