use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use cardeck_core::AppConfig;
use cardeck_tui::{
    app::{App, Focus, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{CardCarouselWidget, CardDetailWidget, DeckListWidget, HelpWidget, StatusBarWidget},
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Cardeck"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load theme from config
    let theme = load_theme(&config.ui.theme);

    // Create app state and load decks
    let mut app = App::new(config.clone(), theme)?;

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.carousel.animation_fps);

    // Track if we need high frame rate for smooth carousel animation.
    // Checked at the END of each iteration to set the NEXT iteration's rate.
    let mut needs_fast_update = false;

    let result = event_loop(&mut terminal, &mut app, &event_handler, &keymap, &mut needs_fast_update);

    // Restore terminal even when the loop errored
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    keymap: &Keymap,
    needs_fast_update: &mut bool,
) -> Result<()> {
    loop {
        // Advance the carousel animation and apply any due re-seat
        app.carousel.update(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Two-column layout: deck list + carousel
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(26), Constraint::Min(1)])
                .split(main_layout[0]);

            DeckListWidget::render(frame, columns[0], app);
            CardCarouselWidget::render(frame, columns[1], app);
            StatusBarWidget::render(frame, main_layout[1], app);

            // Overlays on top
            if app.open_card.is_some() {
                CardDetailWidget::render(frame, app);
            }
            if app.mode == Mode::Help {
                HelpWidget::render(frame, app);
            }
        })?;

        // Handle events (use the faster tick rate while animating)
        let event = if *needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    handle_action(app, action, now)?;
                }
                AppEvent::Mouse(mouse) => {
                    app.on_mouse(mouse, now);
                }
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        // Faster polling next iteration keeps the snap animation smooth
        *needs_fast_update = app.carousel.needs_update();

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Apply an input action to the application state
fn handle_action(app: &mut App, action: Action, now: Instant) -> Result<()> {
    match action {
        Action::Quit => {
            app.should_quit = true;
        }

        Action::FocusLeft => {
            app.focus = Focus::DeckList;
        }
        Action::FocusRight => {
            if app.focus == Focus::DeckList {
                app.focus = Focus::Carousel;
            }
        }

        Action::MoveDown => match app.focus {
            Focus::DeckList => app.select_next_row(),
            Focus::Detail => app.scroll_detail_down(),
            Focus::Carousel => {}
        },
        Action::MoveUp => match app.focus {
            Focus::DeckList => app.select_prev_row(),
            Focus::Detail => app.scroll_detail_up(),
            Focus::Carousel => {}
        },

        Action::NextCard => app.carousel.next(now),
        Action::PrevCard => app.carousel.prev(now),
        Action::FirstCard => app.carousel.jump_to(0, now),
        Action::LastCard => {
            let len = app.carousel.len();
            if len > 0 {
                app.carousel.jump_to(len - 1, now);
            }
        }

        Action::Select => match app.focus {
            Focus::DeckList => {
                app.focus = Focus::Carousel;
            }
            Focus::Carousel => app.open_current_card(),
            Focus::Detail => app.flip_card(),
        },
        Action::Flip => app.flip_card(),

        Action::StartFilter => {
            app.mode = Mode::Filter;
            app.focus = Focus::DeckList;
        }
        Action::InputChar(c) => {
            app.filter.push(c);
            app.filter_changed();
        }
        Action::Backspace => {
            app.filter.pop();
            app.filter_changed();
        }
        Action::Confirm => {
            app.mode = Mode::Normal;
        }
        Action::Cancel => {
            app.clear_filter();
            app.mode = Mode::Normal;
        }

        Action::Reload => {
            app.reload_decks()?;
            app.set_status(format!("Reloaded {} decks", app.decks.len()));
        }
        Action::ToggleHelp => {
            app.mode = if app.mode == Mode::Help {
                Mode::Normal
            } else {
                Mode::Help
            };
        }
        Action::ExitMode => {
            if app.mode != Mode::Normal {
                app.mode = Mode::Normal;
            } else if app.open_card.is_some() {
                app.close_card();
            } else {
                app.status_message = None;
            }
        }

        Action::None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();
        let config = Arc::new(config);
        let mut app = App::new(config, cardeck_tui::Theme::default()).unwrap();
        let mut deck = cardeck_core::Deck::new("Test");
        for i in 0..4 {
            deck.cards.push(cardeck_core::Card::new(
                format!("Card {i}"),
                "<p>q</p>",
                "<p>a</p>",
            ));
        }
        app.decks = vec![deck];
        app.filter_changed();
        (dir, app)
    }

    #[test]
    fn test_quit_action() {
        let (_dir, mut app) = test_app();
        handle_action(&mut app, Action::Quit, Instant::now()).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_next_card_moves_carousel() {
        let (_dir, mut app) = test_app();
        let now = Instant::now();
        handle_action(&mut app, Action::NextCard, now).unwrap();
        app.carousel.update(now + Duration::from_secs(1));
        assert_eq!(app.carousel.current_real_index(), 1);
    }

    #[test]
    fn test_select_opens_then_flips() {
        let (_dir, mut app) = test_app();
        app.focus = Focus::Carousel;
        let now = Instant::now();
        handle_action(&mut app, Action::Select, now).unwrap();
        assert!(app.open_card.is_some());
        assert_eq!(app.focus, Focus::Detail);
        handle_action(&mut app, Action::Select, now).unwrap();
        assert_eq!(app.detail_side, cardeck_tui::app::CardSide::Back);
    }

    #[test]
    fn test_escape_closes_card_then_clears_status() {
        let (_dir, mut app) = test_app();
        app.open_current_card();
        let now = Instant::now();
        handle_action(&mut app, Action::ExitMode, now).unwrap();
        assert!(app.open_card.is_none());
        app.set_status("hello");
        handle_action(&mut app, Action::ExitMode, now).unwrap();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_filter_flow() {
        let (_dir, mut app) = test_app();
        let now = Instant::now();
        handle_action(&mut app, Action::StartFilter, now).unwrap();
        assert_eq!(app.mode, Mode::Filter);
        handle_action(&mut app, Action::InputChar('z'), now).unwrap();
        assert!(app.current_deck().is_none());
        handle_action(&mut app, Action::Cancel, now).unwrap();
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.current_deck().is_some());
    }
}
