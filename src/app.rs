use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::{Block, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::logging::FlashMessage;
use crate::models::ResultsView;
use crate::search_bar::{SearchBar, SearchHost};
use crate::storage::Config;
use crate::ui::{self, HintMode, SearchBarTheme, Theme};

/// Frame interval; short enough for the expand animation to look smooth
const TICK_RATE: Duration = Duration::from_millis(16);

/// Demo application: a results list with the search bar docked in its header
pub struct App {
    pub search_bar: SearchBar,

    /// Rows and the search bar's expanded flag
    pub results: ResultsView,

    pub config: Config,

    theme: Theme,

    /// Overrides derived from `theme`, only handed to the search bar
    search_theme: SearchBarTheme,

    results_state: ListState,

    /// Results panel area of the last frame, for row clicks
    results_area: Rect,

    /// Startup error message (shown in modal, dismissible with any key)
    pub startup_error: Option<String>,

    pub flash_messages: Vec<FlashMessage>,

    flash_rx: Option<Receiver<FlashMessage>>,

    pub should_quit: bool,
}

impl App {
    pub fn new(items: Vec<String>, config: Config, flash_rx: Option<Receiver<FlashMessage>>) -> Self {
        let (theme, startup_error) = match Theme::load(&config.general.theme) {
            Ok(t) => (t, None),
            Err(e) => {
                log::error!("Failed to load theme '{}': {}", config.general.theme, e);
                (Theme::default(), Some(e.to_string()))
            }
        };
        let search_theme = SearchBarTheme::derive(&theme);

        let expanded = config.search_bar.start_expanded;
        let search_bar = SearchBar::new(config.search_bar.to_options()).with_expanded(expanded);

        App {
            search_bar,
            results: ResultsView::new(items, expanded),
            config,
            theme,
            search_theme,
            results_state: ListState::default(),
            results_area: Rect::default(),
            startup_error,
            flash_messages: Vec::new(),
            flash_rx,
            should_quit: false,
        }
    }

    /// Main event loop
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame, Instant::now()))?;

            if event::poll(TICK_RATE)? {
                let event = event::read()?;
                self.handle_event(&event, Instant::now());
            }
            self.tick(Instant::now());

            if self.should_quit {
                self.search_bar.unmount();
                return Ok(());
            }
        }
    }

    /// Timers and message queues; called once per loop iteration
    pub fn tick(&mut self, now: Instant) {
        if self.search_bar.tick(&mut self.results, now) {
            log::debug!("Search field focused");
        }
        self.poll_flash_messages();
        self.prune_flash_messages(now);
        if self.results.picked.is_some() {
            self.should_quit = true;
        }
    }

    /// Poll flash message receiver and add to queue
    pub fn poll_flash_messages(&mut self) {
        if let Some(rx) = &self.flash_rx {
            while let Ok(msg) = rx.try_recv() {
                self.flash_messages.push(msg);
            }
        }
    }

    /// Remove expired flash messages (based on config duration)
    pub fn prune_flash_messages(&mut self, now: Instant) {
        let ttl = Duration::from_millis(self.config.general.flash_message_duration_ms);
        self.flash_messages.retain(|msg| !msg.is_expired(now, ttl));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // If there's a startup error modal, any key dismisses it
                if self.startup_error.take().is_some() {
                    return;
                }
                if self.search_bar.is_focused() {
                    if key.code == KeyCode::Esc {
                        self.search_bar.blur();
                    } else {
                        self.search_bar.handle_event(event, &mut self.results, now);
                    }
                    return;
                }
                // Expanded but not focused yet: keys would land in the list
                if self.results.expanded() && self.search_bar.focus_pending() {
                    if key.code == KeyCode::Esc {
                        self.search_bar.click_close_icon(&mut self.results);
                    }
                    return;
                }
                self.handle_browse_key(key, now);
            }
            Event::Mouse(mouse) => {
                if self.startup_error.is_some() {
                    return;
                }
                if self.search_bar.handle_event(event, &mut self.results, now) {
                    return;
                }
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    self.click_results(Position::new(mouse.column, mouse.row));
                }
            }
            _ => {}
        }
    }

    /// Keys while the search field does not have focus
    fn handle_browse_key(&mut self, key: &KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('/') => self.search_bar.click_search_icon(&mut self.results, now),
            KeyCode::Esc if self.results.expanded() => {
                self.search_bar.click_close_icon(&mut self.results)
            }
            KeyCode::Char('j') | KeyCode::Down => self.results.move_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.results.move_up(1),
            KeyCode::Enter => {
                self.results.pick();
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.results.toggle_search_mode()
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    /// Select the clicked row of the results panel
    fn click_results(&mut self, position: Position) {
        // Rows start inside the border
        let inner = Rect {
            x: self.results_area.x + 1,
            y: self.results_area.y + 1,
            width: self.results_area.width.saturating_sub(2),
            height: self.results_area.height.saturating_sub(2),
        };
        if !inner.contains(position) {
            return;
        }
        let row = (position.y - inner.y) as usize;
        self.results.select_visible(self.results_state.offset() + row);
    }

    fn hint_mode(&self) -> HintMode {
        if self.search_bar.is_focused() {
            HintMode::Typing
        } else if self.results.expanded() {
            HintMode::Expanded
        } else {
            HintMode::Browse
        }
    }

    /// Render the TUI
    pub fn draw(&mut self, frame: &mut Frame, now: Instant) {
        let size = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(self.theme.default_bg)),
            size,
        );

        let search_width = self
            .config
            .search_bar
            .expanded_width
            .saturating_add(ui::tooltip::ICON_WIDTH);
        let layout = ui::create_main_layout(size, search_width);

        frame.render_widget(
            Paragraph::new(" searchbar").style(self.theme.header_title),
            layout.title,
        );

        // Results before the search bar so its tooltip stays on top
        let items = self.results.visible_items();
        self.results_state.select(if items.is_empty() {
            None
        } else {
            Some(self.results.selected())
        });
        ui::render_results(
            frame,
            layout.results,
            ui::ResultsRenderContext {
                items: &items,
                total: self.results.total(),
                query: self.results.query(),
                theme: &self.theme,
            },
            &mut self.results_state,
        );
        self.results_area = layout.results;

        let dismiss_region = self
            .config
            .search_bar
            .anchor_to_results
            .then_some(layout.results);
        self.search_bar.set_dismiss_region(dismiss_region);
        ui::render_search_bar(
            frame,
            layout.search,
            &mut self.search_bar,
            self.results.expanded(),
            &self.search_theme,
            now,
        );

        ui::render_keyboard_hints(
            frame,
            layout.hints,
            self.hint_mode(),
            self.flash_messages.last(),
            &self.theme,
        );

        if let Some(ref error_msg) = self.startup_error {
            ui::render_error_modal(frame, size, error_msg, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::MouseEvent;

    fn app() -> App {
        let items = ["alpha", "beta", "gamma", "delta"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        App::new(items, Config::default(), None)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn draw(app: &mut App, terminal: &mut Terminal<TestBackend>, now: Instant) {
        terminal.draw(|frame| app.draw(frame, now)).unwrap();
    }

    #[test]
    fn test_slash_expands_and_focuses_after_delay() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let start = Instant::now();
        draw(&mut app, &mut terminal, start);

        app.handle_event(&key(KeyCode::Char('/')), start);
        assert!(app.results.expanded());
        assert!(!app.search_bar.is_focused());

        app.tick(start + Duration::from_millis(300));
        assert!(app.search_bar.is_focused());
    }

    #[test]
    fn test_typing_filters_results() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let start = Instant::now();
        draw(&mut app, &mut terminal, start);
        app.handle_event(&key(KeyCode::Char('/')), start);
        app.tick(start + Duration::from_millis(300));

        for c in "ta".chars() {
            app.handle_event(&key(KeyCode::Char(c)), start + Duration::from_millis(400));
        }
        assert_eq!(app.search_bar.value(), "ta");
        assert_eq!(app.results.query(), "ta");
        assert!(app.results.visible_items().contains(&"beta"));
        assert!(!app.results.visible_items().contains(&"alpha"));
        // Letters typed into the field never reach the browse keys
        assert!(!app.should_quit);
    }

    #[test]
    fn test_results_click_dismisses_empty_search() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let start = Instant::now();
        draw(&mut app, &mut terminal, start);
        app.handle_event(&key(KeyCode::Char('/')), start);
        draw(&mut app, &mut terminal, start + Duration::from_millis(300));

        app.handle_event(&click(5, 4), start + Duration::from_millis(400));
        assert!(!app.results.expanded());
        assert_eq!(app.results.selected(), 1);
    }

    #[test]
    fn test_results_click_keeps_typed_search() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let start = Instant::now();
        draw(&mut app, &mut terminal, start);
        app.handle_event(&key(KeyCode::Char('/')), start);
        app.tick(start + Duration::from_millis(300));
        app.handle_event(&key(KeyCode::Char('a')), start + Duration::from_millis(350));
        draw(&mut app, &mut terminal, start + Duration::from_millis(400));

        app.handle_event(&click(5, 4), start + Duration::from_millis(500));
        assert!(app.results.expanded());
        assert_eq!(app.search_bar.value(), "a");
        assert!(!app.search_bar.is_focused());
    }

    #[test]
    fn test_escape_blurs_then_closes() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let start = Instant::now();
        draw(&mut app, &mut terminal, start);
        app.handle_event(&key(KeyCode::Char('/')), start);
        app.tick(start + Duration::from_millis(300));
        app.handle_event(&key(KeyCode::Char('z')), start + Duration::from_millis(350));

        app.handle_event(&key(KeyCode::Esc), start + Duration::from_millis(400));
        assert!(!app.search_bar.is_focused());
        assert!(app.results.expanded());

        app.handle_event(&key(KeyCode::Esc), start + Duration::from_millis(450));
        assert!(!app.results.expanded());
        assert_eq!(app.search_bar.value(), "");
        assert_eq!(app.results.query(), "");
    }

    #[test]
    fn test_enter_while_typing_picks_and_quits() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let start = Instant::now();
        draw(&mut app, &mut terminal, start);
        app.handle_event(&key(KeyCode::Char('/')), start);
        app.tick(start + Duration::from_millis(300));
        app.handle_event(&key(KeyCode::Char('g')), start + Duration::from_millis(350));

        app.handle_event(&key(KeyCode::Enter), start + Duration::from_millis(400));
        app.tick(start + Duration::from_millis(410));
        assert_eq!(app.results.picked.as_deref(), Some("gamma"));
        assert!(app.should_quit);
    }

    #[test]
    fn test_unknown_theme_shows_error_and_key_dismisses() {
        let mut config = Config::default();
        config.general.theme = "no-such-theme".to_string();
        let mut app = App::new(vec!["x".to_string()], config, None);
        assert!(app.startup_error.is_some());

        app.handle_event(&key(KeyCode::Char('q')), Instant::now());
        assert!(app.startup_error.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_start_expanded_renders_full_width() {
        let mut config = Config::default();
        config.search_bar.start_expanded = true;
        let mut app = App::new(vec!["x".to_string()], config, None);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        draw(&mut app, &mut terminal, Instant::now());
        let layout = app.search_bar.layout().unwrap();
        assert_eq!(layout.input.width, 24);
    }

    #[test]
    fn test_keys_before_focus_are_dropped() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let start = Instant::now();
        draw(&mut app, &mut terminal, start);

        app.handle_event(&key(KeyCode::Char('/')), start);
        app.tick(start + Duration::from_millis(50));
        app.handle_event(&key(KeyCode::Char('q')), start + Duration::from_millis(80));
        app.handle_event(&key(KeyCode::Char('j')), start + Duration::from_millis(90));
        app.handle_event(&key(KeyCode::Enter), start + Duration::from_millis(100));
        app.tick(start + Duration::from_millis(110));

        assert!(!app.should_quit);
        assert_eq!(app.results.picked, None);
        assert_eq!(app.results.selected(), 0);
        assert!(app.results.expanded());
        assert_eq!(app.search_bar.value(), "");

        app.tick(start + Duration::from_millis(300));
        assert!(app.search_bar.is_focused());
    }

    #[test]
    fn test_escape_before_focus_closes() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let start = Instant::now();
        draw(&mut app, &mut terminal, start);

        app.handle_event(&key(KeyCode::Char('/')), start);
        app.handle_event(&key(KeyCode::Esc), start + Duration::from_millis(50));
        assert!(!app.results.expanded());
        assert!(!app.search_bar.focus_pending());

        app.tick(start + Duration::from_millis(300));
        assert!(!app.search_bar.is_focused());
    }

    #[test]
    fn test_huge_expanded_width_still_draws() {
        let mut config = Config::default();
        config.search_bar.expanded_width = u16::MAX;
        config.search_bar.start_expanded = true;
        let mut app = App::new(vec!["x".to_string()], config, None);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        draw(&mut app, &mut terminal, Instant::now());
        let layout = app.search_bar.layout().unwrap();
        assert!(layout.root.right() <= 80);
    }

    #[test]
    fn test_mouse_ignored_under_error_modal() {
        let mut config = Config::default();
        config.general.theme = "no-such-theme".to_string();
        let mut app = App::new(vec!["x".to_string()], config, None);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        draw(&mut app, &mut terminal, Instant::now());

        // Search icon sits at the right edge of the header
        app.handle_event(&click(78, 0), Instant::now());
        assert!(!app.results.expanded());
        assert!(app.startup_error.is_some());
    }

    #[test]
    fn test_ctrl_t_toggles_case_sensitivity() {
        let mut app = app();
        app.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL)),
            Instant::now(),
        );
        assert_eq!(app.results.search_mode(), crate::models::SearchMode::CaseSensitive);
    }
}
