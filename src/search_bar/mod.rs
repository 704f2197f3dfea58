//! Expandable search field
//!
//! The widget owns the text, focus and animation state. Whether it is
//! expanded belongs to the host, which is reached through [`SearchHost`].

pub mod focus;
pub mod transition;

use ratatui::crossterm::event::{
    Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

pub use focus::FocusTimer;
pub use transition::{InputStyle, Transition};

/// Callbacks and externally owned state the search bar reports to
pub trait SearchHost {
    /// Whether the search bar is currently expanded
    fn expanded(&self) -> bool;

    /// Request a new expansion state
    fn set_expanded(&mut self, expanded: bool);

    /// Called on every change of the text, with the full current value
    fn on_search(&mut self, text: &str);

    /// Called when the user dismisses the search with the close icon
    fn on_clear(&mut self) {}

    /// Called for every key press delivered to the focused field,
    /// before the field itself handles it
    fn on_key_down(&mut self, _key: &KeyEvent) {}
}

/// Presentation settings for a search bar
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBarOptions {
    pub placeholder: Option<String>,
    /// Width of the text field when fully expanded, in cells
    pub expanded_width: u16,
    /// Delay between expanding and focusing the field
    pub focus_delay: Duration,
    /// Duration of the width/opacity animation
    pub transition: Duration,
    pub search_label: String,
    pub close_label: String,
}

impl Default for SearchBarOptions {
    fn default() -> Self {
        SearchBarOptions {
            placeholder: None,
            expanded_width: 24,
            focus_delay: Duration::from_millis(300),
            transition: Duration::from_millis(300),
            search_label: "Search".to_string(),
            close_label: "Close".to_string(),
        }
    }
}

/// Element currently under the mouse pointer
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    #[default]
    None,
    Input,
    Icon,
}

/// Screen areas of the last render, used for hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBarLayout {
    /// Input and icon together
    pub root: Rect,
    /// Text field (zero width while collapsed)
    pub input: Rect,
    /// Toggle icon
    pub icon: Rect,
}

/// Expandable search field state
#[derive(Debug)]
pub struct SearchBar {
    input: Input,
    focused: bool,
    hover: Hover,
    focus_timer: FocusTimer,
    transition: Transition,
    layout: Option<SearchBarLayout>,
    dismiss_region: Option<Rect>,
    options: SearchBarOptions,
}

impl SearchBar {
    pub fn new(options: SearchBarOptions) -> Self {
        SearchBar {
            input: Input::default(),
            focused: false,
            hover: Hover::None,
            focus_timer: FocusTimer::new(),
            transition: Transition::new(false, options.transition),
            layout: None,
            dismiss_region: None,
            options,
        }
    }

    /// Start in the given state without animating into it
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.transition = Transition::new(expanded, self.options.transition);
        self
    }

    /// Current text of the field
    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub(crate) fn input(&self) -> &Input {
        &self.input
    }

    pub fn options(&self) -> &SearchBarOptions {
        &self.options
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn hover(&self) -> Hover {
        self.hover
    }

    /// Layout of the last render; `None` until rendered or after `unmount`
    pub fn layout(&self) -> Option<SearchBarLayout> {
        self.layout
    }

    pub fn is_mounted(&self) -> bool {
        self.layout.is_some()
    }

    /// Whether a deferred focus request is waiting to fire
    pub fn focus_pending(&self) -> bool {
        self.focus_timer.is_pending()
    }

    /// Region whose clicks dismiss an empty, expanded search bar
    pub fn set_dismiss_region(&mut self, region: Option<Rect>) {
        self.dismiss_region = region;
    }

    pub fn dismiss_region(&self) -> Option<Rect> {
        self.dismiss_region
    }

    /// Style the field is heading to for the given state
    pub fn input_style(&self, expanded: bool) -> InputStyle {
        InputStyle::target(expanded, self.options.expanded_width)
    }

    /// Style actually drawn at `now`, following the animation
    pub fn rendered_style(&self, now: Instant) -> InputStyle {
        InputStyle::at(self.transition.progress(now), self.options.expanded_width)
    }

    /// Whether the animation has finished
    pub fn is_animating(&self, now: Instant) -> bool {
        !self.transition.is_settled(now)
    }

    /// Follow the host's expansion flag; clears leftovers when collapsed
    pub(crate) fn sync(&mut self, expanded: bool, now: Instant) {
        self.transition.retarget(expanded, now);
        if !expanded {
            if !self.input.value().is_empty() {
                log::debug!("Search bar collapsed with text, clearing");
                self.input.reset();
            }
            self.focused = false;
            self.hover = Hover::None;
            self.focus_timer.cancel();
        }
    }

    pub(crate) fn set_layout(&mut self, layout: SearchBarLayout) {
        self.layout = Some(layout);
    }

    /// Forget the rendered layout and any pending focus
    pub fn unmount(&mut self) {
        self.layout = None;
        self.focused = false;
        self.hover = Hover::None;
        self.focus_timer.cancel();
    }

    /// Focus the field; ignored when it is not on screen
    pub fn focus(&mut self) {
        if self.layout.is_some() {
            self.focused = true;
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Search icon: expand (and focus after a delay), or collapse and clear
    pub fn click_search_icon(&mut self, host: &mut impl SearchHost, now: Instant) {
        if host.expanded() {
            log::debug!("Search icon: collapsing");
            self.collapse(host);
        } else {
            log::debug!("Search icon: expanding");
            host.set_expanded(true);
            self.transition.retarget(true, now);
            self.focus_timer.schedule(now, self.options.focus_delay);
        }
    }

    /// Close icon: collapse, clear and notify the host
    pub fn click_close_icon(&mut self, host: &mut impl SearchHost) {
        log::debug!("Close icon: collapsing");
        self.collapse(host);
        host.on_clear();
    }

    /// Click outside the widget. Collapses an empty search bar when the
    /// click landed in the dismiss region; typed text is never discarded.
    pub fn click_away(&mut self, position: Position, host: &mut impl SearchHost) -> bool {
        if !self.input.value().is_empty() || !host.expanded() {
            return false;
        }
        let Some(region) = self.dismiss_region else {
            return false;
        };
        if !region.contains(position) {
            return false;
        }

        log::debug!("Click away at ({}, {}): collapsing", position.x, position.y);
        self.collapse(host);
        true
    }

    /// Fire a due focus request. Returns true when focus was applied.
    pub fn tick(&mut self, host: &mut impl SearchHost, now: Instant) -> bool {
        let expanded = host.expanded();
        self.sync(expanded, now);

        if !self.focus_timer.poll(now) {
            return false;
        }
        if self.layout.is_none() || !expanded {
            log::debug!("Focus request dropped: search bar not shown");
            return false;
        }
        self.focused = true;
        true
    }

    /// Route a terminal event. Returns true when the event was consumed.
    pub fn handle_event(
        &mut self,
        event: &Event,
        host: &mut impl SearchHost,
        now: Instant,
    ) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key, event, host),
            Event::Mouse(mouse) => self.handle_mouse(mouse, host, now),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, event: &Event, host: &mut impl SearchHost) -> bool {
        if !self.focused || !host.expanded() {
            return false;
        }
        if key.kind != KeyEventKind::Press {
            return true;
        }

        host.on_key_down(key);
        if let Some(changed) = self.input.handle_event(event)
            && changed.value
        {
            host.on_search(self.input.value());
        }
        true
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, host: &mut impl SearchHost, now: Instant) -> bool {
        let position = Position::new(mouse.column, mouse.row);
        let Some(layout) = self.layout else {
            return false;
        };

        match mouse.kind {
            MouseEventKind::Moved => {
                self.hover = if layout.icon.contains(position) {
                    Hover::Icon
                } else if layout.input.contains(position) {
                    Hover::Input
                } else {
                    Hover::None
                };
                false
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.icon.contains(position) {
                    if host.expanded() {
                        self.click_close_icon(host);
                    } else {
                        self.click_search_icon(host, now);
                    }
                    true
                } else if layout.input.contains(position) && host.expanded() {
                    self.focus();
                    true
                } else if layout.root.contains(position) {
                    true
                } else {
                    self.blur();
                    self.click_away(position, host);
                    false
                }
            }
            _ => false,
        }
    }

    fn collapse(&mut self, host: &mut impl SearchHost) {
        self.input.reset();
        self.focused = false;
        self.hover = Hover::None;
        self.focus_timer.cancel();
        host.set_expanded(false);
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new(SearchBarOptions::default())
    }
}
