//! Main application struct and event loop for the viewstack TUI.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use viewstack_core::{Navigation, NavigationError, Result, ViewStack};

use crate::catalog::build_catalog;
use crate::config::{TransitionKind, TuiConfig};
use crate::keybindings::{Action, KeyBindings};
use crate::screens::{Screen, ScreenArgs, render_view};
use crate::terminal::{StackTerminal, TerminalSession};
use crate::theme::{Theme, default_theme};
use crate::transitions::SlideTransition;

/// Number of navigation events kept for the activity line.
const ACTIVITY_CAPACITY: usize = 32;

/// Main TUI application.
pub struct App {
    pub stack: ViewStack,
    pub keybindings: KeyBindings,
    pub theme: Theme,
    pub running: bool,
    /// Message shown in the status line (errors, dropped requests).
    pub status: Option<String>,
    /// Most recent navigation events, newest last.
    activity: Rc<RefCell<VecDeque<String>>>,
    slide: Option<Rc<SlideTransition>>,
    tick_rate: Duration,
}

impl App {
    /// Builds the stack from the screen catalog and pushes the start view.
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let stack = ViewStack::with_config(Rc::new(build_catalog()), &config.stack);

        let slide = match config.transition.kind {
            TransitionKind::Slide => Some(Rc::new(SlideTransition::new(config.transition.frames))),
            TransitionKind::Instant => None,
        };
        if let Some(slide) = &slide {
            stack.set_default_transition(Some(slide.clone()));
        }

        let activity = Rc::new(RefCell::new(VecDeque::with_capacity(ACTIVITY_CAPACITY)));
        record_activity(&stack, &activity);

        let app = Self {
            stack,
            keybindings: KeyBindings::default(),
            theme: default_theme(),
            running: true,
            status: None,
            activity,
            slide,
            tick_rate: Duration::from_millis(config.tick_rate_ms),
        };

        app.stack.push(&config.start_view)?;
        Ok(app)
    }

    /// Navigation events recorded so far, oldest first.
    pub fn activity(&self) -> Vec<String> {
        self.activity.borrow().iter().cloned().collect()
    }

    /// Handles a key event.
    ///
    /// Ctrl-C always quits; everything else goes through the key bindings.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        if let Some(action) = self.keybindings.resolve(key) {
            self.execute_action(action);
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Up => self.move_selection(-1),
            Action::Down => self.move_selection(1),
            Action::Select => self.open_selected(),
            Action::Back => self.back(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if let Some(view) = self.stack.top_view() {
            view.with_behaviour::<Screen, _>(|screen| screen.move_selection(delta));
        }
    }

    /// Push the highlighted link of the top screen.
    fn open_selected(&mut self) {
        let Some(view) = self.stack.top_view() else {
            return;
        };
        let Some(target) =
            view.with_behaviour::<Screen, _>(|screen| screen.selected_target().map(str::to_string))
                .flatten()
        else {
            self.status = Some("Nothing to open here".into());
            return;
        };

        let args = ScreenArgs {
            from: self.stack.top_view_id(),
        };
        let result = self
            .stack
            .push_with_args::<Screen, _>(&target, args, None);
        self.report(result);
    }

    /// Pop the top view, keeping the root in place.
    fn back(&mut self) {
        if self.stack.len() <= 1 {
            self.status = Some("Already at the root view".into());
            return;
        }
        let result = self.stack.pop();
        self.report(result);
    }

    fn report(&mut self, result: Result<Navigation>) {
        self.status = match result {
            Ok(Navigation::Accepted) => None,
            Ok(Navigation::Dropped) => Some("Still transitioning; try again".into()),
            Err(err @ NavigationError::Uninitialized) => {
                tracing::error!(error = %err, "Navigation before initialization");
                Some(err.to_string())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Navigation failed");
                Some(err.to_string())
            }
        };
    }

    /// Advance time-driven state by one tick.
    pub fn tick(&mut self) {
        if let Some(slide) = &self.slide {
            slide.advance();
        }
    }

    /// Renders the UI to the frame.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_breadcrumbs(frame, chunks[0]);
        self.render_views(frame, chunks[1]);
        self.render_status(frame, chunks[2]);
    }

    fn render_breadcrumbs(&self, frame: &mut Frame, area: Rect) {
        let ids = self.stack.view_ids();
        let mut spans = Vec::with_capacity(ids.len() * 2);
        for (index, id) in ids.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" > ", self.theme.dim));
            }
            let style = if index + 1 == ids.len() {
                self.theme.bold
            } else {
                Style::default().fg(self.theme.fg)
            };
            spans.push(Span::styled(id.clone(), style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(self.theme.bg)),
            area,
        );
    }

    /// Draws the top view, or both views side by side while a slide runs.
    fn render_views(&self, frame: &mut Frame, area: Rect) {
        if let Some(slide) = &self.slide
            && let (Some(progress), Some((from, to))) = (slide.progress(), slide.views())
        {
            let incoming = ((progress * 100.0).round() as u16).clamp(1, 99);
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(100 - incoming),
                    Constraint::Percentage(incoming),
                ])
                .split(area);
            match from {
                Some(from) => render_view(frame, halves[0], &from, &self.theme),
                None => frame.render_widget(Block::default().borders(Borders::ALL), halves[0]),
            }
            if let Some(to) = to {
                render_view(frame, halves[1], &to, &self.theme);
            }
            return;
        }

        if let Some(view) = self.stack.top_view() {
            render_view(frame, area, &view, &self.theme);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(message) => Span::styled(message.clone(), Style::default().fg(self.theme.error)),
            None => Span::styled(
                self.activity.borrow().back().cloned().unwrap_or_default(),
                self.theme.dim,
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Runs the TUI until the user quits.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut session = TerminalSession::enter()?;

        let result = self.event_loop(session.terminal()).await;

        // Restore before reporting so errors print on the normal screen
        session.restore()?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut StackTerminal) -> io::Result<()> {
        let mut ticker = tokio::time::interval(self.tick_rate);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        while self.running {
            terminal.draw(|f| self.render(f))?;

            ticker.tick().await;

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            self.tick();
        }

        Ok(())
    }
}

/// Subscribe to the stack events shown in the activity line.
fn record_activity(stack: &ViewStack, activity: &Rc<RefCell<VecDeque<String>>>) {
    let push = {
        let activity = activity.clone();
        move |line: String| {
            let mut activity = activity.borrow_mut();
            if activity.len() == ACTIVITY_CAPACITY {
                activity.pop_front();
            }
            activity.push_back(line);
        }
    };

    let events = stack.events();
    {
        let push = push.clone();
        events.on_view_shown(move |id, _| push(format!("shown {id}")));
    }
    {
        let push = push.clone();
        events.on_view_destroyed(move |id, _| push(format!("destroyed {id}")));
    }
    events.on_transition_complete(move |from, to| {
        push(format!(
            "transition {} -> {}",
            from.unwrap_or("-"),
            to.unwrap_or("-")
        ))
    });
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::config::{DEFAULT_SLIDE_FRAMES, TransitionConfig};

    fn instant_config() -> TuiConfig {
        TuiConfig {
            transition: TransitionConfig {
                kind: TransitionKind::Instant,
                frames: 0,
            },
            ..TuiConfig::default()
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn app_starts_on_configured_view() {
        let app = App::new(&instant_config()).unwrap();
        assert!(app.running);
        assert_eq!(app.stack.top_view_id().as_deref(), Some("home"));
    }

    #[test]
    fn unknown_start_view_is_an_error() {
        let config = TuiConfig {
            start_view: "nowhere".into(),
            ..instant_config()
        };
        assert!(matches!(
            App::new(&config),
            Err(NavigationError::ViewCreation(_))
        ));
    }

    #[test]
    fn select_pushes_highlighted_link_with_args() {
        let mut app = App::new(&instant_config()).unwrap();

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.stack.view_ids(), vec!["home", "settings"]);
        let from = app
            .stack
            .top_view()
            .unwrap()
            .with_behaviour::<Screen, _>(|screen| screen.from().map(str::to_string))
            .flatten();
        assert_eq!(from.as_deref(), Some("home"));
    }

    #[test]
    fn back_pops_but_keeps_the_root() {
        let mut app = App::new(&instant_config()).unwrap();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.stack.len(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.stack.len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.stack.len(), 1);
        assert_eq!(app.status.as_deref(), Some("Already at the root view"));
    }

    #[test]
    fn returning_to_a_screen_counts_a_visit() {
        let mut app = App::new(&instant_config()).unwrap();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        let visits = app
            .stack
            .top_view()
            .unwrap()
            .with_behaviour::<Screen, _>(|screen| screen.visits());
        assert_eq!(visits, Some(2));
    }

    #[test]
    fn slide_blocks_navigation_until_finished() {
        let mut app = App::new(&TuiConfig::default()).unwrap();
        assert!(app.stack.is_transition_in_progress());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.stack.len(), 1);
        assert_eq!(
            app.status.as_deref(),
            Some("Still transitioning; try again")
        );

        for _ in 0..DEFAULT_SLIDE_FRAMES {
            app.tick();
        }
        assert!(!app.stack.is_transition_in_progress());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.stack.len(), 2);
        assert_eq!(app.status, None);
    }

    #[test]
    fn activity_records_navigation_events() {
        let mut app = App::new(&instant_config()).unwrap();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        let activity = app.activity();
        assert_eq!(activity.first().map(String::as_str), Some("transition - -> home"));
        assert_eq!(activity.last().map(String::as_str), Some("destroyed library"));
    }

    #[test]
    fn quit_key_stops_the_app() {
        let mut app = App::new(&instant_config()).unwrap();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = App::new(&instant_config()).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn render_shows_breadcrumbs_and_top_view() {
        let mut app = App::new(&instant_config()).unwrap();
        press(&mut app, KeyCode::Enter);

        let content = draw(&app);

        assert!(content.contains("home > library"));
        assert!(content.contains("Library"));
        assert!(content.contains("First entry"));
    }

    #[test]
    fn render_during_slide_shows_both_views() {
        let mut app = App::new(&TuiConfig::default()).unwrap();
        for _ in 0..DEFAULT_SLIDE_FRAMES {
            app.tick();
        }
        press(&mut app, KeyCode::Enter);
        app.tick();
        app.tick();
        app.tick();

        let content = draw(&app);

        assert!(content.contains("Home"));
        assert!(content.contains("Library"));
    }
}
