use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Duration;
use tracing::debug;
use trailmap_core::{Walker, WalkerState};

/// Actions the event loop should take after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Interactive walk viewer state
pub struct App {
    /// Display name of the map
    pub name: String,
    /// Walk in progress
    pub state: WalkerState,
    /// Snapshot used by restart
    initial: WalkerState,
    walker: Walker,
    /// Current theme
    pub theme: Theme,
    /// Whether auto-stepping is suspended
    pub paused: bool,
    step_delay: Duration,
}

impl App {
    pub fn new(
        name: String,
        state: WalkerState,
        walker: Walker,
        theme: Theme,
        step_delay: Duration,
    ) -> Self {
        Self {
            name,
            initial: state.clone(),
            state,
            walker,
            theme,
            paused: false,
            step_delay,
        }
    }

    /// Time between automatic steps
    pub fn get_tick_rate(&self) -> Duration {
        self.step_delay.max(Duration::from_millis(1))
    }

    /// Advance one step unless paused or finished
    pub fn tick(&mut self) {
        if !self.paused {
            self.advance();
        }
    }

    fn advance(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.walker.advance(&mut self.state);
        if self.state.is_finished() {
            debug!(status = ?self.state.status(), steps = self.state.steps(), "walk finished");
        }
    }

    fn restart(&mut self) {
        self.state = self.initial.clone();
        self.paused = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('n') | KeyCode::Right => {
                self.paused = true;
                self.advance();
            }
            KeyCode::Char('f') => {
                while !self.state.is_finished() {
                    self.advance();
                }
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
        AppAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use trailmap_core::{samples, WalkOptions};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_for(id: &str) -> App {
        let grid = samples::find(id).unwrap().grid();
        App::new(
            id.to_string(),
            WalkerState::new(grid).unwrap(),
            Walker::new(),
            Theme::plain(),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_tick_advances_until_finished() {
        let mut app = app_for("id-7");
        for _ in 0..10 {
            app.tick();
        }
        assert!(app.state.is_complete());
        assert_eq!(app.state.trace(), "@-A-x");
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut app = app_for("id-7");
        assert_eq!(app.handle_key(key(KeyCode::Char(' '))), AppAction::Continue);
        assert!(app.paused);
        app.tick();
        assert_eq!(app.state.steps(), 0);
    }

    #[test]
    fn test_step_key_moves_once_and_pauses() {
        let mut app = app_for("id-7");
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.paused);
        assert_eq!(app.state.trace(), "@-");
    }

    #[test]
    fn test_finish_and_restart() {
        let mut app = app_for("id-4");
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.state.letters(), "GOONIES");
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.state.steps(), 0);
        assert_eq!(app.state.trace(), "@");
    }

    #[test]
    fn test_finish_respects_step_limit() {
        let grid = trailmap_core::Grid::from_text("@-+\n ++\n x");
        let mut app = App::new(
            "loop".to_string(),
            WalkerState::new(grid).unwrap(),
            Walker::with_options(WalkOptions { max_steps: Some(8) }),
            Theme::plain(),
            Duration::from_millis(10),
        );
        app.handle_key(key(KeyCode::Char('f')));
        assert!(app.state.is_stuck());
        assert_eq!(app.state.steps(), 8);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_for("id-1");
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), AppAction::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), AppAction::Quit);
    }
}
