//! Session state machine: start screen, playing, paused, dead, end.
//!
//! Every transition call broadcasts `StateChanged`, including calls that
//! re-enter the current state, so listeners can re-apply side effects such
//! as cursor lock.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::events::{EventQueue, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Start,
    Playing,
    Paused,
    Dead,
    End,
}

#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    state: GameState,
    quit_requested: bool,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self {
            state: GameState::Start,
            quit_requested: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Initial broadcast so listeners pick up the starting state.
    pub fn announce(&self, events: &mut EventQueue) {
        events.push(GameEvent::StateChanged {
            state: self.state,
            allow_cursor_lock: false,
        });
    }

    pub fn change_state(&mut self, state: GameState, allow_cursor_lock: bool, events: &mut EventQueue) {
        if self.state != state {
            info!(from = ?self.state, to = ?state, "game state changed");
        }
        self.state = state;
        events.push(GameEvent::StateChanged {
            state,
            allow_cursor_lock,
        });
    }

    pub fn start_new_game(&mut self, events: &mut EventQueue) {
        self.change_state(GameState::Playing, true, events);
    }

    pub fn resume_game(&mut self, events: &mut EventQueue) {
        self.change_state(GameState::Playing, true, events);
    }

    /// State only; the engine decides whether to rebuild the level.
    pub fn retry_game(&mut self, events: &mut EventQueue) {
        self.change_state(GameState::Playing, true, events);
    }

    pub fn go_to_main_menu(&mut self, events: &mut EventQueue) {
        self.change_state(GameState::Start, false, events);
    }

    pub fn quit_game(&mut self) {
        info!("quit requested");
        self.quit_requested = true;
    }

    pub fn debug_set_dead(&mut self, events: &mut EventQueue) {
        self.change_state(GameState::Dead, false, events);
    }

    pub fn debug_set_end(&mut self, events: &mut EventQueue) {
        self.change_state(GameState::End, false, events);
    }

    /// Escape toggles Playing and Paused. Ignored in other states.
    pub fn handle_escape(&mut self, events: &mut EventQueue) {
        match self.state {
            GameState::Playing => self.change_state(GameState::Paused, false, events),
            GameState::Paused => self.change_state(GameState::Playing, true, events),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(events: &mut EventQueue) -> Vec<(GameState, bool)> {
        events
            .drain()
            .filter_map(|e| match e {
                GameEvent::StateChanged {
                    state,
                    allow_cursor_lock,
                } => Some((state, allow_cursor_lock)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_starts_on_start_screen() {
        let machine = GameStateMachine::new();
        let mut events = EventQueue::new();
        machine.announce(&mut events);
        assert_eq!(changes(&mut events), vec![(GameState::Start, false)]);
    }

    #[test]
    fn test_escape_toggles_pause() {
        let mut machine = GameStateMachine::new();
        let mut events = EventQueue::new();

        machine.handle_escape(&mut events);
        assert_eq!(machine.state(), GameState::Start);
        assert!(events.is_empty());

        machine.start_new_game(&mut events);
        machine.handle_escape(&mut events);
        assert_eq!(machine.state(), GameState::Paused);
        machine.handle_escape(&mut events);
        assert!(machine.is_playing());
        assert_eq!(
            changes(&mut events),
            vec![
                (GameState::Playing, true),
                (GameState::Paused, false),
                (GameState::Playing, true),
            ]
        );
    }

    #[test]
    fn test_same_state_still_notifies() {
        let mut machine = GameStateMachine::new();
        let mut events = EventQueue::new();
        machine.start_new_game(&mut events);
        machine.resume_game(&mut events);
        assert_eq!(changes(&mut events).len(), 2);
    }

    #[test]
    fn test_debug_and_menu_transitions() {
        let mut machine = GameStateMachine::new();
        let mut events = EventQueue::new();
        machine.debug_set_dead(&mut events);
        assert_eq!(machine.state(), GameState::Dead);
        machine.handle_escape(&mut events);
        assert_eq!(machine.state(), GameState::Dead);
        machine.retry_game(&mut events);
        machine.debug_set_end(&mut events);
        machine.go_to_main_menu(&mut events);
        assert_eq!(
            changes(&mut events),
            vec![
                (GameState::Dead, false),
                (GameState::Playing, true),
                (GameState::End, false),
                (GameState::Start, false),
            ]
        );

        machine.quit_game();
        assert!(machine.quit_requested());
    }
}
