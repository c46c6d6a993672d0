use crate::engine::game_state::GameState;

/// Cursor lock follows the game state, but only once the user has allowed
/// it at least once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorController {
    granted: bool,
    locked: bool,
}

impl CursorController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the cursor should now be locked.
    pub fn apply_state_change(&mut self, state: GameState, allow_cursor_lock: bool) -> bool {
        self.granted |= allow_cursor_lock;
        self.locked = state == GameState::Playing && self.granted;
        self.locked
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
