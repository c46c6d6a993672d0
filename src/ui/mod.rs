//! HUD state for a host UI.
//!
//! Nothing here draws. The host reads these models each frame; they are kept
//! current by feeding them game events.

pub mod combat_log;
pub mod cursor;
pub mod minimap;
pub mod status_bar;

use hecs::{Entity, World};

use crate::config::HudConfig;
use crate::engine::game_state::GameState;
use crate::events::GameEvent;

pub use combat_log::{describe_event, CombatLog};
pub use cursor::CursorController;
pub use minimap::{Minimap, MinimapCell};
pub use status_bar::StatusBar;

/// Top-level panel a host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPanel {
    StartMenu,
    Hud,
    PauseMenu,
    DeathScreen,
    EndScreen,
}

pub fn visible_panel(state: GameState) -> UiPanel {
    match state {
        GameState::Start => UiPanel::StartMenu,
        GameState::Playing => UiPanel::Hud,
        GameState::Paused => UiPanel::PauseMenu,
        GameState::Dead => UiPanel::DeathScreen,
        GameState::End => UiPanel::EndScreen,
    }
}

// =============================================================================
// GAME UI STATE (event-driven)
// =============================================================================

/// Game UI state that responds to events.
pub struct GameUiState {
    pub status: StatusBar,
    pub log: CombatLog,
    pub minimap: Minimap,
    pub cursor: CursorController,
    panel: UiPanel,
    /// The player entity (needed to filter events)
    player_entity: Entity,
}

impl GameUiState {
    pub fn new(config: &HudConfig, player_entity: Entity) -> Self {
        Self {
            status: StatusBar::new(),
            log: CombatLog::new(config.combat_log_max_entries),
            minimap: Minimap::new(config.minimap_radius_cells, config.minimap_refresh_seconds),
            cursor: CursorController::new(),
            panel: visible_panel(GameState::Start),
            player_entity,
        }
    }

    /// Follow a new player entity after the level is rebuilt.
    pub fn track_player(&mut self, player_entity: Entity) {
        self.player_entity = player_entity;
    }

    pub fn panel(&self) -> UiPanel {
        self.panel
    }

    /// Handle a game event, updating UI state as needed.
    ///
    /// Call before dead actors are despawned so log lines can name them.
    pub fn handle_event(&mut self, world: &World, event: &GameEvent, timestamp: &str) {
        match event {
            GameEvent::HealthChanged {
                entity,
                current,
                max,
            } if *entity == self.player_entity => {
                self.status.set_health(*current, *max);
            }
            GameEvent::StateChanged {
                state,
                allow_cursor_lock,
            } => {
                self.panel = visible_panel(*state);
                self.cursor.apply_state_change(*state, *allow_cursor_lock);
            }
            _ => {}
        }

        if let Some(message) = describe_event(world, event) {
            self.log.push(timestamp, &message);
        }
    }
}
