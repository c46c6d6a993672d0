//! HUD status line: player health, combat state, turn state, prompt.

use crate::constants::HUD_DEFAULT_PROMPT;

/// Data needed to render the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBar {
    health_current: i32,
    health_max: i32,
    in_combat: bool,
    player_turn: bool,
    prompt: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            health_current: 0,
            health_max: 1,
            in_combat: false,
            player_turn: true,
            prompt: HUD_DEFAULT_PROMPT.to_string(),
        }
    }

    /// Max is floored at 1 and current clamped into range.
    pub fn set_health(&mut self, current: i32, max: i32) {
        self.health_max = max.max(1);
        self.health_current = current.clamp(0, self.health_max);
    }

    pub fn health_label(&self) -> String {
        format!("HP {} / {}", self.health_current, self.health_max)
    }

    /// Bar fill in [0, 1]
    pub fn health_fill(&self) -> f32 {
        self.health_current as f32 / self.health_max as f32
    }

    pub fn set_in_combat(&mut self, in_combat: bool) {
        self.in_combat = in_combat;
    }

    pub fn in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn combat_label(&self) -> &'static str {
        if self.in_combat {
            "In Combat"
        } else {
            "Exploration"
        }
    }

    pub fn set_player_turn(&mut self, player_turn: bool) {
        self.player_turn = player_turn;
    }

    pub fn turn_label(&self) -> &'static str {
        if self.player_turn {
            "Your Turn"
        } else {
            "Enemy Turn"
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Single-line rendering for text hosts
    pub fn render_line(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.health_label(),
            self.combat_label(),
            self.turn_label(),
            self.prompt
        )
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_label_and_fill() {
        let mut bar = StatusBar::new();
        bar.set_health(7, 10);
        assert_eq!(bar.health_label(), "HP 7 / 10");
        assert!((bar.health_fill() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_health_is_sanitized() {
        let mut bar = StatusBar::new();
        bar.set_health(5, 0);
        assert_eq!(bar.health_label(), "HP 1 / 1");
        bar.set_health(-3, 4);
        assert_eq!(bar.health_fill(), 0.0);
    }

    #[test]
    fn test_labels() {
        let mut bar = StatusBar::new();
        assert_eq!(bar.combat_label(), "Exploration");
        assert_eq!(bar.prompt(), "Ready.");
        bar.set_in_combat(true);
        bar.set_player_turn(false);
        bar.set_prompt("Run!");
        assert_eq!(bar.render_line(), "HP 0 / 1 | In Combat | Enemy Turn | Run!");
    }
}
