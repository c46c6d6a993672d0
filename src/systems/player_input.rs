//! Player input interpretation.
//!
//! Device handling belongs to the host; it hands us `PlayerIntent`s. The
//! key mapping here is what the headless harness uses for scripts.

/// High-level player intent derived from input.
/// This represents what the player wants to do, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
    Attack,
}

impl PlayerIntent {
    /// WASD-style mapping: W/S move, A/D turn, Space or F attacks.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(PlayerIntent::MoveForward),
            's' => Some(PlayerIntent::MoveBackward),
            'a' => Some(PlayerIntent::TurnLeft),
            'd' => Some(PlayerIntent::TurnRight),
            ' ' | 'f' => Some(PlayerIntent::Attack),
            _ => None,
        }
    }

    /// Parse a script like `"wwdf"`; unknown characters are skipped.
    pub fn parse_script(script: &str) -> Vec<PlayerIntent> {
        script.chars().filter_map(Self::from_key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(PlayerIntent::from_key('W'), Some(PlayerIntent::MoveForward));
        assert_eq!(PlayerIntent::from_key('d'), Some(PlayerIntent::TurnRight));
        assert_eq!(PlayerIntent::from_key(' '), Some(PlayerIntent::Attack));
        assert_eq!(PlayerIntent::from_key('q'), None);
    }

    #[test]
    fn test_parse_script_skips_unknown() {
        assert_eq!(
            PlayerIntent::parse_script("w-a f"),
            vec![
                PlayerIntent::MoveForward,
                PlayerIntent::TurnLeft,
                PlayerIntent::Attack,
                PlayerIntent::Attack,
            ]
        );
    }
}
