//! Side effects reported by a simulation step
//!
//! Physics never touches audio or rendering; it appends events and the
//! caller decides what to do with them.

use serde::{Deserialize, Serialize};

/// The three fixed beeps both games use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    /// Wall bounce
    Low,
    /// Paddle hit
    Mid,
    /// Brick break / point scored
    High,
}

impl Tone {
    /// Pitch in Hz (F4, C5, G5)
    pub fn frequency(self) -> f32 {
        match self {
            Tone::Low => 349.0,
            Tone::Mid => 523.0,
            Tone::High => 784.0,
        }
    }

    /// Length in milliseconds
    pub fn duration_ms(self) -> u32 {
        match self {
            Tone::Low => 100,
            Tone::Mid => 50,
            Tone::High => 150,
        }
    }
}

/// Which side of the Pong court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Owner label shown on the scoreboard and game over screen
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "PLAYER",
            Side::Right => "CPU",
        }
    }
}

/// Something that happened during one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a playfield wall
    WallBounce,
    /// Ball bounced off a paddle; `offset` is the normalized contact offset
    PaddleHit { side: Option<Side>, offset: f32 },
    /// Pong point awarded
    Scored { side: Side, score: u32 },
    /// Breakout brick removed
    BrickBroken { index: usize, score: u64 },
    /// Breakout ball fell past the paddle
    LifeLost { remaining: u8 },
}

impl GameEvent {
    /// The beep this event triggers, if any
    pub fn tone(&self) -> Option<Tone> {
        match self {
            GameEvent::WallBounce => Some(Tone::Low),
            GameEvent::PaddleHit { .. } => Some(Tone::Mid),
            GameEvent::Scored { .. } | GameEvent::BrickBroken { .. } => Some(Tone::High),
            GameEvent::LifeLost { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tones() {
        assert_eq!(GameEvent::WallBounce.tone(), Some(Tone::Low));
        assert_eq!(
            GameEvent::PaddleHit {
                side: None,
                offset: 0.0
            }
            .tone(),
            Some(Tone::Mid)
        );
        assert_eq!(
            GameEvent::BrickBroken { index: 0, score: 10 }.tone(),
            Some(Tone::High)
        );
        assert_eq!(GameEvent::LifeLost { remaining: 2 }.tone(), None);
    }

    #[test]
    fn test_tones_ascend() {
        assert!(Tone::Low.frequency() < Tone::Mid.frequency());
        assert!(Tone::Mid.frequency() < Tone::High.frequency());
    }

    #[test]
    fn test_side_labels() {
        assert_eq!(Side::Left.label(), "PLAYER");
        assert_eq!(Side::Right.label(), "CPU");
    }
}
