//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Randomness only through an injected [`SignSource`]
//! - Side effects reported as [`GameEvent`]s, never performed
//! - No rendering or platform dependencies

pub mod breakout;
pub mod event;
pub mod pong;
pub mod rect;
pub mod rng;
pub mod session;

pub use breakout::{BreakoutOutcome, BreakoutState, Brick, brick_layout};
pub use event::{GameEvent, Side, Tone};
pub use pong::{PongOutcome, PongState};
pub use rect::{Rect, reflect};
pub use rng::{ScriptedSigns, SeededSigns, SignSource};
pub use session::{Controls, Game, Session, SessionPhase};
