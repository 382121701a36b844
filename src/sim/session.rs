//! Session controller
//!
//! Wraps one game in the Active -> GameOver -> Active loop, with quit
//! available from any state. The session owns the game state, the sign
//! source and the per-frame event buffer.

use std::fmt;

use glam::Vec2;

use super::event::GameEvent;
use super::rng::SignSource;

/// Input signals for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    /// Latest pointer position in playfield coordinates (None = no sample)
    pub pointer: Option<Vec2>,
    /// Restart key pressed this frame
    pub restart: bool,
    /// Quit requested this frame
    pub quit: bool,
}

/// A game the session can drive
pub trait Game {
    /// How a finished session ended
    type Outcome: Clone + fmt::Debug;

    /// Reinitialize scores, lives, positions and obstacles
    fn reset(&mut self, signs: &mut dyn SignSource);

    /// Advance one frame. Returns the outcome when this frame ended the session.
    fn step(
        &mut self,
        pointer: Option<Vec2>,
        signs: &mut dyn SignSource,
        events: &mut Vec<GameEvent>,
    ) -> Option<Self::Outcome>;

    /// Where a perfect player would hold the pointer right now
    fn demo_pointer(&self) -> Vec2;
}

/// Current phase of a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase<O> {
    /// Gameplay running
    Active,
    /// Finished, showing the result until restart
    GameOver(O),
    /// Quit requested; nothing more is simulated or drawn
    Terminated,
}

/// One game plus its session state machine
pub struct Session<G: Game> {
    game: G,
    phase: SessionPhase<G::Outcome>,
    signs: Box<dyn SignSource>,
    events: Vec<GameEvent>,
    /// Frames a result stays up before restarting on its own
    auto_restart: Option<u32>,
    frames_over: u32,
    frames: u64,
}

impl<G: Game> Session<G> {
    /// Start a fresh session; the game is reset before the first frame
    pub fn new(mut game: G, mut signs: Box<dyn SignSource>) -> Self {
        game.reset(signs.as_mut());
        Self {
            game,
            phase: SessionPhase::Active,
            signs,
            events: Vec::new(),
            auto_restart: None,
            frames_over: 0,
            frames: 0,
        }
    }

    /// Restart automatically after `frames` frames of GameOver
    pub fn with_auto_restart(mut self, frames: Option<u32>) -> Self {
        self.auto_restart = frames;
        self
    }

    /// Process one frame of input. Returns the events this frame produced.
    pub fn step(&mut self, controls: &Controls) -> &[GameEvent] {
        self.events.clear();

        if controls.quit {
            self.quit();
        }

        match self.phase {
            SessionPhase::Terminated => {}
            SessionPhase::GameOver(_) => {
                self.frames_over += 1;
                let expired = self
                    .auto_restart
                    .is_some_and(|frames| self.frames_over >= frames);
                if controls.restart || expired {
                    self.restart();
                }
            }
            SessionPhase::Active => {
                self.frames += 1;
                if let Some(outcome) =
                    self.game
                        .step(controls.pointer, self.signs.as_mut(), &mut self.events)
                {
                    log::info!("Session over after {} frames: {:?}", self.frames, outcome);
                    self.phase = SessionPhase::GameOver(outcome);
                    self.frames_over = 0;
                }
            }
        }

        for event in &self.events {
            log::trace!("frame {}: {:?}", self.frames, event);
        }
        &self.events
    }

    /// Reset the game and return to Active
    pub fn restart(&mut self) {
        if self.is_terminated() {
            return;
        }
        self.game.reset(self.signs.as_mut());
        self.phase = SessionPhase::Active;
        self.frames_over = 0;
        self.frames = 0;
        log::info!("Session restarted");
    }

    /// Terminate the session; irreversible
    pub fn quit(&mut self) {
        if !self.is_terminated() {
            log::info!("Quit requested");
            self.phase = SessionPhase::Terminated;
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn phase(&self) -> &SessionPhase<G::Outcome> {
        &self.phase
    }

    /// The result being shown, if the session is over
    pub fn outcome(&self) -> Option<&G::Outcome> {
        match &self.phase {
            SessionPhase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Active)
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, SessionPhase::Terminated)
    }

    /// Events produced by the most recent step
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
