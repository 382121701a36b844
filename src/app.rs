//! Top-level arcade object
//!
//! Owns one session plus the render and audio handles it talks to. The
//! platform loop calls [`Cabinet::frame`] once per simulation step, or
//! [`Cabinet::tick`] per step and [`Cabinet::draw`] once per display frame.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::renderer::{RenderSink, Scene};
use crate::settings::{GameKind, Settings};
use crate::sim::{BreakoutState, Controls, GameEvent, PongState, SeededSigns, Session};

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

/// A session wired to its output devices
pub struct Arcade<G: Scene, R: RenderSink, A: AudioSink> {
    session: Session<G>,
    renderer: R,
    audio: A,
}

impl<G: Scene, R: RenderSink, A: AudioSink> Arcade<G, R, A> {
    pub fn new(session: Session<G>, renderer: R, audio: A) -> Self {
        Self {
            session,
            renderer,
            audio,
        }
    }

    pub fn session(&self) -> &Session<G> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<G> {
        &mut self.session
    }
}

/// Game-independent view of an [`Arcade`], so one loop can drive either game
pub trait Cabinet<R, A> {
    /// Step the session and play this frame's tones. A quit frame plays nothing.
    fn tick(&mut self, controls: &Controls) -> FrameStatus;

    /// Draw the current state and present it
    fn draw(&mut self);

    /// One full frame: tick, then draw unless quitting
    fn frame(&mut self, controls: &Controls) -> FrameStatus {
        let status = self.tick(controls);
        if status == FrameStatus::Continue {
            self.draw();
        }
        status
    }

    /// Pointer position for unattended play
    fn demo_pointer(&self) -> Vec2;

    fn is_terminated(&self) -> bool;

    fn renderer(&self) -> &R;

    fn renderer_mut(&mut self) -> &mut R;

    fn audio(&self) -> &A;

    fn audio_mut(&mut self) -> &mut A;
}

impl<G: Scene, R: RenderSink, A: AudioSink> Cabinet<R, A> for Arcade<G, R, A> {
    fn tick(&mut self, controls: &Controls) -> FrameStatus {
        self.session.step(controls);
        if self.session.is_terminated() {
            return FrameStatus::Quit;
        }

        for tone in self.session.events().iter().filter_map(GameEvent::tone) {
            self.audio.play(tone);
        }
        FrameStatus::Continue
    }

    fn draw(&mut self) {
        if self.session.is_terminated() {
            return;
        }
        self.session
            .game()
            .draw(self.session.outcome(), &mut self.renderer);
        self.renderer.present();
    }

    fn demo_pointer(&self) -> Vec2 {
        self.session.game().demo_pointer()
    }

    fn is_terminated(&self) -> bool {
        self.session.is_terminated()
    }

    fn renderer(&self) -> &R {
        &self.renderer
    }

    fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn audio(&self) -> &A {
        &self.audio
    }

    fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}

/// Build the cabinet for the game `settings` selects
pub fn build<R, A>(settings: &Settings, seed: u64, renderer: R, audio: A) -> Box<dyn Cabinet<R, A>>
where
    R: RenderSink + 'static,
    A: AudioSink + 'static,
{
    let signs = Box::new(SeededSigns::new(seed));
    log::info!("Starting {} with seed {}", settings.game.as_str(), seed);

    match settings.game {
        GameKind::Pong => Box::new(Arcade::new(
            Session::new(PongState::new(), signs).with_auto_restart(settings.auto_restart_frames()),
            renderer,
            audio,
        )),
        GameKind::Breakout => Box::new(Arcade::new(
            Session::new(BreakoutState::new(), signs)
                .with_auto_restart(settings.auto_restart_frames()),
            renderer,
            audio,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Frame;
    use crate::sim::{ScriptedSigns, Tone};

    /// Audio sink that remembers what it was asked to play
    #[derive(Debug, Default)]
    struct Recorder(Vec<Tone>);

    impl AudioSink for Recorder {
        fn play(&mut self, tone: Tone) {
            self.0.push(tone);
        }
    }

    fn pong() -> Arcade<PongState, Frame, Recorder> {
        Arcade::new(
            Session::new(PongState::new(), Box::new(ScriptedSigns::constant(1.0))),
            Frame::new(),
            Recorder::default(),
        )
    }

    #[test]
    fn test_frame_draws_and_presents() {
        let mut arcade = pong();
        assert_eq!(arcade.frame(&Controls::default()), FrameStatus::Continue);

        assert_eq!(arcade.renderer().presented(), 1);
        assert!(arcade.renderer().has_text("PLAYER"));
    }

    #[test]
    fn test_wall_bounce_plays_low_tone() {
        let mut arcade = pong();
        {
            let ball = &mut arcade.session_mut().game_mut().ball;
            ball.rect.pos = Vec2::new(400.0, 2.0);
            ball.vel = Vec2::new(5.0, -5.0);
        }

        arcade.frame(&Controls::default());
        assert_eq!(arcade.audio().0, vec![Tone::Low]);
    }

    #[test]
    fn test_quit_skips_output() {
        let mut arcade = pong();
        let quit = Controls {
            quit: true,
            ..Default::default()
        };

        assert_eq!(arcade.frame(&quit), FrameStatus::Quit);
        assert!(arcade.is_terminated());
        assert_eq!(arcade.renderer().presented(), 0);
        assert!(arcade.renderer().commands().is_empty());

        // Stays quit
        assert_eq!(arcade.frame(&Controls::default()), FrameStatus::Quit);
    }

    #[test]
    fn test_build_picks_game() {
        let settings = Settings {
            game: GameKind::Breakout,
            ..Default::default()
        };
        let mut cabinet = build(&settings, 1, Frame::new(), Recorder::default());
        cabinet.frame(&Controls::default());

        assert!(cabinet.renderer().has_text("Lives: 3"));
        assert_eq!(cabinet.demo_pointer().y, crate::consts::breakout::PADDLE_Y + 10.0);
    }
}
