//! Per-game drawing
//!
//! Grayscale look: black background, light paddles and ball, gray detail.

use glam::Vec2;

use super::vertex::colors::*;
use super::{RenderSink, TextAnchor, TextStyle};
use crate::consts::{HEIGHT, WIDTH};
use crate::sim::breakout::{self, BreakoutOutcome, BreakoutState};
use crate::sim::pong::{self, PongOutcome, PongState};
use crate::sim::{Game, Rect, Side};

const SCORE_TEXT: TextStyle = TextStyle::new(32.0, LIGHT_GRAY, TextAnchor::TopCenter);
const LABEL_TEXT: TextStyle = TextStyle::new(24.0, MEDIUM_GRAY, TextAnchor::TopCenter);
const BANNER_TEXT: TextStyle = TextStyle::new(64.0, LIGHT_GRAY, TextAnchor::TopCenter).bold();
const HUD_TEXT: TextStyle = TextStyle::new(36.0, WHITE, TextAnchor::TopLeft);

/// Net dash length and spacing
const DASH: f32 = 20.0;
const DASH_GAP: f32 = 10.0;

/// A game that knows how to draw itself
pub trait Scene: Game {
    /// Draw one full frame; `outcome` is set while the result is showing
    fn draw(&self, outcome: Option<&Self::Outcome>, sink: &mut dyn RenderSink);
}

/// Paddle with a flat face, darker rim and a shaded edge
fn draw_paddle(sink: &mut dyn RenderSink, rect: Rect) {
    sink.fill_rect(rect, LIGHT_GRAY);
    sink.stroke_rect(rect, 3.0, MEDIUM_GRAY);
    sink.fill_rect(Rect::new(rect.left(), rect.top(), 2.0, rect.size.y), DARK_GRAY);
}

/// "Press ..." lines under a banner
/// Dark dot in the middle of the Pong ball, half its size
fn ball_core(ball: Rect) -> Rect {
    Rect::from_center(ball.center(), ball.size / 2.0)
}

fn draw_prompts(sink: &mut dyn RenderSink) {
    let center = WIDTH / 2.0;
    sink.text(
        "Press SPACE to play again",
        Vec2::new(center, HEIGHT / 2.0 + 30.0),
        LABEL_TEXT,
    );
    sink.text(
        "Press ESC to quit",
        Vec2::new(center, HEIGHT / 2.0 + 70.0),
        LABEL_TEXT,
    );
}

impl Scene for PongState {
    fn draw(&self, outcome: Option<&PongOutcome>, sink: &mut dyn RenderSink) {
        sink.clear(BLACK);

        // Dashed net down the middle
        let mut y = 0.0;
        while y < HEIGHT {
            sink.fill_rect(Rect::new(WIDTH / 2.0 - 2.0, y, 4.0, DASH), MEDIUM_GRAY);
            y += DASH + DASH_GAP;
        }
        sink.stroke_rect(pong::playfield(), 10.0, DARK_GRAY);

        draw_paddle(sink, self.player.rect);
        draw_paddle(sink, self.cpu.rect);

        sink.fill_rect(self.ball.rect, WHITE);
        sink.stroke_rect(self.ball.rect, 2.0, MEDIUM_GRAY);
        sink.fill_ellipse(ball_core(self.ball.rect), DARK_GRAY);

        // Scores with owner labels, one quarter in from each side
        for (side, x) in [(Side::Left, WIDTH / 4.0), (Side::Right, 3.0 * WIDTH / 4.0)] {
            let score = self.paddle(side).score.to_string();
            sink.text(&score, Vec2::new(x, 20.0), SCORE_TEXT);
            sink.text(side.label(), Vec2::new(x, 60.0), LABEL_TEXT);
        }

        if let Some(outcome) = outcome {
            sink.fill_rect(pong::playfield(), OVERLAY);
            sink.text(
                &outcome.banner(),
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 - 50.0),
                BANNER_TEXT,
            );
            draw_prompts(sink);
        }
    }
}

impl Scene for BreakoutState {
    fn draw(&self, outcome: Option<&BreakoutOutcome>, sink: &mut dyn RenderSink) {
        sink.clear(BLACK);

        sink.fill_rect(self.paddle, WHITE);
        sink.fill_ellipse(self.ball.rect, WHITE);

        for brick in &self.bricks {
            sink.fill_rect(brick.rect, BRICK);
            sink.stroke_rect(brick.rect, 2.0, GRAY);
        }

        sink.text(&format!("Score: {}", self.score), Vec2::new(10.0, 10.0), HUD_TEXT);
        sink.text(
            &format!("Lives: {}", self.lives),
            Vec2::new(WIDTH - 120.0, 10.0),
            HUD_TEXT,
        );

        if let Some(outcome) = outcome {
            sink.fill_rect(breakout::playfield(), OVERLAY);
            sink.text(
                outcome.banner(),
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0),
                TextStyle {
                    anchor: TextAnchor::Center,
                    ..HUD_TEXT
                },
            );
            draw_prompts(sink);
        }
    }
}
