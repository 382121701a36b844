//! Pong: mouse-driven player paddle against a simple tracking CPU
//!
//! Frame order: input adapter (player + AI paddles), then ball physics
//! (integrate, walls, scoring, paddles), then the win check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{GameEvent, Side};
use super::rect::{Rect, reflect};
use super::rng::SignSource;
use super::session::Game;
use crate::consts::pong::*;
use crate::consts::{BALL_SIZE, HEIGHT, WIDTH};

/// The playfield as a rectangle
pub fn playfield() -> Rect {
    Rect::new(0.0, 0.0, WIDTH, HEIGHT)
}

/// A vertical paddle and its owner's score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub score: u32,
}

impl Paddle {
    fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET,
            Side::Right => WIDTH - PADDLE_INSET - PADDLE_WIDTH,
        };
        Self {
            rect: Rect::new(x, (HEIGHT - PADDLE_HEIGHT) / 2.0, PADDLE_WIDTH, PADDLE_HEIGHT),
            score: 0,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Ball {
    fn new() -> Self {
        Self {
            rect: Rect::from_center(
                Vec2::new(WIDTH / 2.0, HEIGHT / 2.0),
                Vec2::splat(BALL_SIZE),
            ),
            vel: Vec2::ZERO,
        }
    }

    /// Recenter with the base speed and fresh random signs on both axes
    pub fn serve(&mut self, signs: &mut dyn SignSource) {
        self.rect.set_center(Vec2::new(WIDTH / 2.0, HEIGHT / 2.0));
        let sx = signs.next_sign();
        let sy = signs.next_sign();
        self.vel = Vec2::new(BALL_SPEED_X * sx, BALL_SPEED_Y * sy);
    }
}

/// How a Pong session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PongOutcome {
    pub winner: Side,
}

impl PongOutcome {
    /// Banner text for the game over screen
    pub fn banner(&self) -> String {
        format!("{} WINS!", self.winner.label())
    }
}

/// Complete Pong state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PongState {
    /// Human paddle (left)
    pub player: Paddle,
    /// AI paddle (right)
    pub cpu: Paddle,
    pub ball: Ball,
}

impl Default for PongState {
    fn default() -> Self {
        Self::new()
    }
}

impl PongState {
    /// Paddles centered vertically, ball at rest in the middle.
    /// Call [`Game::reset`] to serve.
    pub fn new() -> Self {
        Self {
            player: Paddle::new(Side::Left),
            cpu: Paddle::new(Side::Right),
            ball: Ball::new(),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.player,
            Side::Right => &self.cpu,
        }
    }

    fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.player,
            Side::Right => &mut self.cpu,
        }
    }

    /// Side that has reached the winning score, if any
    pub fn winner(&self) -> Option<Side> {
        if self.player.score >= WINNING_SCORE {
            Some(Side::Left)
        } else if self.cpu.score >= WINNING_SCORE {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Center the player paddle on the pointer's height, kept on screen
    pub fn follow_pointer(&mut self, pointer_y: f32) {
        self.player.rect.set_center_y(pointer_y);
        self.player.rect.clamp_within(&playfield());
    }

    /// Step the CPU paddle toward the ball's height. No prediction, so it
    /// can jitter around the target.
    pub fn steer_ai(&mut self) {
        let target = self.ball.rect.center().y;
        let current = self.cpu.rect.center().y;
        if current < target {
            self.cpu.rect.pos.y += AI_SPEED;
        } else if current > target {
            self.cpu.rect.pos.y -= AI_SPEED;
        }
        self.cpu.rect.clamp_within(&playfield());
    }

    /// Move the ball one frame and resolve walls, goals and paddles
    pub fn advance_ball(&mut self, signs: &mut dyn SignSource, events: &mut Vec<GameEvent>) {
        let field = playfield();
        let ball = &mut self.ball;
        ball.rect.pos += ball.vel;

        // Top and bottom walls
        let hit_top = ball.rect.top() <= field.top() && ball.vel.y < 0.0;
        let hit_bottom = ball.rect.bottom() >= field.bottom() && ball.vel.y > 0.0;
        if hit_top || hit_bottom {
            ball.vel.y = reflect(ball.vel.y);
            events.push(GameEvent::WallBounce);
        }
        ball.rect.pos.y = ball
            .rect
            .pos
            .y
            .clamp(field.top(), field.bottom() - ball.rect.size.y);

        // Goals: leaving through one side scores for the other
        let scorer = if ball.rect.left() <= field.left() {
            Some(Side::Right)
        } else if ball.rect.right() >= field.right() {
            Some(Side::Left)
        } else {
            None
        };
        if let Some(side) = scorer {
            let paddle = self.paddle_mut(side);
            paddle.score += 1;
            let score = paddle.score;
            events.push(GameEvent::Scored { side, score });
            self.ball.serve(signs);
        }

        for side in [Side::Left, Side::Right] {
            self.bounce_off_paddle(side, events);
        }
    }

    fn bounce_off_paddle(&mut self, side: Side, events: &mut Vec<GameEvent>) {
        let paddle = self.paddle(side).rect;
        let ball = &mut self.ball;

        let approaching = match side {
            Side::Left => ball.vel.x < 0.0,
            Side::Right => ball.vel.x > 0.0,
        };
        if !approaching || !ball.rect.overlaps(&paddle) {
            return;
        }

        let offset = paddle.offset_y(ball.rect.center().y);
        let speed_x = ball.vel.x.abs() * SPEED_GROWTH;
        ball.vel.x = match side {
            Side::Left => speed_x,
            Side::Right => -speed_x,
        };
        ball.vel.y = ball.vel.x * offset * ANGLE_FACTOR;

        events.push(GameEvent::PaddleHit {
            side: Some(side),
            offset,
        });
    }
}

impl Game for PongState {
    type Outcome = PongOutcome;

    fn reset(&mut self, signs: &mut dyn SignSource) {
        *self = Self::new();
        self.ball.serve(signs);
    }

    fn step(
        &mut self,
        pointer: Option<Vec2>,
        signs: &mut dyn SignSource,
        events: &mut Vec<GameEvent>,
    ) -> Option<PongOutcome> {
        if let Some(pointer) = pointer {
            self.follow_pointer(pointer.y);
        }
        self.steer_ai();
        self.advance_ball(signs, events);

        self.winner().map(|winner| PongOutcome { winner })
    }

    fn demo_pointer(&self) -> Vec2 {
        Vec2::new(self.player.rect.center().x, self.ball.rect.center().y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedSigns;

    fn served(signs: &mut ScriptedSigns) -> PongState {
        let mut state = PongState::new();
        state.reset(signs);
        state
    }

    #[test]
    fn test_reset_serves_from_center() {
        let mut signs = ScriptedSigns::new([-1.0, 1.0]);
        let state = served(&mut signs);

        assert_eq!(state.ball.rect.center(), Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(-BALL_SPEED_X, BALL_SPEED_Y));
        assert_eq!(state.player.rect.left(), 30.0);
        assert_eq!(state.cpu.rect.right(), 770.0);
        assert_eq!(state.player.score + state.cpu.score, 0);
    }

    #[test]
    fn test_pointer_drives_player_and_is_clamped() {
        let mut state = PongState::new();
        state.follow_pointer(200.0);
        assert_eq!(state.player.rect.center().y, 200.0);

        state.follow_pointer(-500.0);
        assert_eq!(state.player.rect.top(), 0.0);

        state.follow_pointer(5000.0);
        assert_eq!(state.player.rect.bottom(), HEIGHT);
    }

    #[test]
    fn test_ai_steps_toward_ball() {
        let mut state = PongState::new();
        state.ball.rect.set_center(Vec2::new(400.0, 100.0));
        let before = state.cpu.rect.center().y;
        state.steer_ai();
        assert_eq!(state.cpu.rect.center().y, before - AI_SPEED);

        state.ball.rect.set_center(Vec2::new(400.0, 500.0));
        state.steer_ai();
        assert_eq!(state.cpu.rect.center().y, before);

        // Level with the ball: stays put
        state.ball.rect.set_center(Vec2::new(400.0, before));
        state.steer_ai();
        assert_eq!(state.cpu.rect.center().y, before);
    }

    #[test]
    fn test_wall_bounce() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = PongState::new();
        state.ball.rect.pos = Vec2::new(400.0, 2.0);
        state.ball.vel = Vec2::new(5.0, -5.0);

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert_eq!(state.ball.vel.y, 5.0);
        assert_eq!(state.ball.rect.top(), 0.0);
        assert_eq!(events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_center_hit_reflects_straight_and_speeds_up() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = PongState::new();
        let paddle_center = state.player.rect.center().y;
        state.ball.rect.set_center(Vec2::new(0.0, paddle_center));
        state.ball.rect.pos.x = state.player.rect.right() + 1.0;
        state.ball.vel = Vec2::new(-5.0, 0.0);

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert!((state.ball.vel.x - 5.0 * SPEED_GROWTH).abs() < 1e-5);
        assert_eq!(state.ball.vel.y, 0.0);
        assert_eq!(
            events,
            vec![GameEvent::PaddleHit {
                side: Some(Side::Left),
                offset: 0.0
            }]
        );
    }

    #[test]
    fn test_player_lower_half_hit_sends_ball_down() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = PongState::new();
        let player = state.player.rect;
        state.ball.rect.set_center(Vec2::new(0.0, player.center().y + 25.0));
        state.ball.rect.pos.x = player.right() - 2.0;
        state.ball.vel = Vec2::new(-5.0, 0.0);

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert!(state.ball.vel.x > 0.0);
        let expected = 5.0 * SPEED_GROWTH * 0.5 * ANGLE_FACTOR;
        assert!((state.ball.vel.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_cpu_lower_half_hit_sends_ball_up() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = PongState::new();
        let cpu = state.cpu.rect;
        // Tangent follows the signed return speed, so the CPU side mirrors the player
        state.ball.rect.set_center(Vec2::new(0.0, cpu.center().y + 25.0));
        state.ball.rect.pos.x = cpu.left() - BALL_SIZE + 2.0;
        state.ball.vel = Vec2::new(5.0, 0.0);

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert!(state.ball.vel.x < 0.0);
        let expected = -5.0 * SPEED_GROWTH * 0.5 * ANGLE_FACTOR;
        assert!((state.ball.vel.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_ball_leaving_right_scores_for_player() {
        let mut signs = ScriptedSigns::new([-1.0, -1.0]);
        let mut state = PongState::new();
        state.ball.rect.pos = Vec2::new(WIDTH - BALL_SIZE - 1.0, 100.0);
        state.ball.vel = Vec2::new(5.0, 0.0);

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert_eq!(state.player.score, 1);
        assert_eq!(state.cpu.score, 0);
        assert_eq!(state.ball.rect.center(), Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(-BALL_SPEED_X, -BALL_SPEED_Y));
        assert!(events.contains(&GameEvent::Scored {
            side: Side::Left,
            score: 1
        }));
    }

    #[test]
    fn test_tenth_point_for_cpu_ends_session() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = PongState::new();
        state.cpu.score = WINNING_SCORE - 1;
        state.ball.rect.pos = Vec2::new(1.0, 20.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        // Keep the player paddle out of the ball's way
        let far = Some(Vec2::new(0.0, HEIGHT));

        let mut events = Vec::new();
        let outcome = state.step(far, &mut signs, &mut events);

        assert_eq!(state.cpu.score, WINNING_SCORE);
        let outcome = outcome.expect("tenth point ends the game");
        assert_eq!(outcome.winner, Side::Right);
        assert_eq!(outcome.winner.label(), "CPU");
        assert_eq!(outcome.banner(), "CPU WINS!");
    }

    #[test]
    fn test_reset_restores_starting_values() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = served(&mut signs);
        state.player.score = 7;
        state.cpu.score = 10;
        state.player.rect.pos.y = 0.0;
        state.ball.rect.pos = Vec2::new(12.0, 34.0);

        state.reset(&mut signs);

        assert_eq!((state.player.score, state.cpu.score), (0, 0));
        assert_eq!(state.player.rect.center().y, HEIGHT / 2.0);
        assert_eq!(state.ball.rect.center(), Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel.abs(), Vec2::new(BALL_SPEED_X, BALL_SPEED_Y));
    }
}
