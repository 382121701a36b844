//! Breakout: clear the wall of bricks with three lives
//!
//! Frame order: paddle follows the pointer, then ball physics (integrate,
//! side and top walls, bottom miss, paddle, one brick at most), then the
//! win check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::rect::{Rect, reflect};
use super::rng::SignSource;
use super::session::Game;
use crate::consts::breakout::*;
use crate::consts::{BALL_SIZE, HEIGHT, WIDTH};

/// The playfield as a rectangle
pub fn playfield() -> Rect {
    Rect::new(0.0, 0.0, WIDTH, HEIGHT)
}

/// A brick; static until the ball removes it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Layout row, 0 = top
    pub row: usize,
}

/// Full wall in row-major order: top row first, left to right.
/// Collision checks walk this order, so the upper-left brick wins ties.
pub fn brick_layout() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLUMNS);
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLUMNS {
            bricks.push(Brick {
                rect: Rect::new(
                    col as f32 * BRICK_WIDTH,
                    BRICK_TOP + row as f32 * BRICK_HEIGHT,
                    BRICK_WIDTH,
                    BRICK_HEIGHT,
                ),
                row,
            });
        }
    }
    bricks
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

    /// Recenter, heading up and to a random side
    pub fn serve(&mut self, signs: &mut dyn SignSource) {
        self.rect.set_center(Vec2::new(WIDTH / 2.0, HEIGHT / 2.0));
        self.vel = Vec2::new(BALL_SPEED * signs.next_sign(), -BALL_SPEED);
    }
}

/// How a Breakout session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakoutOutcome {
    /// Every brick cleared
    Won,
    /// Out of lives
    Lost,
}

impl BreakoutOutcome {
    /// Banner text for the game over screen
    pub fn banner(&self) -> &'static str {
        match self {
            BreakoutOutcome::Won => "You Win!",
            BreakoutOutcome::Lost => "Game Over",
        }
    }
}

/// Complete Breakout state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakoutState {
    pub paddle: Rect,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub score: u64,
    pub lives: u8,
}

impl Default for BreakoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakoutState {
    /// Full wall, centered paddle, ball at rest. Call [`Game::reset`] to serve.
    pub fn new() -> Self {
        Self {
            paddle: Rect::new(
                (WIDTH - PADDLE_WIDTH) / 2.0,
                PADDLE_Y,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            ball: Ball::new(),
            bricks: brick_layout(),
            score: 0,
            lives: STARTING_LIVES,
        }
    }

    /// Center the paddle under the pointer, kept on screen
    pub fn follow_pointer(&mut self, pointer_x: f32) {
        self.paddle.set_center_x(pointer_x);
        self.paddle.clamp_within(&playfield());
    }

    /// Move the ball one frame and resolve walls, misses, the paddle and bricks
    pub fn advance_ball(
        &mut self,
        signs: &mut dyn SignSource,
        events: &mut Vec<GameEvent>,
    ) -> Option<BreakoutOutcome> {
        let field = playfield();
        let ball = &mut self.ball;
        ball.rect.pos += ball.vel;

        // Side walls
        let hit_left = ball.rect.left() <= field.left() && ball.vel.x < 0.0;
        let hit_right = ball.rect.right() >= field.right() && ball.vel.x > 0.0;
        if hit_left || hit_right {
            ball.vel.x = reflect(ball.vel.x);
            events.push(GameEvent::WallBounce);
        }
        ball.rect.pos.x = ball
            .rect
            .pos
            .x
            .clamp(field.left(), field.right() - ball.rect.size.x);

        // Ceiling
        if ball.rect.top() <= field.top() && ball.vel.y < 0.0 {
            ball.vel.y = reflect(ball.vel.y);
            events.push(GameEvent::WallBounce);
        }
        ball.rect.pos.y = ball.rect.pos.y.max(field.top());

        // Floor: lose a life
        if ball.rect.bottom() >= field.bottom() {
            self.lives = self.lives.saturating_sub(1);
            events.push(GameEvent::LifeLost {
                remaining: self.lives,
            });
            if self.lives == 0 {
                return Some(BreakoutOutcome::Lost);
            }
            self.ball.serve(signs);
        }

        self.bounce_off_paddle(events);
        self.break_brick(events);

        self.bricks.is_empty().then_some(BreakoutOutcome::Won)
    }

    fn bounce_off_paddle(&mut self, events: &mut Vec<GameEvent>) {
        let ball = &mut self.ball;
        if ball.vel.y <= 0.0 || !ball.rect.overlaps(&self.paddle) {
            return;
        }

        ball.vel.y = reflect(ball.vel.y);
        let offset = self.paddle.offset_x(ball.rect.center().x);
        ball.vel.x = offset * ENGLISH;

        events.push(GameEvent::PaddleHit { side: None, offset });
    }

    /// Remove the first overlapping brick, if any
    fn break_brick(&mut self, events: &mut Vec<GameEvent>) {
        let ball = &mut self.ball;
        let Some(index) = self
            .bricks
            .iter()
            .position(|brick| brick.rect.overlaps(&ball.rect))
        else {
            return;
        };

        self.bricks.remove(index);
        ball.vel.y = reflect(ball.vel.y);
        self.score += BRICK_SCORE;

        events.push(GameEvent::BrickBroken {
            index,
            score: self.score,
        });
    }
}

impl Game for BreakoutState {
    type Outcome = BreakoutOutcome;

    fn reset(&mut self, signs: &mut dyn SignSource) {
        *self = Self::new();
        self.ball.serve(signs);
    }

    fn step(
        &mut self,
        pointer: Option<Vec2>,
        signs: &mut dyn SignSource,
        events: &mut Vec<GameEvent>,
    ) -> Option<BreakoutOutcome> {
        if let Some(pointer) = pointer {
            self.follow_pointer(pointer.x);
        }
        self.advance_ball(signs, events)
    }

    fn demo_pointer(&self) -> Vec2 {
        Vec2::new(self.ball.rect.center().x, self.paddle.center().y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedSigns;

    /// State with the ball placed at `center` moving at `vel`
    fn with_ball(center: Vec2, vel: Vec2) -> BreakoutState {
        let mut state = BreakoutState::new();
        state.ball.rect.set_center(center);
        state.ball.vel = vel;
        state
    }

    #[test]
    fn test_layout() {
        let bricks = brick_layout();
        assert_eq!(bricks.len(), 50);
        assert_eq!(bricks[0].rect, Rect::new(0.0, 50.0, 75.0, 30.0));
        assert_eq!(bricks[9].rect.left(), 675.0);
        assert_eq!(bricks[10].row, 1);
        assert_eq!(bricks[49].rect.bottom(), 50.0 + 5.0 * 30.0);
    }

    #[test]
    fn test_pointer_drives_paddle_and_is_clamped() {
        let mut state = BreakoutState::new();
        state.follow_pointer(200.0);
        assert_eq!(state.paddle.center().x, 200.0);
        assert_eq!(state.paddle.top(), PADDLE_Y);

        state.follow_pointer(10.0);
        assert_eq!(state.paddle.left(), 0.0);
        state.follow_pointer(WIDTH + 40.0);
        assert_eq!(state.paddle.right(), WIDTH);
    }

    #[test]
    fn test_side_wall_bounce() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = with_ball(Vec2::new(9.0, 400.0), Vec2::new(-5.0, 5.0));

        let mut events = Vec::new();
        assert_eq!(state.advance_ball(&mut signs, &mut events), None);

        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.ball.rect.left(), 0.0);
        assert_eq!(events, vec![GameEvent::WallBounce]);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = with_ball(Vec2::new(400.0, 10.0), Vec2::new(0.0, -5.0));
        state.bricks.clear();
        state.bricks.push(Brick {
            rect: Rect::new(0.0, 500.0, 10.0, 10.0),
            row: 0,
        });

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert_eq!(state.ball.vel.y, 5.0);
        assert_eq!(state.ball.rect.top(), 0.0);
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = BreakoutState::new();
        let center_x = state.paddle.center().x;
        state.ball.rect.set_center(Vec2::new(center_x, PADDLE_Y - 8.0));
        state.ball.vel = Vec2::new(0.0, 5.0);

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert_eq!(state.ball.vel, Vec2::new(0.0, -5.0));
        assert_eq!(
            events,
            vec![GameEvent::PaddleHit {
                side: None,
                offset: 0.0
            }]
        );
    }

    #[test]
    fn test_paddle_edge_hit_adds_english() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = BreakoutState::new();
        let left_quarter = state.paddle.left() + PADDLE_WIDTH / 4.0;
        state.ball.rect.set_center(Vec2::new(left_quarter, PADDLE_Y - 5.0));
        state.ball.vel = Vec2::new(0.0, 5.0);

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert_eq!(state.ball.vel.y, -5.0);
        assert!((state.ball.vel.x - (-0.5 * ENGLISH)).abs() < 1e-5);
    }

    #[test]
    fn test_one_brick_per_frame_upper_left_first() {
        let mut signs = ScriptedSigns::constant(1.0);
        // Straddles bricks 0 and 1 at the bottom of the first row
        let mut state = with_ball(Vec2::new(75.0, 85.0), Vec2::new(0.0, -5.0));

        let mut events = Vec::new();
        state.advance_ball(&mut signs, &mut events);

        assert_eq!(state.bricks.len(), 49);
        assert_eq!(state.bricks[0].rect.left(), 75.0);
        assert_eq!(state.score, BRICK_SCORE);
        assert_eq!(state.ball.vel.y, 5.0);
        assert_eq!(events, vec![GameEvent::BrickBroken { index: 0, score: 10 }]);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = with_ball(Vec2::new(400.0, 300.0), Vec2::new(0.0, -5.0));
        state.bricks = vec![Brick {
            rect: Rect::new(380.0, 280.0, 40.0, 10.0),
            row: 0,
        }];

        let mut events = Vec::new();
        let outcome = state.advance_ball(&mut signs, &mut events);

        assert_eq!(outcome, Some(BreakoutOutcome::Won));
        assert!(state.bricks.is_empty());
        assert_eq!(outcome.map(|o| o.banner()), Some("You Win!"));
    }

    #[test]
    fn test_miss_recenters_while_lives_remain() {
        let mut signs = ScriptedSigns::new([-1.0]);
        let mut state = with_ball(Vec2::new(100.0, HEIGHT - 9.0), Vec2::new(5.0, 5.0));

        let mut events = Vec::new();
        assert_eq!(state.advance_ball(&mut signs, &mut events), None);

        assert_eq!(state.lives, 2);
        assert_eq!(state.ball.rect.center(), Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(-5.0, -5.0));
        assert_eq!(events, vec![GameEvent::LifeLost { remaining: 2 }]);
    }

    #[test]
    fn test_last_life_ends_without_recentering() {
        let mut signs = ScriptedSigns::constant(1.0);
        let mut state = with_ball(Vec2::new(100.0, HEIGHT - 9.0), Vec2::new(5.0, 5.0));
        state.lives = 1;

        let mut events = Vec::new();
        let outcome = state.advance_ball(&mut signs, &mut events);

        assert_eq!(outcome, Some(BreakoutOutcome::Lost));
        assert_eq!(state.lives, 0);
        assert!(state.ball.rect.bottom() >= HEIGHT);
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_reset_restores_starting_values() {
        let mut signs = ScriptedSigns::constant(-1.0);
        let mut state = BreakoutState::new();
        state.bricks.truncate(3);
        state.score = 470;
        state.lives = 0;
        state.paddle.pos.x = 0.0;

        state.reset(&mut signs);

        assert_eq!(state.bricks, brick_layout());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.paddle.center().x, WIDTH / 2.0);
        assert_eq!(state.ball.vel, Vec2::new(-5.0, -5.0));
    }
}
