//! Retro Arcade - Pong and Breakout in the old grayscale style
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `renderer`: Draw command sink, scenes and the WebGPU pipeline
//! - `audio`: Tone playback (Web Audio in the browser, silent/logging elsewhere)
//! - `app`: The top-level object tying a session to its collaborators
//! - `platform`: Browser/native frame loops and pacing
//! - `settings`: Persisted preferences

pub mod app;
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{Arcade, FrameStatus};
pub use error::{PlatformError, SettingsError};
pub use settings::{GameKind, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Target frame rate; one simulation step per frame
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const FRAME_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Ball edge length (both games)
    pub const BALL_SIZE: f32 = 15.0;

    /// Pong tuning
    pub mod pong {
        pub const PADDLE_WIDTH: f32 = 15.0;
        pub const PADDLE_HEIGHT: f32 = 100.0;
        /// Gap between each paddle and its side wall
        pub const PADDLE_INSET: f32 = 30.0;
        /// AI paddle step per frame
        pub const AI_SPEED: f32 = 5.0;
        pub const BALL_SPEED_X: f32 = 5.0;
        pub const BALL_SPEED_Y: f32 = 5.0;
        /// Horizontal speed growth per paddle hit (multiplicative, unbounded)
        pub const SPEED_GROWTH: f32 = 1.05;
        /// Scales contact offset into the bounce angle
        pub const ANGLE_FACTOR: f32 = 0.8;
        pub const WINNING_SCORE: u32 = 10;
    }

    /// Breakout tuning
    pub mod breakout {
        pub const PADDLE_WIDTH: f32 = 100.0;
        pub const PADDLE_HEIGHT: f32 = 20.0;
        /// Paddle top edge
        pub const PADDLE_Y: f32 = super::HEIGHT - 50.0;
        pub const BALL_SPEED: f32 = 5.0;
        /// Horizontal speed at the paddle edge (offset 1.0)
        pub const ENGLISH: f32 = 7.0;
        pub const BRICK_WIDTH: f32 = 75.0;
        pub const BRICK_HEIGHT: f32 = 30.0;
        pub const BRICK_ROWS: usize = 5;
        pub const BRICK_COLUMNS: usize = (super::WIDTH / BRICK_WIDTH) as usize;
        /// Top edge of the first brick row
        pub const BRICK_TOP: f32 = 50.0;
        pub const BRICK_SCORE: u64 = 10;
        pub const STARTING_LIVES: u8 = 3;
        /// Frames the result stays up before an automatic restart
        pub const AUTO_RESTART_FRAMES: u32 = 3 * super::FPS;
    }
}
