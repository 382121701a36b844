//! Rendering module
//!
//! Scenes describe a frame through [`RenderSink`]; backends decide how it
//! reaches the screen. The WebGPU backend draws shapes as triangles and hands
//! text to the page as DOM labels. [`Frame`] records commands for tests and
//! the headless runner.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::Rect;

pub use pipeline::RenderState;
pub use scene::Scene;
pub use vertex::{Color, Vertex, colors};

/// Which point of the text `Label::pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    Center,
}

/// Font size, color and anchoring of a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Pixel height
    pub size: f32,
    pub color: Color,
    pub anchor: TextAnchor,
    pub bold: bool,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color, anchor: TextAnchor) -> Self {
        Self {
            size,
            color,
            anchor,
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

/// A piece of text placed on the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

/// Destination for one frame of drawing
pub trait RenderSink {
    /// Start a frame filled with `color`
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Ellipse inscribed in `rect`
    fn fill_ellipse(&mut self, rect: Rect, color: Color);
    /// Border drawn inside `rect`
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);
    fn text(&mut self, text: &str, pos: Vec2, style: TextStyle);
    /// Show the frame
    fn present(&mut self);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rect, Color),
    FillEllipse(Rect, Color),
    StrokeRect(Rect, f32, Color),
    Text(Label),
}

/// Render sink that keeps the commands of the latest frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    commands: Vec<DrawCommand>,
    presented: u64,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(label) => Some(label),
            _ => None,
        })
    }

    /// Text of every label, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.labels().map(|label| label.text.as_str()).collect()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.labels().any(|label| label.text == text)
    }

    /// Filled rectangles drawn in `color`
    pub fn filled(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect(rect, c) if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for Frame {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillEllipse(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect(rect, width, color));
    }

    fn text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text(Label {
            text: text.to_string(),
            pos,
            style,
        }));
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}
