//! CSS for the browser text layer
//!
//! Labels are laid out in percent of the playfield so they track the canvas
//! at any CSS size; only the font size needs the current scale.

use crate::consts::{HEIGHT, WIDTH};
use crate::renderer::{Label, TextAnchor};

/// Style for the layer itself: absolute within the canvas's containing
/// block, so it scrolls with the page. Offsets in CSS pixels.
pub fn overlay_css(left: i32, top: i32, width: i32, height: i32) -> String {
    format!(
        "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;pointer-events:none;",
        left, top, width, height
    )
}

/// Style for one label; `scale` is CSS pixels per playfield unit
pub fn label_css(label: &Label, scale: f32) -> String {
    let translate = match label.style.anchor {
        TextAnchor::TopLeft => "none",
        TextAnchor::TopCenter => "translateX(-50%)",
        TextAnchor::Center => "translate(-50%, -50%)",
    };
    format!(
        "position:absolute;left:{:.3}%;top:{:.3}%;transform:{};\
         font:{} {:.1}px monospace;color:{};white-space:nowrap;",
        label.pos.x / WIDTH * 100.0,
        label.pos.y / HEIGHT * 100.0,
        translate,
        if label.style.bold { "bold" } else { "normal" },
        label.style.size * scale,
        label.style.color.to_css(),
    )
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::renderer::TextStyle;
    use crate::renderer::colors::WHITE;

    #[test]
    fn test_overlay_follows_canvas_offsets() {
        let css = overlay_css(12, 340, 800, 600);

        assert!(css.starts_with("position:absolute;"));
        assert!(!css.contains("fixed"));
        assert!(css.contains("left:12px;top:340px;width:800px;height:600px;"));
        assert!(css.contains("pointer-events:none"));
    }

    #[test]
    fn test_label_position_is_relative_to_playfield() {
        let label = Label {
            text: "CPU WINS!".to_string(),
            pos: Vec2::new(WIDTH / 2.0, HEIGHT / 2.0),
            style: TextStyle::new(64.0, WHITE, TextAnchor::Center).bold(),
        };

        let css = label_css(&label, 0.5);
        assert!(css.contains("left:50.000%;top:50.000%;"));
        assert!(css.contains("translate(-50%, -50%)"));
        assert!(css.contains("font:bold 32.0px monospace"));
    }
}
