//! Renderer-agnostic draw list
//!
//! The creature describes each frame as an ordered list of `DrawCommand`s.
//! Whatever owns the window implements `DrawTarget` and replays them in order.

use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS colour string for canvas fill/stroke styles
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }

    /// Bytes reinterpreted as a little-endian `0xAABBGGRR` word
    pub fn to_packed(self) -> u32 {
        u32::from_le_bytes(bytemuck::cast(self))
    }
}

impl From<[u8; 3]> for Rgba {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgba::rgb(r, g, b)
    }
}

/// One primitive in back-to-front order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the whole frame
    Clear { color: Rgba },
    /// Closed polygon, filled then outlined
    Polygon {
        points: Vec<Vec2>,
        fill: Rgba,
        outline: Rgba,
        thickness: f32,
    },
    /// Rectangle centred on `center`, rotated by `rotation` radians
    Rect {
        center: Vec2,
        size: Vec2,
        rotation: f32,
        fill: Rgba,
    },
    Circle { center: Vec2, radius: f32, fill: Rgba },
}

/// Consumer of a frame's draw list (canvas, test recorder, ...)
pub trait DrawTarget {
    /// Draw one command on top of everything submitted so far this frame
    fn submit(&mut self, command: &DrawCommand);

    /// Finish the frame
    fn present(&mut self) {}
}

/// Collects submitted commands; handy for headless use and tests
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
    pub frames: usize,
}

impl DrawTarget for Recorder {
    fn submit(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        assert_eq!(Rgba::rgb(58, 124, 165).to_css(), "rgba(58, 124, 165, 1)");
        let half = Rgba { a: 0, ..Rgba::WHITE };
        assert_eq!(half.to_css(), "rgba(255, 255, 255, 0)");
    }

    #[test]
    fn test_packed_byte_order() {
        assert_eq!(Rgba::rgb(0x11, 0x22, 0x33).to_packed(), 0xFF33_2211);
    }

    #[test]
    fn test_alpha_defaults_to_opaque() {
        let c: Rgba = serde_json::from_str(r#"{ "r": 1, "g": 2, "b": 3 }"#).unwrap();
        assert_eq!(c, Rgba::rgb(1, 2, 3));
    }

    #[test]
    fn test_command_json_is_tagged() {
        let cmd = DrawCommand::Circle {
            center: Vec2::new(1.0, 2.0),
            radius: 3.0,
            fill: Rgba::WHITE,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["kind"], "circle");
        assert_eq!(json["center"], serde_json::json!([1.0, 2.0]));
    }
}
