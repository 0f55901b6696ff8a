//! Drawing seam between the simulation and a concrete 2D backend.
//!
//! The browser bridge implements [`Surface`] on a canvas 2D context.
//! [`CommandSurface`] records the same calls as data for headless hosts.

use glam::Vec2;
use crate::api::types::ImageHandle;
use crate::core::geometry::HEX_SIDES;
use super::style::Rgba;

/// Destination rectangle for an image drawn into a hexagon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit an image over the square of side `side` centered on `center`,
/// preserving aspect ratio and overflowing on one axis instead of letterboxing.
pub fn cover_rect(center: Vec2, side: f32, image_width: f32, image_height: f32) -> CoverRect {
    let aspect = if image_width > 0.0 && image_height > 0.0 {
        image_width / image_height
    } else {
        1.0
    };

    let mut width = side;
    let mut height = width / aspect;
    if height < side {
        height = side;
        width = height * aspect;
    }

    CoverRect {
        x: center.x - width / 2.0,
        y: center.y - height / 2.0,
        width,
        height,
    }
}

/// 2D drawing backend. All calls for one frame happen between two `clear`s.
pub trait Surface {
    /// Erase the whole drawing area.
    fn clear(&mut self, size: Vec2);

    /// Fill a hexagon outline with a flat color.
    fn fill_hexagon(&mut self, vertices: &[Vec2; HEX_SIDES], color: Rgba);

    /// Draw `image` into `dest`, clipped to the hexagon outline.
    fn draw_image_clipped(&mut self, vertices: &[Vec2; HEX_SIDES], image: ImageHandle, dest: CoverRect);

    /// Stroke the hexagon outline.
    fn stroke_hexagon(&mut self, vertices: &[Vec2; HEX_SIDES], color: Rgba, width: f32);
}

/// A recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { size: Vec2 },
    Fill { vertices: [Vec2; HEX_SIDES], color: Rgba },
    Image { vertices: [Vec2; HEX_SIDES], image: ImageHandle, dest: CoverRect },
    Stroke { vertices: [Vec2; HEX_SIDES], color: Rgba, width: f32 },
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct CommandSurface {
    pub commands: Vec<DrawCommand>,
}

impl CommandSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last `clear`.
    pub fn frame(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for CommandSurface {
    fn clear(&mut self, size: Vec2) {
        // Only the most recent frame is kept.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { size });
    }

    fn fill_hexagon(&mut self, vertices: &[Vec2; HEX_SIDES], color: Rgba) {
        self.commands.push(DrawCommand::Fill { vertices: *vertices, color });
    }

    fn draw_image_clipped(&mut self, vertices: &[Vec2; HEX_SIDES], image: ImageHandle, dest: CoverRect) {
        self.commands.push(DrawCommand::Image { vertices: *vertices, image, dest });
    }

    fn stroke_hexagon(&mut self, vertices: &[Vec2; HEX_SIDES], color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Stroke { vertices: *vertices, color, width });
    }
}
