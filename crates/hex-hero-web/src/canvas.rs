use glam::Vec2;
use hex_hero::{CoverRect, ImageHandle, Rgba, Surface, HEX_SIDES};
use web_sys::CanvasRenderingContext2d;
use crate::loader::ImageStore;

/// [`Surface`] backed by a canvas 2D context.
/// Image handles are resolved against the loader's image store.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: ImageStore,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, images: ImageStore) -> Self {
        Self { ctx, images }
    }

    fn trace(&self, vertices: &[Vec2; HEX_SIDES]) {
        self.ctx.begin_path();
        for (i, v) in vertices.iter().enumerate() {
            if i == 0 {
                self.ctx.move_to(v.x as f64, v.y as f64);
            } else {
                self.ctx.line_to(v.x as f64, v.y as f64);
            }
        }
        self.ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, size: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_hexagon(&mut self, vertices: &[Vec2; HEX_SIDES], color: Rgba) {
        self.trace(vertices);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn draw_image_clipped(&mut self, vertices: &[Vec2; HEX_SIDES], image: ImageHandle, dest: CoverRect) {
        let images = self.images.borrow();
        let Some(element) = images.get(&image.id) else {
            return;
        };

        self.ctx.save();
        self.trace(vertices);
        self.ctx.clip();
        if let Err(err) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            element,
            dest.x as f64,
            dest.y as f64,
            dest.width as f64,
            dest.height as f64,
        ) {
            log::debug!("drawImage failed for image {}: {:?}", image.id, err);
        }
        self.ctx.restore();
    }

    fn stroke_hexagon(&mut self, vertices: &[Vec2; HEX_SIDES], color: Rgba, width: f32) {
        self.trace(vertices);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }
}
