use glam::Vec2;
use crate::api::config::HeroConfig;
use crate::api::types::{ImageHandle, ImageTier, LoadTicket, SpriteId};
use crate::assets::loader::LoadError;
use crate::core::geometry::hexagon_vertices;
use crate::renderer::style::{border_color, fallback_fill};
use crate::renderer::surface::{cover_rect, Surface};

/// Load state of one image tier.
///
/// Low tier: `Idle -> Loading -> Loaded | Failed`; `Failed` is terminal.
/// High tier: `Idle -> Loading -> Loaded | Idle`; a failure re-arms the request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TierState {
    #[default]
    Idle,
    Loading,
    Loaded(ImageHandle),
    Failed,
}

impl TierState {
    pub fn is_loading(&self) -> bool {
        matches!(self, TierState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, TierState::Loaded(_))
    }

    pub fn handle(&self) -> Option<ImageHandle> {
        match self {
            TierState::Loaded(handle) => Some(*handle),
            _ => None,
        }
    }
}

/// A floating, image-textured hexagon.
#[derive(Debug, Clone)]
pub struct HexSprite {
    /// Position in the pool.
    pub id: SpriteId,
    /// Center in surface pixels.
    pub pos: Vec2,
    /// Pixels per frame. Only the sign of each component ever changes.
    pub vel: Vec2,
    /// Static depth in (0.5, 1.0). Scales radius and fallback opacity.
    pub depth: f32,
    /// Animated size factor, smoothed toward the rest or hover target.
    pub scale: f32,
    /// Set only by the pointer controller. Freezes motion while true.
    pub hovered: bool,
    /// Source image, also the key into catalog metadata.
    pub source_url: Option<String>,
    /// Health score copied from the catalog at creation.
    pub score: Option<f32>,
    /// Thumbnail tier.
    pub low: TierState,
    /// Full-size tier.
    pub high: TierState,
    radius: f32,
}

impl HexSprite {
    pub fn new(id: SpriteId, pos: Vec2, vel: Vec2, depth: f32, base_radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            depth,
            scale: 1.0,
            hovered: false,
            source_url: None,
            score: None,
            low: TierState::Idle,
            high: TierState::Idle,
            radius: base_radius * depth,
        }
    }

    // -- Builder pattern --

    pub fn with_source(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn with_score(mut self, score: Option<f32>) -> Self {
        self.score = score;
        self
    }

    /// Radius fixed at creation.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Radius used for hit testing: base radius times the current scale.
    pub fn hit_radius(&self) -> f32 {
        self.radius * self.scale
    }

    /// Radius used for drawing. Hovered sprites are forced to a fixed multiple.
    pub fn draw_radius(&self, hover_multiplier: f32) -> f32 {
        if self.hovered {
            self.radius * hover_multiplier
        } else {
            self.radius * self.scale
        }
    }

    /// Advance one frame: move and bounce unless hovered, then ease the scale.
    pub fn step(&mut self, viewport: Vec2, config: &HeroConfig) {
        if !self.hovered {
            self.pos += self.vel;

            if self.pos.x - self.radius < 0.0 || self.pos.x + self.radius > viewport.x {
                self.vel.x = -self.vel.x;
            }
            if self.pos.y - self.radius < 0.0 || self.pos.y + self.radius > viewport.y {
                self.vel.y = -self.vel.y;
            }
        }

        let target = if self.hovered { config.hover_scale } else { config.rest_scale };
        self.scale += (target - self.scale) * config.smoothing;
    }

    /// Advance one frame and draw the result.
    pub fn update(&mut self, surface: &mut dyn Surface, viewport: Vec2, config: &HeroConfig) {
        self.step(viewport, config);
        self.draw(surface, config);
    }

    /// Image to draw this frame: full-size while hovered and available,
    /// otherwise the thumbnail, otherwise nothing.
    pub fn select_image(&self) -> Option<ImageHandle> {
        match (self.hovered, self.high.handle(), self.low.handle()) {
            (true, Some(high), _) => Some(high),
            (_, _, low) => low,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, config: &HeroConfig) {
        let radius = self.draw_radius(config.hover_draw_multiplier);
        let vertices = hexagon_vertices(self.pos, radius);

        match self.select_image() {
            Some(image) => {
                let dest = cover_rect(self.pos, radius * 2.0, image.width, image.height);
                surface.draw_image_clipped(&vertices, image, dest);
            }
            None => surface.fill_hexagon(&vertices, fallback_fill(self.depth)),
        }

        if self.hovered {
            surface.stroke_hexagon(&vertices, border_color(self.score), config.border_width);
        }
    }

    /// Mark the thumbnail as loading and return its ticket.
    /// `None` when the sprite has no source or the tier was already requested.
    pub fn begin_low_load(&mut self, generation: u32) -> Option<LoadTicket> {
        self.source_url.as_ref()?;
        if self.low != TierState::Idle {
            return None;
        }
        self.low = TierState::Loading;
        Some(self.ticket(generation, ImageTier::Low))
    }

    /// Mark the full-size image as loading and return its ticket.
    /// Idempotent: `None` while already loading or loaded.
    pub fn begin_high_load(&mut self, generation: u32) -> Option<LoadTicket> {
        self.source_url.as_ref()?;
        if self.high.is_loading() || self.high.is_loaded() {
            return None;
        }
        self.high = TierState::Loading;
        Some(self.ticket(generation, ImageTier::High))
    }

    /// Apply a load outcome to the matching tier.
    pub fn finish_load(&mut self, tier: ImageTier, result: Result<ImageHandle, LoadError>) {
        match (tier, result) {
            (ImageTier::Low, Ok(handle)) => self.low = TierState::Loaded(handle),
            (ImageTier::Low, Err(_)) => self.low = TierState::Failed,
            (ImageTier::High, Ok(handle)) => self.high = TierState::Loaded(handle),
            (ImageTier::High, Err(_)) => self.high = TierState::Idle,
        }
    }

    fn ticket(&self, generation: u32, tier: ImageTier) -> LoadTicket {
        LoadTicket {
            generation,
            sprite: self.id,
            tier,
        }
    }
}
