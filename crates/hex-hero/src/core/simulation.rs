use glam::Vec2;
use crate::api::config::HeroConfig;
use crate::api::types::{ImageHandle, LoadTicket, SpriteId};
use crate::assets::catalog::Catalog;
use crate::assets::loader::{ImageLoader, LoadError};
use crate::assets::variant::derive_variant_url;
use crate::components::sprite::HexSprite;
use crate::core::rng::Rng;
use crate::renderer::surface::Surface;

/// Owns the sprite pool and advances it one frame at a time.
///
/// The pool is only ever replaced as a whole (`initialize`); between rebuilds
/// sprites are mutated in place and never added or removed.
pub struct Simulation {
    sprites: Vec<HexSprite>,
    viewport: Vec2,
    running: bool,
    /// Bumped on every rebuild so stale load completions can be recognised.
    generation: u32,
    rng: Rng,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        Self {
            sprites: Vec::new(),
            viewport: Vec2::ZERO,
            running: true,
            generation: 0,
            rng: Rng::new(seed),
        }
    }

    /// Discard the pool and build a fresh one for `catalog` inside `viewport`.
    /// Each sprite requests its thumbnail immediately.
    pub fn initialize(
        &mut self,
        catalog: &Catalog,
        viewport: Vec2,
        config: &HeroConfig,
        loader: &mut dyn ImageLoader,
    ) {
        loader.reset();
        self.sprites.clear();
        self.viewport = viewport;
        self.running = true;
        self.generation = self.generation.wrapping_add(1);

        let count = config.pool_size(catalog.image_urls.len());
        let base_radius = config.base_radius(viewport.x);
        self.sprites.reserve(count);

        for i in 0..count {
            let pos = Vec2::new(
                self.rng.next_f32() * viewport.x,
                self.rng.next_f32() * viewport.y,
            );
            let vel = Vec2::new(
                self.rng.range(-config.max_speed, config.max_speed),
                self.rng.range(-config.max_speed, config.max_speed),
            );
            let depth = self.next_depth();

            let mut sprite = HexSprite::new(SpriteId(i as u32), pos, vel, depth, base_radius);
            if let Some(url) = catalog.image_urls.get(i) {
                sprite = sprite.with_source(url.as_str()).with_score(catalog.score_for(url));
            }

            if let Some(ticket) = sprite.begin_low_load(self.generation) {
                if let Some(url) = &sprite.source_url {
                    loader.request(ticket, &derive_variant_url(url, config.low_quality));
                }
            }
            self.sprites.push(sprite);
        }

        log::debug!(
            "sprite pool rebuilt: {} sprites, viewport {}x{}, generation {}",
            count,
            viewport.x,
            viewport.y,
            self.generation
        );
    }

    /// Depth in the open interval (0.5, 1.0).
    fn next_depth(&mut self) -> f32 {
        loop {
            let depth = 0.5 + self.rng.next_f32() * 0.5;
            if depth > 0.5 && depth < 1.0 {
                return depth;
            }
        }
    }

    /// Clear the surface, then update and draw every sprite in pool order.
    /// Returns whether the host should schedule another frame.
    pub fn tick(&mut self, surface: &mut dyn Surface, config: &HeroConfig) -> bool {
        if !self.running {
            return false;
        }
        surface.clear(self.viewport);
        for sprite in &mut self.sprites {
            sprite.update(surface, self.viewport, config);
        }
        true
    }

    /// Apply a load completion. Completions for an older pool are ignored.
    /// Returns whether the result was applied.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<ImageHandle, LoadError>) -> bool {
        if ticket.generation != self.generation {
            log::debug!("dropping stale image load for {:?}", ticket.sprite);
            return false;
        }
        match self.sprites.get_mut(ticket.sprite.index()) {
            Some(sprite) => {
                sprite.finish_load(ticket.tier, result);
                true
            }
            None => false,
        }
    }

    /// Stop the loop and drop the pool. Late completions become stale.
    pub fn stop(&mut self) {
        self.running = false;
        self.sprites.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn sprites(&self) -> &[HexSprite] {
        &self.sprites
    }

    pub fn sprites_mut(&mut self) -> &mut [HexSprite] {
        &mut self.sprites
    }

    pub fn get(&self, id: SpriteId) -> Option<&HexSprite> {
        self.sprites.get(id.index())
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut HexSprite> {
        self.sprites.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
