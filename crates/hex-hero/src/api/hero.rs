use glam::Vec2;
use crate::api::config::HeroConfig;
use crate::api::types::{ImageHandle, LoadTicket, SpriteId};
use crate::assets::catalog::Catalog;
use crate::assets::loader::{ImageLoader, LoadError};
use crate::core::simulation::Simulation;
use crate::input::pointer::{HoverChange, OverlayContext, PointerController, SurfaceRect};
use crate::input::queue::{InputEvent, InputQueue};
use crate::overlay::tooltip::TooltipView;
use crate::renderer::surface::Surface;

/// The hexagon field: built once at mount, torn down at unmount.
///
/// Owns every piece of state the animation needs, so there are no free
/// timers or closures holding on to sprites. Three callback sources drive it
/// in any interleaving: frames (`frame`), input (`push_input`), and image
/// completions (`complete_load`).
pub struct HexHero<L: ImageLoader> {
    config: HeroConfig,
    catalog: Catalog,
    sim: Simulation,
    pointer: PointerController,
    input: InputQueue,
    loader: L,
    tooltip: TooltipView,
    alive: bool,
}

impl<L: ImageLoader> HexHero<L> {
    /// Build the field and its first sprite pool.
    pub fn new(config: HeroConfig, catalog: Catalog, loader: L, viewport: Vec2, seed: u64) -> Self {
        let seed = config.seed.unwrap_or(seed);
        let mut hero = Self {
            config,
            catalog,
            sim: Simulation::new(seed),
            pointer: PointerController::new(),
            input: InputQueue::new(),
            loader,
            tooltip: TooltipView::default(),
            alive: true,
        };
        hero.rebuild(viewport);
        hero
    }

    /// Replace the catalog. Rebuilds the pool.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        if !self.alive {
            return;
        }
        self.catalog = catalog;
        let viewport = self.sim.viewport();
        self.rebuild(viewport);
    }

    /// Resize immediately. Rebuilds the pool; positions are not preserved.
    pub fn resize(&mut self, viewport: Vec2) {
        if !self.alive {
            return;
        }
        self.rebuild(viewport);
    }

    pub fn set_surface_rect(&mut self, rect: SurfaceRect) {
        self.pointer.set_surface_rect(rect);
    }

    /// Size of the client viewport the overlay is placed in.
    pub fn set_client_viewport(&mut self, size: Vec2) {
        self.pointer.set_client_viewport(size);
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.alive {
            self.input.push(event);
        }
    }

    /// Apply queued input, then advance and draw one frame.
    /// Returns whether the host should schedule another frame.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.alive {
            return false;
        }
        for event in self.input.drain_coalesced() {
            self.handle_input(event);
        }
        self.sim.tick(surface, &self.config)
    }

    /// Apply one input event right away.
    pub fn handle_input(&mut self, event: InputEvent) -> HoverChange {
        if !self.alive {
            return HoverChange::Unchanged;
        }
        match event {
            InputEvent::PointerMove { client_x, client_y } => {
                let viewport = self.pointer.client_viewport(self.sim.viewport());
                self.pointer.pointer_move(
                    Vec2::new(client_x, client_y),
                    &mut self.sim,
                    &mut self.loader,
                    OverlayContext {
                        config: &self.config,
                        catalog: &self.catalog,
                        tooltip: &mut self.tooltip,
                        viewport,
                    },
                )
            }
            InputEvent::PointerLeave => self.pointer.pointer_leave(&mut self.sim, &mut self.tooltip),
            InputEvent::Resize { width, height } => {
                self.rebuild(Vec2::new(width, height));
                HoverChange::Unchanged
            }
        }
    }

    /// Report the outcome of an image request. Ignored after teardown or
    /// when the pool that issued the ticket has been replaced.
    /// Returns whether the result was applied; the host may free the image
    /// when it was not.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<ImageHandle, LoadError>) -> bool {
        if !self.alive {
            return false;
        }
        if let Err(err) = &result {
            log::warn!("{err}");
        }
        self.sim.complete_load(ticket, result)
    }

    /// Re-place the overlay with the height the host measured.
    pub fn remeasure_tooltip(&mut self, measured_height: f32) {
        let viewport = self.pointer.client_viewport(self.sim.viewport());
        self.tooltip.remeasure(measured_height, &self.config.tooltip, viewport);
    }

    /// Stop the loop, drop the pool, and detach pending loads.
    /// Every later call is a no-op.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.pointer.reset(&mut self.tooltip);
        self.input.drain();
        self.sim.stop();
        self.loader.reset();
        log::info!("hex field torn down");
    }

    fn rebuild(&mut self, viewport: Vec2) {
        self.pointer.reset(&mut self.tooltip);
        self.sim.initialize(&self.catalog, viewport, &self.config, &mut self.loader);
    }

    // -- Accessors --

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn hovered(&self) -> Option<SpriteId> {
        self.pointer.hovered()
    }

    pub fn tooltip(&self) -> &TooltipView {
        &self.tooltip
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ImageTier;
    use crate::assets::loader::ManualLoader;
    use crate::renderer::surface::CommandSurface;

    fn hero(n: usize) -> HexHero<ManualLoader> {
        let catalog = Catalog::new(
            (0..n)
                .map(|i| format!("https://h/storage/v1/object/public/b/{i}.jpg"))
                .collect(),
        );
        HexHero::new(HeroConfig::default(), catalog, ManualLoader::new(), Vec2::new(800.0, 600.0), 17)
    }

    #[test]
    fn config_seed_overrides_host_seed() {
        let config = HeroConfig { seed: Some(5), ..Default::default() };
        let a = HexHero::new(config.clone(), Catalog::default(), ManualLoader::new(), Vec2::new(800.0, 600.0), 1);
        let b = HexHero::new(config, Catalog::default(), ManualLoader::new(), Vec2::new(800.0, 600.0), 2);
        let pa: Vec<_> = a.simulation().sprites().iter().map(|s| s.pos).collect();
        let pb: Vec<_> = b.simulation().sprites().iter().map(|s| s.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn frame_applies_queued_input_then_draws() {
        let mut hero = hero(2);
        let target = hero.simulation().sprites()[1].pos;
        hero.simulation_mut().sprites_mut()[0].pos = Vec2::new(-500.0, -500.0);
        hero.push_input(InputEvent::PointerMove { client_x: 0.0, client_y: 0.0 });
        hero.push_input(InputEvent::PointerMove { client_x: target.x, client_y: target.y });

        let mut surface = CommandSurface::new();
        assert!(hero.frame(&mut surface));
        assert_eq!(hero.hovered(), Some(SpriteId(1)));
        assert!(hero.simulation().sprites()[1].hovered);
        // Clear, fill for sprite 0, fill + stroke for hovered sprite 1.
        assert_eq!(surface.frame().len(), 4);
    }

    #[test]
    fn resize_event_rebuilds_and_drops_hover() {
        let mut hero = hero(3);
        let target = hero.simulation().sprites()[0].pos;
        hero.handle_input(InputEvent::PointerMove { client_x: target.x, client_y: target.y });
        assert!(hero.hovered().is_some());
        let generation = hero.simulation().generation();

        hero.handle_input(InputEvent::Resize { width: 1280.0, height: 720.0 });
        assert_eq!(hero.hovered(), None);
        assert_eq!(hero.simulation().generation(), generation + 1);
        assert_eq!(hero.simulation().viewport(), Vec2::new(1280.0, 720.0));
        assert!(hero.simulation().sprites().iter().all(|s| !s.hovered));
        assert!(hero.simulation().sprites().iter().all(|s| s.radius() <= 60.0));
    }

    #[test]
    fn resize_burst_rebuilds_once_per_frame() {
        let mut hero = hero(3);
        let generation = hero.simulation().generation();
        let resets = hero.loader().resets();
        hero.loader_mut().take_pending();

        for i in 1..=10 {
            hero.push_input(InputEvent::Resize { width: 800.0 + 10.0 * i as f32, height: 600.0 });
        }
        hero.frame(&mut CommandSurface::new());

        assert_eq!(hero.simulation().generation(), generation + 1);
        assert_eq!(hero.loader().resets(), resets + 1);
        assert_eq!(hero.simulation().viewport(), Vec2::new(900.0, 600.0));
        // Only the surviving pool asked for thumbnails.
        assert_eq!(hero.loader().pending().len(), 3);
    }

    #[test]
    fn tooltip_stays_inside_client_viewport() {
        let url = "https://h/storage/v1/object/public/b/0.jpg";
        let catalog = Catalog::new(vec![url.to_string()]).with_info(url, "soap");
        let mut hero =
            HexHero::new(HeroConfig::default(), catalog, ManualLoader::new(), Vec2::new(800.0, 600.0), 17);
        hero.set_client_viewport(Vec2::new(400.0, 600.0));
        hero.simulation_mut().sprites_mut()[0].pos = Vec2::new(200.0, 300.0);

        hero.handle_input(InputEvent::PointerMove { client_x: 200.0, client_y: 300.0 });
        assert!(hero.tooltip().visible);
        // 200 + 20 + 300 + 32 overflows 400, so the overlay flips left.
        assert_eq!(hero.tooltip().position.x, 200.0 - 300.0 - 52.0);
    }

    #[test]
    fn set_catalog_rebuilds_pool() {
        let mut hero = hero(3);
        hero.set_catalog(Catalog::new(vec!["https://cdn.example.com/a.png".into()]));
        assert_eq!(hero.simulation().len(), 1);
        let pending = hero.loader().pending();
        // Non-storage URL is requested as-is.
        assert_eq!(pending.last().map(|(_, url)| url.as_str()), Some("https://cdn.example.com/a.png"));
    }

    #[test]
    fn high_quality_failure_allows_retry_on_next_hover() {
        let mut hero = hero(1);
        hero.loader_mut().take_pending();
        let target = hero.simulation().sprites()[0].pos;
        let away = Vec2::new(target.x + 500.0, target.y + 500.0);

        hero.handle_input(InputEvent::PointerMove { client_x: target.x, client_y: target.y });
        let (ticket, url) = hero.loader_mut().take_pending().remove(0);
        assert_eq!(ticket.tier, ImageTier::High);
        assert!(hero.complete_load(ticket, Err(LoadError::new(url, "network"))));

        hero.handle_input(InputEvent::PointerMove { client_x: away.x, client_y: away.y });
        hero.handle_input(InputEvent::PointerMove { client_x: target.x, client_y: target.y });
        assert_eq!(hero.loader().pending().len(), 1);
    }

    #[test]
    fn teardown_stops_everything() {
        let mut hero = hero(3);
        let pending = hero.loader_mut().take_pending();
        hero.teardown();

        assert!(!hero.is_alive());
        assert!(!hero.frame(&mut CommandSurface::new()));
        assert!(!hero.complete_load(pending[0].0, Ok(ImageHandle::new(1, 1.0, 1.0))));
        assert!(hero.simulation().is_empty());
        assert_eq!(hero.loader().resets(), 2);

        hero.push_input(InputEvent::PointerLeave);
        hero.resize(Vec2::new(10.0, 10.0));
        assert!(hero.simulation().is_empty());
    }
}
