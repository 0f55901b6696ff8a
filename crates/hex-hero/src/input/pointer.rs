use glam::Vec2;
use crate::api::config::HeroConfig;
use crate::api::types::SpriteId;
use crate::assets::catalog::Catalog;
use crate::assets::loader::ImageLoader;
use crate::assets::variant::derive_variant_url;
use crate::core::geometry::is_point_in_hexagon;
use crate::core::simulation::Simulation;
use crate::overlay::tooltip::TooltipView;

/// Where the drawing surface is displayed, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Map a client point to surface pixels, accounting for a backing
    /// resolution that differs from the displayed size.
    pub fn to_surface(&self, client: Vec2, backing: Vec2) -> Vec2 {
        let sx = if self.width > 0.0 { backing.x / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { backing.y / self.height } else { 1.0 };
        Vec2::new((client.x - self.left) * sx, (client.y - self.top) * sy)
    }
}

/// Result of processing one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    /// Hover target did not change.
    Unchanged,
    /// A new sprite became hovered. Carries the previous one, if any.
    Entered { sprite: SpriteId, previous: Option<SpriteId> },
    /// The pointer left every sprite.
    Left { previous: SpriteId },
}

/// Tracks which sprite is under the pointer.
///
/// The only state kept between events is the hovered sprite; the sprites'
/// own `hovered` flags mirror it, and at most one of them is ever set.
#[derive(Debug, Default)]
pub struct PointerController {
    hovered: Option<SpriteId>,
    rect: Option<SurfaceRect>,
    client_viewport: Option<Vec2>,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<SpriteId> {
        self.hovered
    }

    /// Record where the surface is displayed. Without a rect, client and
    /// surface coordinates are taken to be the same.
    pub fn set_surface_rect(&mut self, rect: SurfaceRect) {
        self.rect = Some(rect);
    }

    /// Record the size of the client (page) viewport the overlay lives in.
    pub fn set_client_viewport(&mut self, size: Vec2) {
        self.client_viewport = Some(size);
    }

    /// Bounds the overlay is kept inside. Falls back to `surface_size` when
    /// the host never reported a client viewport.
    pub fn client_viewport(&self, surface_size: Vec2) -> Vec2 {
        self.client_viewport.unwrap_or(surface_size)
    }

    pub fn surface_point(&self, client: Vec2, backing: Vec2) -> Vec2 {
        match &self.rect {
            Some(rect) => rect.to_surface(client, backing),
            None => client,
        }
    }

    /// First sprite in pool order whose current outline contains `point`.
    ///
    /// Pool order is the priority: sprites are not sorted by depth, so a
    /// visually nearer sprite later in the pool loses an overlap.
    pub fn hit_test(sim: &Simulation, point: Vec2) -> Option<SpriteId> {
        sim.sprites()
            .iter()
            .find(|s| is_point_in_hexagon(point, s.pos, s.hit_radius()))
            .map(|s| s.id)
    }

    /// Handle a pointer move in client coordinates.
    ///
    /// On entering a new sprite: moves the hover flag, requests the sprite's
    /// full-size image, and fills the overlay. On leaving every sprite: clears
    /// the flag and hides the overlay.
    pub fn pointer_move(
        &mut self,
        client: Vec2,
        sim: &mut Simulation,
        loader: &mut dyn ImageLoader,
        overlay: OverlayContext<'_>,
    ) -> HoverChange {
        let point = self.surface_point(client, sim.viewport());
        match Self::hit_test(sim, point) {
            Some(id) if self.hovered == Some(id) => HoverChange::Unchanged,
            Some(id) => {
                let previous = self.set_hovered(sim, Some(id));
                Self::request_high_quality(sim, id, loader, overlay.config);
                Self::fill_tooltip(sim, id, client, overlay);
                log::debug!("hover enter {:?} (previous {:?})", id, previous);
                HoverChange::Entered { sprite: id, previous }
            }
            None => self.leave(sim, overlay.tooltip),
        }
    }

    /// Handle the pointer leaving the surface entirely.
    pub fn pointer_leave(&mut self, sim: &mut Simulation, tooltip: &mut TooltipView) -> HoverChange {
        self.leave(sim, tooltip)
    }

    /// Forget the hovered sprite without touching the pool, which is about to
    /// be discarded.
    pub fn reset(&mut self, tooltip: &mut TooltipView) {
        self.hovered = None;
        tooltip.hide();
    }

    fn leave(&mut self, sim: &mut Simulation, tooltip: &mut TooltipView) -> HoverChange {
        match self.set_hovered(sim, None) {
            Some(previous) => {
                tooltip.hide();
                log::debug!("hover leave {:?}", previous);
                HoverChange::Left { previous }
            }
            None => HoverChange::Unchanged,
        }
    }

    /// Move the hover flag. Returns the previously hovered sprite.
    fn set_hovered(&mut self, sim: &mut Simulation, next: Option<SpriteId>) -> Option<SpriteId> {
        let previous = self.hovered.take();
        if let Some(sprite) = previous.and_then(|id| sim.get_mut(id)) {
            sprite.hovered = false;
        }
        if let Some(sprite) = next.and_then(|id| sim.get_mut(id)) {
            sprite.hovered = true;
            self.hovered = next;
        }
        previous
    }

    fn request_high_quality(sim: &mut Simulation, id: SpriteId, loader: &mut dyn ImageLoader, config: &HeroConfig) {
        let generation = sim.generation();
        let Some(sprite) = sim.get_mut(id) else {
            return;
        };
        if let Some(ticket) = sprite.begin_high_load(generation) {
            if let Some(url) = &sprite.source_url {
                loader.request(ticket, &derive_variant_url(url, config.high_quality));
            }
        }
    }

    fn fill_tooltip(sim: &Simulation, id: SpriteId, client: Vec2, overlay: OverlayContext<'_>) {
        let Some(sprite) = sim.get(id) else {
            return;
        };
        let Some(url) = sprite.source_url.as_deref() else {
            overlay.tooltip.hide();
            return;
        };
        let thumbnail = sprite
            .low
            .is_loaded()
            .then(|| derive_variant_url(url, overlay.config.low_quality));
        overlay.tooltip.show(
            client,
            thumbnail,
            overlay.catalog.info_for(url).to_string(),
            sprite.score,
            &overlay.config.tooltip,
            overlay.viewport,
        );
    }
}

/// What the pointer controller needs to populate the overlay.
pub struct OverlayContext<'a> {
    pub config: &'a HeroConfig,
    pub catalog: &'a Catalog,
    pub tooltip: &'a mut TooltipView,
    /// Client viewport size, for keeping the overlay on screen.
    pub viewport: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ImageTier;
    use crate::assets::loader::ManualLoader;

    struct Fixture {
        sim: Simulation,
        loader: ManualLoader,
        config: HeroConfig,
        catalog: Catalog,
        tooltip: TooltipView,
        pointer: PointerController,
    }

    impl Fixture {
        fn new(n: usize) -> Self {
            let config = HeroConfig::default();
            let catalog = Catalog::new(
                (0..n)
                    .map(|i| format!("https://h/storage/v1/object/public/b/{i}.jpg"))
                    .collect(),
            )
            .with_info("https://h/storage/v1/object/public/b/0.jpg", "first");
            let mut loader = ManualLoader::new();
            let mut sim = Simulation::new(3);
            sim.initialize(&catalog, Vec2::new(800.0, 600.0), &config, &mut loader);
            loader.take_pending();
            Self {
                sim,
                loader,
                config,
                catalog,
                tooltip: TooltipView::default(),
                pointer: PointerController::new(),
            }
        }

        /// Spread sprites out so they do not overlap.
        fn spread(mut self) -> Self {
            for (i, s) in self.sim.sprites_mut().iter_mut().enumerate() {
                s.pos = Vec2::new(100.0 + 150.0 * i as f32, 300.0);
            }
            self
        }

        fn move_to(&mut self, p: Vec2) -> HoverChange {
            self.pointer.pointer_move(
                p,
                &mut self.sim,
                &mut self.loader,
                OverlayContext {
                    config: &self.config,
                    catalog: &self.catalog,
                    tooltip: &mut self.tooltip,
                    viewport: Vec2::new(800.0, 600.0),
                },
            )
        }

        fn hovered_count(&self) -> usize {
            self.sim.sprites().iter().filter(|s| s.hovered).count()
        }
    }

    #[test]
    fn surface_rect_scales_to_backing() {
        let rect = SurfaceRect::new(10.0, 20.0, 400.0, 300.0);
        let p = rect.to_surface(Vec2::new(210.0, 170.0), Vec2::new(800.0, 600.0));
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn enter_sets_flag_requests_high_quality_and_shows_tooltip() {
        let mut f = Fixture::new(3).spread();
        let change = f.move_to(Vec2::new(100.0, 300.0));
        assert_eq!(change, HoverChange::Entered { sprite: SpriteId(0), previous: None });
        assert!(f.sim.sprites()[0].hovered);
        assert_eq!(f.loader.pending().len(), 1);
        let (ticket, url) = &f.loader.pending()[0];
        assert_eq!(ticket.tier, ImageTier::High);
        assert!(url.contains("width=1200") && url.contains("quality=100"));
        assert!(f.tooltip.visible);
        assert_eq!(f.tooltip.info, "first");
        assert_eq!(f.tooltip.thumbnail_url, None, "thumbnail not loaded yet");
    }

    #[test]
    fn repeated_moves_on_same_sprite_request_once() {
        let mut f = Fixture::new(3).spread();
        f.move_to(Vec2::new(100.0, 300.0));
        assert_eq!(f.move_to(Vec2::new(101.0, 301.0)), HoverChange::Unchanged);
        assert_eq!(f.loader.pending().len(), 1);
    }

    #[test]
    fn switching_sprites_keeps_single_hover() {
        let mut f = Fixture::new(3).spread();
        f.move_to(Vec2::new(100.0, 300.0));
        let change = f.move_to(Vec2::new(250.0, 300.0));
        assert_eq!(
            change,
            HoverChange::Entered { sprite: SpriteId(1), previous: Some(SpriteId(0)) }
        );
        assert!(!f.sim.sprites()[0].hovered);
        assert!(f.sim.sprites()[1].hovered);
        assert_eq!(f.hovered_count(), 1);
    }

    #[test]
    fn leaving_clears_flag_and_hides_tooltip() {
        let mut f = Fixture::new(3).spread();
        f.move_to(Vec2::new(100.0, 300.0));
        let change = f.move_to(Vec2::new(700.0, 20.0));
        assert_eq!(change, HoverChange::Left { previous: SpriteId(0) });
        assert_eq!(f.hovered_count(), 0);
        assert!(!f.tooltip.visible);
        assert_eq!(f.move_to(Vec2::new(700.0, 25.0)), HoverChange::Unchanged);
    }

    #[test]
    fn overlapping_sprites_first_in_pool_wins() {
        // Known quirk: depth is ignored, pool order decides.
        let mut f = Fixture::new(2);
        f.sim.sprites_mut()[0].pos = Vec2::new(300.0, 300.0);
        f.sim.sprites_mut()[0].depth = 0.51;
        f.sim.sprites_mut()[1].pos = Vec2::new(300.0, 300.0);
        f.sim.sprites_mut()[1].depth = 0.99;
        assert_eq!(
            PointerController::hit_test(&f.sim, Vec2::new(300.0, 300.0)),
            Some(SpriteId(0))
        );
    }

    #[test]
    fn thumbnail_shown_once_loaded() {
        let mut f = Fixture::new(1).spread();
        let handle = crate::api::types::ImageHandle::new(1, 100.0, 100.0);
        f.sim.sprites_mut()[0].low = crate::components::sprite::TierState::Loaded(handle);
        f.move_to(Vec2::new(100.0, 300.0));
        let thumb = f.tooltip.thumbnail_url.as_deref().unwrap();
        assert!(thumb.contains("width=100&quality=60"));
    }

    #[test]
    fn tooltip_carries_score() {
        let mut f = Fixture::new(1).spread();
        f.sim.sprites_mut()[0].score = Some(85.0);
        f.move_to(Vec2::new(100.0, 300.0));
        assert_eq!(f.tooltip.score, Some(85.0));
    }

    #[test]
    fn client_viewport_defaults_to_surface_size() {
        let mut pointer = PointerController::new();
        let surface = Vec2::new(800.0, 600.0);
        assert_eq!(pointer.client_viewport(surface), surface);
        pointer.set_client_viewport(Vec2::new(400.0, 300.0));
        assert_eq!(pointer.client_viewport(surface), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn hit_radius_follows_scale() {
        let mut f = Fixture::new(1).spread();
        let r = f.sim.sprites()[0].radius();
        let edge = Vec2::new(100.0 + r * 1.2, 300.0);
        assert_eq!(PointerController::hit_test(&f.sim, edge), None);
        f.sim.sprites_mut()[0].scale = 1.5;
        assert_eq!(PointerController::hit_test(&f.sim, edge), Some(SpriteId(0)));
        let _ = f.move_to(edge);
        assert!(f.sim.sprites()[0].hovered);
    }
}
