pub mod api;
pub mod core;
pub mod components;
pub mod assets;
pub mod input;
pub mod overlay;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::HeroConfig;
pub use api::hero::HexHero;
pub use api::types::{SpriteId, ImageTier, ImageHandle, LoadTicket};
pub use core::geometry::{hexagon_vertices, is_point_in_hexagon, HEX_SIDES};
pub use core::rng::Rng;
pub use core::simulation::Simulation;
pub use components::sprite::{HexSprite, TierState};
pub use assets::variant::{derive_variant_url, VariantSpec};
pub use assets::loader::{ImageLoader, LoadError, ManualLoader};
pub use assets::catalog::{Catalog, ProductMeta};
pub use input::queue::{InputEvent, InputQueue};
pub use input::pointer::{PointerController, HoverChange, SurfaceRect};
pub use overlay::tooltip::{TooltipView, TooltipLayout};
pub use renderer::surface::{Surface, CommandSurface, DrawCommand, CoverRect, cover_rect};
pub use renderer::style::{Rgba, border_color, fallback_fill};
