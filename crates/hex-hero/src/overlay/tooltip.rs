//! Info overlay shown next to the pointer while a sprite is hovered.
//!
//! This is a view model only: what to show and where. The host decides how
//! to render it (DOM, immediate-mode UI, ...).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Placement constants, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipLayout {
    /// Side of the square thumbnail (default: 300).
    pub image_size: f32,
    /// Horizontal gap between pointer and overlay (default: 20).
    pub offset: f32,
    /// Horizontal gap used when flipped to the pointer's left (default: 52).
    pub flip_gap: f32,
    /// Space kept free at the right viewport edge (default: 32).
    pub edge_pad: f32,
    /// Minimum distance to the top and bottom viewport edges (default: 20).
    pub margin: f32,
    /// Inner padding, used for the height estimate (default: 16).
    pub padding: f32,
    /// Height reserved for the info text in the estimate (default: 60).
    pub text_height: f32,
}

impl Default for TooltipLayout {
    fn default() -> Self {
        Self {
            image_size: 300.0,
            offset: 20.0,
            flip_gap: 52.0,
            edge_pad: 32.0,
            margin: 20.0,
            padding: 16.0,
            text_height: 60.0,
        }
    }
}

impl TooltipLayout {
    /// Top-left corner of an overlay of `height` anchored at `pointer`.
    ///
    /// Sits to the right of the pointer unless that would overflow the
    /// viewport, in which case it flips to the left. Vertically centered on
    /// the pointer and clamped to stay on screen.
    pub fn place(&self, pointer: Vec2, height: f32, viewport: Vec2) -> Vec2 {
        let mut left = pointer.x + self.offset;
        if left + self.image_size + self.edge_pad > viewport.x {
            left = pointer.x - self.image_size - self.flip_gap;
        }

        let mut top = pointer.y - height / 2.0;
        if top + height > viewport.y {
            top = viewport.y - height - self.margin;
        } else if top < self.margin {
            top = self.margin;
        }

        Vec2::new(left, top)
    }

    /// Height the overlay will probably have, before the host measures it.
    pub fn estimate_height(&self, has_thumbnail: bool, has_info: bool) -> f32 {
        let mut height = self.padding * 2.0;
        if has_thumbnail {
            height += self.image_size;
        }
        if has_info {
            height += self.text_height;
        }
        height
    }
}

/// What the overlay shows and where.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipView {
    pub visible: bool,
    /// Top-left corner in client coordinates.
    pub position: Vec2,
    /// Pointer position the overlay is anchored to.
    pub anchor: Vec2,
    /// Thumbnail variant of the hovered image, when it has loaded.
    pub thumbnail_url: Option<String>,
    /// Free-text product info. Empty when there is none.
    pub info: String,
    /// Health score of the hovered product.
    pub score: Option<f32>,
    /// Bumped whenever content or position changes, so hosts can skip
    /// re-rendering an unchanged overlay.
    pub revision: u32,
}

impl TooltipView {
    /// Show new content anchored at `anchor`.
    /// Stays hidden when there is nothing to show.
    pub fn show(
        &mut self,
        anchor: Vec2,
        thumbnail_url: Option<String>,
        info: String,
        score: Option<f32>,
        layout: &TooltipLayout,
        viewport: Vec2,
    ) {
        if thumbnail_url.is_none() && info.is_empty() {
            self.hide();
            return;
        }
        let height = layout.estimate_height(thumbnail_url.is_some(), !info.is_empty());
        self.visible = true;
        self.anchor = anchor;
        self.position = layout.place(anchor, height, viewport);
        self.thumbnail_url = thumbnail_url;
        self.info = info;
        self.score = score;
        self.bump();
    }

    /// Re-place using the height the host actually measured.
    pub fn remeasure(&mut self, measured_height: f32, layout: &TooltipLayout, viewport: Vec2) {
        if !self.visible {
            return;
        }
        let position = layout.place(self.anchor, measured_height, viewport);
        if position != self.position {
            self.position = position;
            self.bump();
        }
    }

    pub fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
