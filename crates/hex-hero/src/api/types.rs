/// Index of a sprite within the current pool.
/// Pool order is insertion order, so the id doubles as the hit-test priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);

impl SpriteId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Quality tier of a sprite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageTier {
    /// Small thumbnail, requested when the sprite is created.
    Low,
    /// Full-size image, requested on first hover.
    High,
}

/// Opaque handle to a decoded image owned by the host.
/// The natural size is carried along for cover-fit drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageHandle {
    pub id: u32,
    pub width: f32,
    pub height: f32,
}

impl ImageHandle {
    pub fn new(id: u32, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }
}

/// Identifies one outstanding image request.
///
/// `generation` stamps the pool that issued the request. A rebuilt pool gets a
/// new generation, so completions for discarded sprites never reach live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub generation: u32,
    pub sprite: SpriteId,
    pub tier: ImageTier,
}
