/// Score at or above which the hover border is green.
pub const FAVORABLE_SCORE: f32 = 80.0;
/// Score at or above which the hover border is yellow (below: red).
pub const CAUTION_SCORE: f32 = 40.0;

/// 8-bit RGB color with float alpha, matching CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(0xff, 0xff, 0xff);
    pub const GREEN: Rgba = Rgba::opaque(0x00, 0xff, 0x00);
    pub const YELLOW: Rgba = Rgba::opaque(0xff, 0xff, 0x00);
    pub const RED: Rgba = Rgba::opaque(0xff, 0x00, 0x00);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Hover border color for a health score.
pub fn border_color(score: Option<f32>) -> Rgba {
    match score {
        None => Rgba::WHITE,
        Some(s) if s >= FAVORABLE_SCORE => Rgba::GREEN,
        Some(s) if s >= CAUTION_SCORE => Rgba::YELLOW,
        Some(_) => Rgba::RED,
    }
}

/// Flat fill drawn while no image is available. Deeper sprites are more opaque.
pub fn fallback_fill(depth: f32) -> Rgba {
    Rgba::new(0, 180, 180, 0.2 + depth * 0.4)
}
