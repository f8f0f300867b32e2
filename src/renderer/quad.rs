//! Quad records handed to the host for drawing

use bytemuck::{Pod, Zeroable};

/// Axis-aligned filled rectangle with an RGBA colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Quad {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl Quad {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            size: [w, h],
            color,
        }
    }

    /// Same quad with its alpha scaled
    pub fn faded(mut self, alpha: f32) -> Self {
        self.color[3] *= alpha.clamp(0.0, 1.0);
        self
    }

    /// CSS `rgba()` string for canvas fill styles
    pub fn css_color(&self) -> String {
        let [r, g, b, a] = self.color;
        format!(
            "rgba({},{},{},{:.3})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        )
    }
}

/// Reinterpret a quad list as raw bytes (instance buffer upload)
pub fn as_bytes(quads: &[Quad]) -> &[u8] {
    bytemuck::cast_slice(quads)
}

/// 0xRRGGBB to RGBA
pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::hex;

    pub const BACKGROUND: [f32; 4] = hex(0x1A1A2E, 1.0);
    pub const CASTLE_WALL: [f32; 4] = hex(0x2C2C54, 1.0);
    pub const BRICK: [f32; 4] = hex(0x40407A, 1.0);

    pub const ROBE: [f32; 4] = hex(0x2C2C2C, 1.0);
    pub const OWL_FACE: [f32; 4] = hex(0x8B4513, 1.0);
    pub const OWL_EYE: [f32; 4] = hex(0xFFD700, 1.0);
    pub const PUPIL: [f32; 4] = hex(0x000000, 1.0);
    pub const BEAK: [f32; 4] = hex(0xFFA500, 1.0);
    pub const HAT: [f32; 4] = hex(0x4B0082, 1.0);
    pub const WING: [f32; 4] = hex(0x654321, 1.0);

    pub const WOOD: [f32; 4] = hex(0x8B4513, 1.0);
    pub const PAGE_EDGE: [f32; 4] = hex(0xFFD700, 1.0);
    pub const STONE: [f32; 4] = hex(0x696969, 1.0);
    pub const FIRE: [f32; 4] = hex(0xFF4500, 1.0);
    pub const FIRE_CORE: [f32; 4] = hex(0xFFD700, 1.0);
    pub const WARNING: [f32; 4] = hex(0xFF3030, 1.0);

    pub const TIGER: [f32; 4] = hex(0xFFA500, 1.0);
    pub const STRIPE: [f32; 4] = hex(0x000000, 1.0);
    pub const ARMOR: [f32; 4] = hex(0xC0C0C0, 1.0);
    pub const TIGER_EYE: [f32; 4] = hex(0xFF0000, 1.0);

    pub const CHIP: [f32; 4] = hex(0xFFD700, 1.0);
    pub const CHIP_SPOT: [f32; 4] = hex(0xFFA500, 1.0);
    pub const SPARKLE: [f32; 4] = hex(0xFFFFFF, 1.0);
    pub const CARD_BACK: [f32; 4] = hex(0x2E1A47, 1.0);
    pub const CARD_BORDER: [f32; 4] = hex(0xFFD700, 1.0);
    pub const CARD_GLOW: [f32; 4] = hex(0x9B59B6, 0.35);
    /// One symbol colour per tarot symbol
    pub const CARD_SYMBOLS: [[f32; 4]; 5] = [
        hex(0xFFD700, 1.0),
        hex(0xC0C0FF, 1.0),
        hex(0xFF6B6B, 1.0),
        hex(0x6BFF95, 1.0),
        hex(0x6BC5FF, 1.0),
    ];

    pub const BANNER: [f32; 4] = hex(0x000000, 0.55);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xFF0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x00FF00, 0.5), [0.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_faded_and_css() {
        let q = Quad::new(0.0, 0.0, 1.0, 1.0, hex(0xFFFFFF, 1.0)).faded(0.5);
        assert_eq!(q.color[3], 0.5);
        assert_eq!(q.css_color(), "rgba(255,255,255,0.500)");
    }

    #[test]
    fn test_byte_view() {
        let quads = [Quad::new(1.0, 2.0, 3.0, 4.0, [0.0; 4]); 2];
        assert_eq!(as_bytes(&quads).len(), 2 * std::mem::size_of::<Quad>());
    }
}
