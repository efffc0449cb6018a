/// A colour with straight (non-premultiplied) alpha. All components range from 0.0 to 1.0
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    /// Create a new opaque colour. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour { r, g, b, a: 1.0 }
    }

    /// Create a new opaque colour. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::new_rgba_bytes(r, g, b, 255)
    }

    /// Create a new colour. r, g, b, and a range from 0 to 255
    pub fn new_rgba_bytes(r: u8, g: u8, b: u8, a: u8) -> Colour {
        Colour {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create an opaque colour from a `0xRRGGBB` value
    pub fn from_hex(rgb: u32) -> Colour {
        Colour::new_rgb_bytes((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Create a colour from a `0xRRGGBBAA` value
    pub fn from_hex_alpha(rgba: u32) -> Colour {
        Colour::new_rgba_bytes(
            (rgba >> 24) as u8,
            (rgba >> 16) as u8,
            (rgba >> 8) as u8,
            rgba as u8,
        )
    }

    /// Copy of this colour with a different alpha
    pub fn with_alpha(self, a: f32) -> Colour {
        Colour { a, ..self }
    }
}

impl From<Colour> for tiny_skia::Color {
    fn from(c: Colour) -> Self {
        tiny_skia::Color::from_rgba(
            c.r.clamp(0.0, 1.0),
            c.g.clamp(0.0, 1.0),
            c.b.clamp(0.0, 1.0),
            c.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::BLACK)
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::new_rgb(c.0.into(), c.1.into(), c.2.into())
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Colour = Colour {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// `#0b2b3a`, the report page background
    pub const DEEP_TEAL: Colour = Colour {
        r: 11.0 / 255.0,
        g: 43.0 / 255.0,
        b: 58.0 / 255.0,
        a: 1.0,
    };
    /// `#ffffff88`, used for rules between records
    pub const FAINT_WHITE: Colour = Colour {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 136.0 / 255.0,
    };
}
