//! Color utilities for the overlay raster.

use ratatui::style::Color;

/// Petal body pink.
pub const PETAL_PINK: Rgba = Rgba::rgb(0xFF, 0xB7, 0xD5);

/// Petal center, lavender blush.
pub const PETAL_CENTER: Rgba = Rgba::rgb(0xFF, 0xF0, 0xF5);

/// Snowflake and star white.
pub const WHITE: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);

/// A straight (non-premultiplied) RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Build an opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Return the same color with its alpha multiplied by `alpha`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (self.a * alpha).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Composite `self` over `dst` (source-over).
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a;
        let da = dst.a * (1.0 - sa);
        let a = sa + da;
        if a <= f32::EPSILON {
            return Rgba::TRANSPARENT;
        }
        Rgba {
            r: (self.r * sa + dst.r * da) / a,
            g: (self.g * sa + dst.g * da) / a,
            b: (self.b * sa + dst.b * da) / a,
            a,
        }
    }

    /// Flatten against an opaque backdrop into a terminal color.
    pub fn flatten(self, backdrop: Rgba) -> Color {
        let mix = |c: f32, bd: f32| ((c * self.a + bd * (1.0 - self.a)) * 255.0).round() as u8;
        Color::Rgb(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }
}
