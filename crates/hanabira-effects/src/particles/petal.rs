//! Cherry blossom petal.

use hanabira_core::{SPAWN_Y, Viewport};
use rand::Rng;

use super::{Particle, uniform};
use crate::color::{PETAL_CENTER, PETAL_PINK};
use crate::surface::DrawingSurface;

/// Strength of the per-tick random wind nudge on `speed_x`.
pub const PETAL_GUST: f32 = 0.05;

/// Horizontal speed never leaves `-MAX_DRIFT..=MAX_DRIFT`.
pub const MAX_DRIFT: f32 = 2.0;

/// A falling, spinning petal drawn as a pink disc with a pale center.
#[derive(Debug, Clone, PartialEq)]
pub struct Petal {
    pub x: f32,
    pub y: f32,
    /// Diameter in logical pixels.
    pub size: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    pub rotation_speed: f32,
    pub opacity: f32,
    /// Amplitude of the random wind nudge; zero makes the drift constant.
    pub gust: f32,
}

impl Particle for Petal {
    fn spawn<R: Rng>(bounds: Viewport, rng: &mut R) -> Self {
        Self {
            x: uniform(rng, 0.0, bounds.width),
            y: SPAWN_Y,
            size: uniform(rng, 8.0, 20.0),
            speed_x: uniform(rng, -0.75, 0.75),
            speed_y: uniform(rng, 1.5, 2.5),
            rotation: uniform(rng, 0.0, 360.0),
            rotation_speed: uniform(rng, -1.5, 1.5),
            opacity: uniform(rng, 0.5, 0.9),
            gust: PETAL_GUST,
        }
    }

    fn scatter<R: Rng>(&mut self, bounds: Viewport, rng: &mut R) {
        self.y = uniform(rng, 0.0, bounds.height);
    }

    fn update<R: Rng>(&mut self, bounds_height: f32, rng: &mut R) -> bool {
        self.x += self.speed_x;
        self.y += self.speed_y;
        self.rotation += self.rotation_speed;

        // Wind drift
        self.speed_x += uniform(rng, -1.0, 1.0) * self.gust;
        self.speed_x = self.speed_x.clamp(-MAX_DRIFT, MAX_DRIFT);

        self.y > bounds_height
    }

    fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.translate(self.x, self.y);
        surface.rotate(self.rotation.to_radians());
        surface.set_global_alpha(self.opacity);

        surface.set_fill_color(PETAL_PINK);
        surface.fill_disc(0.0, 0.0, self.size / 2.0);

        surface.set_fill_color(PETAL_CENTER);
        surface.fill_disc(0.0, 0.0, self.size / 4.0);

        surface.restore();
    }
}
