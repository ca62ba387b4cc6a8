//! Snowflake.

use hanabira_core::{SPAWN_Y, Viewport};
use rand::Rng;

use super::{Particle, uniform};
use crate::color::WHITE;
use crate::surface::DrawingSurface;

/// Horizontal amplitude of the swing oscillation, per tick.
const SWING_AMPLITUDE: f32 = 0.5;

/// A falling snowflake that sways side to side.
#[derive(Debug, Clone, PartialEq)]
pub struct Flake {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub opacity: f32,
    /// Phase of the lateral oscillator.
    pub swing: f32,
    pub swing_speed: f32,
}

impl Particle for Flake {
    fn spawn<R: Rng>(bounds: Viewport, rng: &mut R) -> Self {
        Self {
            x: uniform(rng, 0.0, bounds.width),
            y: SPAWN_Y,
            size: uniform(rng, 3.0, 8.0),
            speed_y: uniform(rng, 1.0, 2.5),
            speed_x: uniform(rng, -0.25, 0.25),
            opacity: uniform(rng, 0.6, 1.0),
            swing: 0.0,
            swing_speed: uniform(rng, 0.02, 0.05),
        }
    }

    fn scatter<R: Rng>(&mut self, bounds: Viewport, rng: &mut R) {
        self.y = uniform(rng, 0.0, bounds.height);
    }

    fn update<R: Rng>(&mut self, bounds_height: f32, _rng: &mut R) -> bool {
        self.swing += self.swing_speed;
        self.x += self.swing.sin() * SWING_AMPLITUDE + self.speed_x;
        self.y += self.speed_y;

        self.y > bounds_height
    }

    fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.set_global_alpha(self.opacity);
        surface.set_fill_color(WHITE);
        surface.fill_disc(self.x, self.y, self.size / 2.0);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Viewport::new(800.0, 600.0);
        for _ in 0..500 {
            let f = Flake::spawn(bounds, &mut rng);
            assert_eq!(f.y, SPAWN_Y);
            assert_eq!(f.swing, 0.0);
            assert!((3.0..=8.0).contains(&f.size));
            assert!((1.0..=2.5).contains(&f.speed_y));
            assert!((-0.25..=0.25).contains(&f.speed_x));
            assert!((0.02..=0.05).contains(&f.swing_speed));
            assert!((0.6..=1.0).contains(&f.opacity));
        }
    }

    #[test]
    fn test_swing_moves_sideways() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut f = Flake::spawn(Viewport::new(800.0, 600.0), &mut rng);
        f.x = 100.0;
        f.speed_x = 0.0;
        f.swing_speed = 0.05;
        f.update(600.0, &mut rng);
        assert!((f.swing - 0.05).abs() < 1e-6);
        assert!((f.x - (100.0 + 0.05_f32.sin() * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_removed_after_exact_tick_count() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut f = Flake::spawn(Viewport::new(800.0, 600.0), &mut rng);
        f.speed_y = 1.5;
        let expected = ((600.0_f32 + 20.0) / 1.5).ceil() as usize;
        assert_eq!(expected, 414);

        let mut ticks = 1;
        while !f.update(600.0, &mut rng) {
            ticks += 1;
        }
        assert_eq!(ticks, expected);
    }
}
