//! Twinkling star.

use hanabira_core::Viewport;
use rand::Rng;

use super::{Particle, uniform};
use crate::color::WHITE;
use crate::surface::DrawingSurface;

/// A stationary star whose brightness follows a triangle wave.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Radius in logical pixels.
    pub size: f32,
    pub opacity: f32,
    /// `1.0` while brightening, `-1.0` while fading.
    pub fade_direction: f32,
    pub fade_speed: f32,
}

impl Particle for Star {
    fn spawn<R: Rng>(bounds: Viewport, rng: &mut R) -> Self {
        Self {
            x: uniform(rng, 0.0, bounds.width),
            y: uniform(rng, 0.0, bounds.height),
            size: uniform(rng, 1.0, 3.5),
            opacity: rng.random::<f32>(),
            fade_direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            fade_speed: uniform(rng, 0.01, 0.03),
        }
    }

    fn update<R: Rng>(&mut self, _bounds_height: f32, _rng: &mut R) -> bool {
        self.opacity += self.fade_direction * self.fade_speed;
        if self.opacity >= 1.0 {
            self.opacity = 1.0;
            self.fade_direction = -1.0;
        } else if self.opacity <= 0.0 {
            self.opacity = 0.0;
            self.fade_direction = 1.0;
        }
        false
    }

    fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.set_global_alpha(self.opacity);
        surface.set_fill_color(WHITE);
        surface.fill_disc(self.x, self.y, self.size);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_spawn_inside_viewport() {
        let mut rng = StdRng::seed_from_u64(21);
        let bounds = Viewport::new(800.0, 600.0);
        for _ in 0..500 {
            let s = Star::spawn(bounds, &mut rng);
            assert!((0.0..=800.0).contains(&s.x));
            assert!((0.0..=600.0).contains(&s.y));
            assert!((0.0..=1.0).contains(&s.opacity));
            assert!(s.fade_direction == 1.0 || s.fade_direction == -1.0);
            assert!((0.01..=0.03).contains(&s.fade_speed));
        }
    }

    #[test]
    fn test_opacity_triangle_wave() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut star = Star::spawn(Viewport::new(800.0, 600.0), &mut rng);
        let (x, y) = (star.x, star.y);
        let mut flips = 0;
        for _ in 0..5000 {
            let before = star.fade_direction;
            assert!(!star.update(600.0, &mut rng));
            assert!((0.0..=1.0).contains(&star.opacity));
            if star.fade_direction != before {
                flips += 1;
                // Direction only flips exactly on a bound.
                if star.fade_direction < 0.0 {
                    assert_eq!(star.opacity, 1.0);
                } else {
                    assert_eq!(star.opacity, 0.0);
                }
            }
        }
        assert!(flips > 2);
        assert_eq!((star.x, star.y), (x, y));
    }

    #[test]
    fn test_clamps_on_overshoot() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut star = Star {
            x: 0.0,
            y: 0.0,
            size: 1.0,
            opacity: 0.99,
            fade_direction: 1.0,
            fade_speed: 0.03,
        };
        star.update(0.0, &mut rng);
        assert_eq!(star.opacity, 1.0);
        assert_eq!(star.fade_direction, -1.0);

        star.opacity = 0.01;
        star.update(0.0, &mut rng);
        assert_eq!(star.opacity, 0.0);
        assert_eq!(star.fade_direction, 1.0);
    }
}
