//! Particle variants.
//!
//! Each effect has its own particle shape. They share no state, only the
//! [`Particle`] capability used by [`crate::field::ParticleField`].

pub mod flake;
pub mod petal;
pub mod star;

use hanabira_core::Viewport;
use rand::Rng;

use crate::surface::DrawingSurface;

pub use flake::Flake;
pub use petal::Petal;
pub use star::Star;

/// A single simulated body.
pub trait Particle {
    /// Construct a fresh particle for a viewport of the given size.
    fn spawn<R: Rng>(bounds: Viewport, rng: &mut R) -> Self;

    /// Move a freshly spawned particle somewhere across the viewport height,
    /// so the first frame is not empty.
    fn scatter<R: Rng>(&mut self, _bounds: Viewport, _rng: &mut R) {}

    /// Advance one tick. Returns `true` when the particle should be removed.
    fn update<R: Rng>(&mut self, bounds_height: f32, rng: &mut R) -> bool;

    /// Draw the particle onto the surface.
    fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S);
}

/// Draw from `U(min, max)`.
///
/// An empty range collapses to `min` rather than panicking, which happens
/// when the viewport has zero width or height.
pub(crate) fn uniform<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = uniform(&mut rng, 8.0, 20.0);
            assert!((8.0..20.0).contains(&v) || v == 20.0);
        }
    }

    #[test]
    fn test_uniform_empty_range() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(uniform(&mut rng, 0.0, 0.0), 0.0);
    }
}
