//! Fixed-population particle fields.

use hanabira_core::{Effect, Viewport};
use rand::rngs::StdRng;

use crate::particles::{Flake, Particle, Petal, Star};
use crate::surface::DrawingSurface;

/// A homogeneous collection of particles for one effect.
///
/// The field owns its RNG, so a seeded field replays the same spawns.
#[derive(Debug, Clone)]
pub struct ParticleField<P> {
    particles: Vec<P>,
    target_population: usize,
    rng: StdRng,
}

impl<P: Particle> ParticleField<P> {
    /// Create an empty field that tops up to `target_population` on every tick.
    pub fn new(target_population: usize, rng: StdRng) -> Self {
        Self {
            particles: Vec::with_capacity(target_population),
            target_population,
            rng,
        }
    }

    /// Add `count` freshly spawned particles.
    ///
    /// With `distribute_vertically` the new particles are scattered over the
    /// viewport height instead of starting above the top edge.
    pub fn seed(&mut self, count: usize, bounds: Viewport, distribute_vertically: bool) {
        self.particles.reserve(count);
        for _ in 0..count {
            let mut particle = P::spawn(bounds, &mut self.rng);
            if distribute_vertically {
                particle.scatter(bounds, &mut self.rng);
            }
            self.particles.push(particle);
        }
    }

    /// Discard every particle and seed a full population again.
    pub fn reseed(&mut self, bounds: Viewport) {
        self.particles.clear();
        self.seed(self.target_population, bounds, true);
    }

    /// Advance one tick: update every particle, drop the removed ones and
    /// spawn replacements until the target population is reached.
    pub fn tick(&mut self, bounds: Viewport) {
        let rng = &mut self.rng;
        self.particles
            .retain_mut(|particle| !particle.update(bounds.height, rng));

        while self.particles.len() < self.target_population {
            let particle = P::spawn(bounds, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Draw every particle in insertion order.
    pub fn draw_all<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    pub fn particles(&self) -> &[P] {
        &self.particles
    }

    /// Mutable access to the particles, mainly for tests.
    pub fn particles_mut(&mut self) -> &mut [P] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn target_population(&self) -> usize {
        self.target_population
    }

    pub fn set_target_population(&mut self, target_population: usize) {
        self.target_population = target_population;
    }
}

/// One field of whichever effect a controller runs.
#[derive(Debug, Clone)]
pub enum EffectField {
    Sakura(ParticleField<Petal>),
    Snow(ParticleField<Flake>),
    Stars(ParticleField<Star>),
}

impl EffectField {
    /// Build the field for `effect` and seed its initial population.
    ///
    /// The target starts at the initial population; effects with a
    /// staggered load raise it in [`EffectField::load_remaining`].
    pub fn new(effect: Effect, bounds: Viewport, rng: StdRng) -> Self {
        let initial = effect.initial_population();
        match effect {
            Effect::Sakura => {
                let mut field = ParticleField::new(initial, rng);
                field.seed(initial, bounds, true);
                EffectField::Sakura(field)
            }
            Effect::Snow => {
                let mut field = ParticleField::new(initial, rng);
                field.seed(initial, bounds, true);
                EffectField::Snow(field)
            }
            Effect::Stars => {
                let mut field = ParticleField::new(initial, rng);
                field.seed(initial, bounds, false);
                EffectField::Stars(field)
            }
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            EffectField::Sakura(_) => Effect::Sakura,
            EffectField::Snow(_) => Effect::Snow,
            EffectField::Stars(_) => Effect::Stars,
        }
    }

    pub fn tick(&mut self, bounds: Viewport) {
        match self {
            EffectField::Sakura(field) => field.tick(bounds),
            EffectField::Snow(field) => field.tick(bounds),
            EffectField::Stars(field) => field.tick(bounds),
        }
    }

    pub fn draw_all<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        match self {
            EffectField::Sakura(field) => field.draw_all(surface),
            EffectField::Snow(field) => field.draw_all(surface),
            EffectField::Stars(field) => field.draw_all(surface),
        }
    }

    /// Seed the rest of a staggered load and raise the target to match.
    ///
    /// Does nothing once the field already targets its full population.
    pub fn load_remaining(&mut self, bounds: Viewport) {
        let target = self.effect().target_population();
        match self {
            EffectField::Sakura(field) => load_remaining(field, target, bounds),
            EffectField::Snow(field) => load_remaining(field, target, bounds),
            EffectField::Stars(field) => load_remaining(field, target, bounds),
        }
    }

    /// React to a viewport resize. Star positions are viewport-relative and
    /// never recomputed per tick, so the star field is regenerated.
    pub fn on_resize(&mut self, bounds: Viewport) {
        if let EffectField::Stars(field) = self {
            field.reseed(bounds);
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EffectField::Sakura(field) => field.len(),
            EffectField::Snow(field) => field.len(),
            EffectField::Stars(field) => field.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn target_population(&self) -> usize {
        match self {
            EffectField::Sakura(field) => field.target_population(),
            EffectField::Snow(field) => field.target_population(),
            EffectField::Stars(field) => field.target_population(),
        }
    }
}

fn load_remaining<P: Particle>(field: &mut ParticleField<P>, target: usize, bounds: Viewport) {
    let missing = target.saturating_sub(field.target_population());
    if missing == 0 {
        return;
    }
    field.set_target_population(target);
    field.seed(missing, bounds, true);
}

#[cfg(test)]
mod tests {
    use hanabira_core::SPAWN_Y;
    use rand::SeedableRng;

    use super::*;

    const BOUNDS: Viewport = Viewport::new(800.0, 600.0);

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_seed_distributes_vertically() {
        let mut field: ParticleField<Flake> = ParticleField::new(30, rng(1));
        field.seed(30, BOUNDS, true);
        assert_eq!(field.len(), 30);
        assert!(field.particles().iter().all(|f| (0.0..=600.0).contains(&f.y)));
    }

    #[test]
    fn test_replacements_start_above_viewport() {
        let mut field: ParticleField<Flake> = ParticleField::new(5, rng(2));
        field.seed(5, BOUNDS, true);
        for flake in field.particles_mut() {
            flake.y = 1000.0;
        }
        field.tick(BOUNDS);
        assert_eq!(field.len(), 5);
        assert!(field.particles().iter().all(|f| f.y == SPAWN_Y));
    }

    #[test]
    fn test_population_restored_every_tick() {
        let mut field: ParticleField<Petal> = ParticleField::new(20, rng(3));
        field.seed(20, BOUNDS, true);
        let small = Viewport::new(800.0, 50.0);
        for _ in 0..500 {
            field.tick(small);
            assert_eq!(field.len(), field.target_population());
        }
    }

    #[test]
    fn test_tick_tops_up_from_empty() {
        let mut field: ParticleField<Petal> = ParticleField::new(20, rng(4));
        field.tick(BOUNDS);
        assert_eq!(field.len(), 20);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = EffectField::new(Effect::Snow, BOUNDS, rng(5));
        let b = EffectField::new(Effect::Snow, BOUNDS, rng(5));
        match (a, b) {
            (EffectField::Snow(a), EffectField::Snow(b)) => {
                assert_eq!(a.particles(), b.particles())
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_sakura_staggered_load() {
        let mut field = EffectField::new(Effect::Sakura, BOUNDS, rng(6));
        assert_eq!(field.len(), 10);
        assert_eq!(field.target_population(), 10);
        field.tick(BOUNDS);
        assert_eq!(field.len(), 10);

        field.load_remaining(BOUNDS);
        assert_eq!(field.len(), 20);
        assert_eq!(field.target_population(), 20);

        // A second call is a no-op.
        field.load_remaining(BOUNDS);
        assert_eq!(field.len(), 20);
        field.tick(BOUNDS);
        assert_eq!(field.len(), 20);
    }

    #[test]
    fn test_star_field_never_churns() {
        let mut field = EffectField::new(Effect::Stars, BOUNDS, rng(7));
        let EffectField::Stars(stars) = &field else {
            unreachable!()
        };
        let positions: Vec<(f32, f32)> = stars.particles().iter().map(|s| (s.x, s.y)).collect();
        assert_eq!(positions.len(), 50);

        for _ in 0..200 {
            field.tick(BOUNDS);
        }
        let EffectField::Stars(stars) = &field else {
            unreachable!()
        };
        let after: Vec<(f32, f32)> = stars.particles().iter().map(|s| (s.x, s.y)).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_star_field_reseeds_on_resize() {
        let mut field = EffectField::new(Effect::Stars, BOUNDS, rng(8));
        let EffectField::Stars(stars) = &field else {
            unreachable!()
        };
        let before = stars.particles().to_vec();

        field.on_resize(Viewport::new(100.0, 80.0));
        let EffectField::Stars(stars) = &field else {
            unreachable!()
        };
        assert_eq!(stars.len(), 50);
        assert_ne!(stars.particles(), before.as_slice());
        assert!(
            stars
                .particles()
                .iter()
                .all(|s| s.x <= 100.0 && s.y <= 80.0)
        );
    }

    #[test]
    fn test_falling_fields_ignore_resize() {
        let mut field = EffectField::new(Effect::Snow, BOUNDS, rng(9));
        let EffectField::Snow(flakes) = &field else {
            unreachable!()
        };
        let before = flakes.particles().to_vec();
        field.on_resize(BOUNDS);
        let EffectField::Snow(flakes) = &field else {
            unreachable!()
        };
        assert_eq!(flakes.particles(), before.as_slice());
    }
}
