use std::f64::consts::TAU;

use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::body::{Asteroid, BodyID, BodyInfo, CelestialBody, OrbitParams};
use crate::math::geometry::{from_polar_xz, lerp};

/// Half the height of the slab the asteroid belt lives in.
pub const BELT_HALF_THICKNESS: f64 = 2.5;

/// Owns every body in the system, along with the random source used to place them.
///
/// Bodies are stored in creation order, and a moon's parent is always created before it.
/// Nothing is ever removed.
#[derive(Debug, Clone)]
pub struct Registry {
    bodies: Vec<CelestialBody>,
    top_level: Vec<BodyID>,
    asteroids: Vec<Asteroid>,
    rng: ChaCha8Rng,
}

impl Registry {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Registry {
            bodies: vec![],
            top_level: vec![],
            asteroids: vec![],
            rng,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }

    /// Uses the given seed if there is one, otherwise draws one from the OS.
    pub fn with_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Creates a body orbiting the origin, at a random point along its orbit.
    pub fn create_body(
        &mut self,
        name: &str,
        size: f32,
        distance: f64,
        color: Point3<f32>,
        speed: f64,
    ) -> BodyID {
        let info = BodyInfo {
            name: name.to_owned(),
            size,
            color,
        };
        self.add_body(info, OrbitParams::new(distance, speed), None)
    }

    /// Creates a body orbiting `parent`. Its position is an offset from the parent's position.
    pub fn create_moon(
        &mut self,
        parent: BodyID,
        name: &str,
        size: f32,
        distance: f64,
        color: Point3<f32>,
        speed: f64,
    ) -> BodyID {
        let info = BodyInfo {
            name: name.to_owned(),
            size,
            color,
        };
        self.add_body(info, OrbitParams::new(distance, speed), Some(parent))
    }

    pub fn add_body(
        &mut self,
        info: BodyInfo,
        orbit: OrbitParams,
        parent: Option<BodyID>,
    ) -> BodyID {
        debug_assert!(
            parent.map_or(true, |p| p.0 < self.bodies.len()),
            "Parent {:?} of body {:?} is not in this registry",
            parent,
            info.name
        );
        debug_assert!(
            self.sibling_named(parent, &info.name).is_none(),
            "Body {:?} already has a sibling with that name",
            info.name
        );

        let id = BodyID(self.bodies.len());
        let angle = self.rng.gen_range(0.0..TAU);

        debug!(
            name = %info.name,
            distance = orbit.distance,
            speed = orbit.speed,
            angle,
            parent = ?parent,
            "created body"
        );

        match parent {
            Some(parent_id) => self.bodies[parent_id.0].push_moon(id),
            None => self.top_level.push(id),
        }
        self.bodies.push(CelestialBody::new(id, info, orbit, angle, parent));

        id
    }

    /// Scatters `count` static asteroids in a ring between the two radii.
    pub fn add_asteroid_belt(&mut self, inner_radius: f64, outer_radius: f64, count: usize) {
        self.asteroids.reserve(count);
        for _ in 0..count {
            let angle = self.rng.gen_range(0.0..TAU);
            let radius = lerp(inner_radius, outer_radius, self.rng.gen::<f64>());
            let height = (self.rng.gen::<f64>() - 0.5) * 2.0 * BELT_HALF_THICKNESS;
            self.asteroids.push(Asteroid {
                position: from_polar_xz(angle, radius, height),
            });
        }

        debug!(inner_radius, outer_radius, count, "added asteroid belt");
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// All bodies, parents before their moons.
    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.bodies.iter()
    }

    pub(crate) fn bodies_mut(&mut self) -> impl Iterator<Item = &mut CelestialBody> + '_ {
        self.bodies.iter_mut()
    }

    /// Bodies orbiting the origin directly.
    pub fn top_level(&self) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.top_level.iter().map(move |id| self.get_body(*id))
    }

    pub fn moons_of(&self, id: BodyID) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.get_body(id)
            .moons()
            .iter()
            .map(move |moon| self.get_body(*moon))
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn get_body(&self, id: BodyID) -> &CelestialBody {
        &self.bodies[id.0]
    }

    /// Looks up a top-level body by name.
    pub fn find(&self, name: &str) -> Option<BodyID> {
        self.sibling_named(None, name)
    }

    /// Looks up a moon of `parent` by name.
    pub fn find_moon(&self, parent: BodyID, name: &str) -> Option<BodyID> {
        self.sibling_named(Some(parent), name)
    }

    fn sibling_named(&self, parent: Option<BodyID>, name: &str) -> Option<BodyID> {
        let siblings = match parent {
            Some(id) => self.get_body(id).moons(),
            None => &self.top_level,
        };
        siblings
            .iter()
            .copied()
            .find(|id| self.get_body(*id).info.name == name)
    }

    /// Overrides a body's orbital phase, moving it to the matching point on its orbit.
    pub fn set_angle(&mut self, id: BodyID, angle: f64) {
        self.bodies[id.0].set_angle(angle);
    }

    /// Position of a body in the system frame, composing the offsets of all its ancestors.
    pub fn world_position(&self, id: BodyID) -> Point3<f64> {
        let mut offset = Vector3::zeros();
        let mut current = Some(id);
        while let Some(id) = current {
            let body = self.get_body(id);
            offset += body.local_position();
            current = body.parent();
        }
        Point3::from(offset)
    }

    /// Center of the orbit a body travels along, in the system frame.
    pub fn orbit_center(&self, id: BodyID) -> Point3<f64> {
        match self.get_body(id).parent() {
            Some(parent) => self.world_position(parent),
            None => Point3::origin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::body::rgb_from_hex;

    #[test]
    fn test_initial_angles_in_range() {
        let mut registry = Registry::seeded(7);
        for i in 0..200 {
            registry.create_body(&format!("body-{}", i), 1.0, 10.0, rgb_from_hex(0), 0.1);
        }

        for body in registry.bodies() {
            assert!(body.angle() >= 0.0 && body.angle() < TAU);
            approx::assert_relative_eq!(
                body.local_position().norm(),
                body.orbit.distance,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is not in this registry")]
    fn test_moon_of_unknown_parent() {
        let mut registry = Registry::seeded(7);
        registry.create_body("Jupiter", 20.0, 250.0, rgb_from_hex(0xff9900), 0.0005);
        registry.create_moon(BodyID(5), "Io", 2.0, 30.0, rgb_from_hex(0xffcc66), 0.01);
    }

    #[test]
    fn test_seeded_registries_agree() {
        let build = || {
            let mut registry = Registry::seeded(1234);
            registry.create_body("Mercury", 4.0, 60.0, rgb_from_hex(0x888888), 0.004);
            registry.create_body("Venus", 7.0, 90.0, rgb_from_hex(0xd4af37), 0.002);
            registry.add_asteroid_belt(190.0, 215.0, 10);
            registry
        };

        let a = build();
        let b = build();
        let angles = |r: &Registry| r.bodies().map(|b| b.angle()).collect::<Vec<_>>();
        assert_eq!(angles(&a), angles(&b));
        assert_eq!(a.asteroids(), b.asteroids());

        let mut c = Registry::seeded(4321);
        let mercury = c.create_body("Mercury", 4.0, 60.0, rgb_from_hex(0x888888), 0.004);
        assert_ne!(a.get_body(BodyID(0)).angle(), c.get_body(mercury).angle());
    }

    #[test]
    fn test_identical_arguments_make_independent_bodies() {
        let mut registry = Registry::seeded(99);
        let a = registry.create_body("A", 8.0, 130.0, rgb_from_hex(0x3399ff), 0.001);
        let b = registry.create_body("B", 8.0, 130.0, rgb_from_hex(0x3399ff), 0.001);
        assert_ne!(a, b);

        let (a, b) = (registry.get_body(a), registry.get_body(b));
        assert_eq!(a.orbit, b.orbit);
        assert_eq!(a.info.size, b.info.size);
        assert_ne!(a.angle(), b.angle());
    }

    #[test]
    fn test_moons_are_nested() {
        let mut registry = Registry::seeded(0);
        let jupiter = registry.create_body("Jupiter", 15.0, 220.0, rgb_from_hex(0xffa500), 0.0005);
        let io = registry.create_moon(jupiter, "Io", 2.0, 20.0, rgb_from_hex(0xddaa66), 0.01);
        let europa =
            registry.create_moon(jupiter, "Europa", 1.8, 28.0, rgb_from_hex(0xcccccc), 0.008);

        assert_eq!(registry.top_level().count(), 1);
        assert_eq!(registry.get_body(jupiter).moons(), &[io, europa]);
        assert_eq!(registry.get_body(io).parent(), Some(jupiter));
        assert_eq!(registry.find("Jupiter"), Some(jupiter));
        assert_eq!(registry.find("Io"), None);
        assert_eq!(registry.find_moon(jupiter, "Europa"), Some(europa));

        let names: Vec<_> = registry
            .moons_of(jupiter)
            .map(|m| m.info.name.as_str())
            .collect();
        assert_eq!(names, vec!["Io", "Europa"]);
    }

    #[test]
    fn test_world_position_composes() {
        let mut registry = Registry::seeded(3);
        let planet = registry.create_body("P", 5.0, 100.0, rgb_from_hex(0), 0.01);
        let moon = registry.create_moon(planet, "M", 1.0, 10.0, rgb_from_hex(0), 0.1);
        registry.set_angle(planet, 0.0);
        registry.set_angle(moon, std::f64::consts::FRAC_PI_2);

        approx::assert_relative_eq!(
            registry.world_position(moon),
            Point3::new(100.0, 0.0, 10.0),
            epsilon = 1e-12
        );
        approx::assert_relative_eq!(registry.orbit_center(moon), Point3::new(100.0, 0.0, 0.0));
        approx::assert_relative_eq!(registry.orbit_center(planet), Point3::origin());
    }

    #[test]
    fn test_asteroid_belt_bounds() {
        let mut registry = Registry::seeded(42);
        registry.add_asteroid_belt(190.0, 215.0, 300);

        assert_eq!(registry.asteroids().len(), 300);
        for asteroid in registry.asteroids() {
            let r = asteroid.radial_distance();
            assert!((190.0 - 1e-9..=215.0 + 1e-9).contains(&r), "radius {}", r);
            assert!(asteroid.position.y.abs() <= BELT_HALF_THICKNESS);
        }

        // Asteroids aren't bodies
        assert!(registry.is_empty());
    }

    #[test]
    fn test_degenerate_belt() {
        let mut registry = Registry::seeded(5);
        registry.add_asteroid_belt(50.0, 50.0, 20);
        for asteroid in registry.asteroids() {
            approx::assert_relative_eq!(asteroid.radial_distance(), 50.0, max_relative = 1e-12);
        }

        registry.add_asteroid_belt(10.0, 20.0, 0);
        assert_eq!(registry.asteroids().len(), 20);
    }
}
