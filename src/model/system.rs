use tracing::info;

use super::body::{BodyID, BodyInfo, OrbitParams};
use super::registry::Registry;

/// Describes a body to create, along with any moons orbiting it.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub info: BodyInfo,
    pub orbit: OrbitParams,
    pub moons: Vec<BodySpec>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeltSpec {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub count: usize,
}

/// Creates the given bodies (and their moons, recursively) and the asteroid belt.
/// Returns the IDs of the top-level bodies in the order they were given.
pub fn populate(
    registry: &mut Registry,
    specs: &[BodySpec],
    belt: Option<&BeltSpec>,
) -> Vec<BodyID> {
    let ids: Vec<_> = specs
        .iter()
        .map(|spec| add_with_moons(registry, spec, None))
        .collect();

    if let Some(belt) = belt {
        registry.add_asteroid_belt(belt.inner_radius, belt.outer_radius, belt.count);
    }

    info!(
        planets = ids.len(),
        bodies = registry.len(),
        asteroids = registry.asteroids().len(),
        "populated system"
    );
    ids
}

/// Builds a fresh registry, seeded if a seed is given.
pub fn build_system(seed: Option<u64>, specs: &[BodySpec], belt: Option<&BeltSpec>) -> Registry {
    let mut registry = Registry::with_optional_seed(seed);
    populate(&mut registry, specs, belt);
    registry
}

fn add_with_moons(registry: &mut Registry, spec: &BodySpec, parent: Option<BodyID>) -> BodyID {
    let id = registry.add_body(spec.info.clone(), spec.orbit, parent);
    for moon in spec.moons.iter() {
        add_with_moons(registry, moon, Some(id));
    }
    id
}
