//! Deterministic background stars on a far sphere around the origin.

use std::f32::consts::TAU;

use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Used when the scene has no seed, so the sky doesn't reshuffle between runs
const DEFAULT_SKY_SEED: u64 = 0x5eed_5747;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Point3<f32>,
    pub color: Point3<f32>,
}

pub fn generate_starfield(seed: Option<u64>, count: usize, radius: f32) -> Vec<Star> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or(DEFAULT_SKY_SEED));

    (0..count)
        .map(|_| {
            // Uniform direction on the sphere
            let theta = rng.gen::<f32>() * TAU;
            let cos_phi = 1.0 - 2.0 * rng.gen::<f32>();
            let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
            let direction = Vector3::new(sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin());

            // Many dim stars, few bright ones
            let brightness = 0.25 + 0.75 * rng.gen::<f32>().powi(4);
            // Slight blue or yellow tint
            let tint = rng.gen_range(-0.08..0.08);

            Star {
                position: Point3::from(direction * radius),
                color: Point3::new(
                    (brightness + tint).min(1.0).max(0.0),
                    brightness,
                    (brightness - tint).min(1.0).max(0.0),
                ),
            }
        })
        .collect()
}
