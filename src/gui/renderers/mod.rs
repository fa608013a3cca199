use std::f32::consts::TAU;

use kiss3d::window::Window;
use nalgebra::{Point3, Vector3};

use self::starfield::Star;
use self::utils::{draw_path, path_iter_parametric};

mod starfield;
mod utils;

pub use starfield::generate_starfield;

const RING_SEGMENTS: usize = 128;
const RING_DIMMING: f32 = 0.35;

/// Immediate-mode extras drawn on top of the scene graph: the sky and the orbit rings.
/// Everything here is re-submitted every frame.
pub struct Overlay {
    stars: Vec<Star>,
}

impl Overlay {
    pub fn new(stars: Vec<Star>) -> Self {
        Overlay { stars }
    }

    pub fn draw_starfield(&self, window: &mut Window) {
        for star in self.stars.iter() {
            window.draw_point(&star.position, &star.color);
        }
    }

    /// Draws a faint circle in the xz-plane, tinted with the body's color.
    pub fn draw_orbit_ring(
        &self,
        window: &mut Window,
        center: Point3<f32>,
        radius: f32,
        color: Point3<f32>,
    ) {
        let ring = move |t: f32| center + Vector3::new(t.cos(), 0.0, t.sin()) * radius;
        let dim_color = color * RING_DIMMING;
        draw_path(
            window,
            path_iter_parametric(ring, 0.0, TAU, RING_SEGMENTS),
            &dim_color,
        );
    }
}
