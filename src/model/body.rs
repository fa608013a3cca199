use nalgebra::{Point3, Vector3};

use crate::math::geometry::orbital_offset;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the render-facing info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub size: f32,
    pub color: Point3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Radius of the orbit around the parent's center.
    pub distance: f64,
    /// Radians per frame. Negative values orbit the other way.
    pub speed: f64,
    /// Inclination of the orbital plane. Stored, but not yet applied to positions.
    pub tilt: f64,
}

impl OrbitParams {
    pub fn new(distance: f64, speed: f64) -> Self {
        OrbitParams {
            distance,
            speed,
            tilt: 0.0,
        }
    }

    pub fn with_tilt(self, tilt: f64) -> Self {
        OrbitParams { tilt, ..self }
    }
}

#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub id: BodyID,
    pub info: BodyInfo,
    pub orbit: OrbitParams,
    angle: f64,
    // Offset from the parent's center (or the origin for top-level bodies)
    position: Vector3<f64>,
    parent: Option<BodyID>,
    moons: Vec<BodyID>,
}

impl CelestialBody {
    pub(crate) fn new(
        id: BodyID,
        info: BodyInfo,
        orbit: OrbitParams,
        angle: f64,
        parent: Option<BodyID>,
    ) -> Self {
        CelestialBody {
            id,
            info,
            orbit,
            angle,
            position: orbital_offset(angle, orbit.distance),
            parent,
            moons: vec![],
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Position relative to whatever this body orbits.
    pub fn local_position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn parent(&self) -> Option<BodyID> {
        self.parent
    }

    pub fn moons(&self) -> &[BodyID] {
        &self.moons
    }

    pub(crate) fn push_moon(&mut self, id: BodyID) {
        self.moons.push(id);
    }

    pub(crate) fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.position = orbital_offset(self.angle, self.orbit.distance);
    }

    /// Moves the body one frame along its orbit.
    pub(crate) fn advance(&mut self) {
        // The angle is never wrapped; cos and sin take care of that
        self.set_angle(self.angle + self.orbit.speed);
    }
}

/// A static rock in the asteroid belt. Once placed, it never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub position: Point3<f64>,
}

impl Asteroid {
    pub fn radial_distance(&self) -> f64 {
        self.position.x.hypot(self.position.z)
    }
}

/// Converts a packed `0xRRGGBB` color into RGB components in [0, 1].
pub fn rgb_from_hex(hex: u32) -> Point3<f32> {
    let r = (hex >> 16) & 0xff;
    let g = (hex >> 8) & 0xff;
    let b = hex & 0xff;

    Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
