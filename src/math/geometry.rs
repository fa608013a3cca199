use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Returns the offset of a body on a flat circular orbit, measured from the center of that
/// orbit. Orbits lie in the xz-plane, so y is always zero.
pub fn orbital_offset(angle: f64, distance: f64) -> Vector3<f64> {
    Vector3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Converts a point on the xz-plane, given in polar coordinates, into a point in space.
pub fn from_polar_xz(angle: f64, radius: f64, height: f64) -> Point3<f64> {
    Point3::from(orbital_offset(angle, radius) + Vector3::y() * height)
}

/// Projects a world-space point into window pixel coordinates, with the origin at the top-left
/// corner of the window.
///
/// `transformation` is the full projection * view matrix of the camera. Returns `None` if the
/// point is behind the camera or outside the depth range.
pub fn project_to_screen(
    transformation: &Matrix4<f32>,
    point: &Point3<f32>,
    width: f32,
    height: f32,
) -> Option<Point2<f32>> {
    let clip = transformation * point.to_homogeneous();
    if clip.w <= 0.0 {
        return None;
    }

    let ndc = clip.xyz() / clip.w;
    if !(-1.0..=1.0).contains(&ndc.z) {
        return None;
    }

    // NDC has y pointing up, but the window has it pointing down
    Some(Point2::new(
        (ndc.x + 1.0) * 0.5 * width,
        (1.0 - ndc.y) * 0.5 * height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_orbital_offset() {
        approx::assert_relative_eq!(orbital_offset(0.0, 130.0), Vector3::new(130.0, 0.0, 0.0));
        approx::assert_relative_eq!(
            orbital_offset(FRAC_PI_2, 10.0),
            Vector3::new(0.0, 0.0, 10.0),
            epsilon = 1e-12
        );
        approx::assert_relative_eq!(
            orbital_offset(PI, 10.0),
            Vector3::new(-10.0, 0.0, 0.0),
            epsilon = 1e-12
        );

        // A full turn lands on the same spot, no modulo needed
        approx::assert_relative_eq!(
            orbital_offset(0.3 + 5.0 * TAU, 42.0),
            orbital_offset(0.3, 42.0),
            epsilon = 1e-9
        );

        // Zero distance sits on the center regardless of angle
        approx::assert_relative_eq!(orbital_offset(1.234, 0.0), Vector3::zeros());
    }

    #[test]
    fn test_lerp() {
        approx::assert_relative_eq!(lerp(190.0, 215.0, 0.0), 190.0);
        approx::assert_relative_eq!(lerp(190.0, 215.0, 1.0), 215.0);
        approx::assert_relative_eq!(lerp(190.0, 215.0, 0.5), 202.5);
        approx::assert_relative_eq!(lerp(5.0, 5.0, 0.7), 5.0);
    }

    #[test]
    fn test_from_polar_xz() {
        let pt = from_polar_xz(FRAC_PI_2, 200.0, -2.0);
        approx::assert_relative_eq!(pt, Point3::new(0.0, -2.0, 200.0), epsilon = 1e-12);
    }

    #[test]
    fn test_project_to_screen() {
        let identity = Matrix4::identity();

        // The NDC origin is the middle of the window
        let center = project_to_screen(&identity, &Point3::origin(), 800.0, 600.0).unwrap();
        approx::assert_relative_eq!(center, Point2::new(400.0, 300.0));

        // Top-left corner of NDC space is the pixel origin
        let corner =
            project_to_screen(&identity, &Point3::new(-1.0, 1.0, 0.0), 800.0, 600.0).unwrap();
        approx::assert_relative_eq!(corner, Point2::new(0.0, 0.0));

        // Past the far plane
        assert!(project_to_screen(&identity, &Point3::new(0.0, 0.0, 2.0), 800.0, 600.0).is_none());

        // Negative w is behind the camera
        let mut flip = Matrix4::identity();
        flip[(3, 3)] = -1.0;
        assert!(project_to_screen(&flip, &Point3::origin(), 800.0, 600.0).is_none());
    }
}
