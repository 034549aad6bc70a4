// Planar geometry helpers shared by the pose and motion classifiers

use nalgebra::Vector2;

/// Widen a normalized image coordinate pair to f64 for arithmetic
pub fn point(x: f32, y: f32) -> Vector2<f64> {
    Vector2::new(x as f64, y as f64)
}

pub fn euclidean_distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a - b).norm()
}

/// Signed angle at `b` between the rays towards `a` and `c`, in radians.
///
/// Computed as `atan2(cross, dot)` of `b - a` and `b - c`, so the result lies
/// in (-π, π]. Image y grows downwards, which makes "up" on screen positive.
pub fn angle_abc(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let cb = b - c;

    let dot = ab.dot(&cb);
    let cross = ab.perp(&cb);

    cross.atan2(dot)
}

/// Convert radians to whole degrees, rounding half up
pub fn radians_to_degrees(radians: f64) -> i32 {
    (radians.to_degrees() + 0.5).floor() as i32
}

/// Angle of the ray `from -> to` relative to the +x axis, in whole degrees.
///
/// `reference_offset` is the length of the horizontal reference ray placed at
/// `from`; any positive value yields the same angle.
pub fn heading_degrees(from: Vector2<f64>, to: Vector2<f64>, reference_offset: f64) -> i32 {
    let reference = from + Vector2::new(reference_offset, 0.0);
    radians_to_degrees(angle_abc(to, from, reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let d = euclidean_distance(point(0.0, 0.0), point(0.3, 0.4));
        assert!((d - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_radians_to_degrees_rounds_to_nearest() {
        assert_eq!(radians_to_degrees(0.0), 0);
        assert_eq!(radians_to_degrees(std::f64::consts::FRAC_PI_2), 90);
        assert_eq!(radians_to_degrees(std::f64::consts::PI), 180);
        assert_eq!(radians_to_degrees((44.4f64).to_radians()), 44);
        assert_eq!(radians_to_degrees((44.6f64).to_radians()), 45);
        assert_eq!(radians_to_degrees((-44.4f64).to_radians()), -44);
        assert_eq!(radians_to_degrees((-44.6f64).to_radians()), -45);
    }

    #[test]
    fn test_heading_directions() {
        let origin = point(0.5, 0.5);
        assert_eq!(heading_degrees(origin, point(0.6, 0.5), 0.1), 0);
        // y grows downwards in image space, so "up" is a smaller y
        assert_eq!(heading_degrees(origin, point(0.5, 0.4), 0.1), 90);
        assert_eq!(heading_degrees(origin, point(0.4, 0.5), 0.1), 180);
        assert_eq!(heading_degrees(origin, point(0.5, 0.6), 0.1), -90);
    }

    #[test]
    fn test_angle_abc_matches_heading() {
        // current center moved right of the previous one
        let current = point(0.6, 0.5);
        let previous = point(0.5, 0.5);
        let reference = point(0.6, 0.5);
        assert_eq!(radians_to_degrees(angle_abc(current, previous, reference)), 0);
    }
}
