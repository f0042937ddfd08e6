//! Plain point types and coordinate conversions.

use glam::Vec2;

/// Point in polar coordinates (radius, angle in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    pub r: f32,
    pub theta: f32,
}

/// Point in Cartesian canvas coordinates (pixels, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartesianPoint {
    pub x: f32,
    pub y: f32,
}

impl PolarPoint {
    pub const fn new(r: f32, theta: f32) -> Self {
        Self { r, theta }
    }
}

impl CartesianPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<CartesianPoint> for Vec2 {
    fn from(p: CartesianPoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Cartesian equivalent of a polar point around (0, 0)
pub fn to_cartesian(p: PolarPoint) -> CartesianPoint {
    let (sin, cos) = p.theta.sin_cos();
    CartesianPoint::new(p.r * cos, p.r * sin)
}

/// Polar equivalent of a Cartesian point around (0, 0)
pub fn to_polar(p: CartesianPoint) -> PolarPoint {
    PolarPoint::new(p.x.hypot(p.y), p.y.atan2(p.x))
}

/// Express `p` in a coordinate system whose origin sits at `origin`
pub fn translate(p: CartesianPoint, origin: CartesianPoint) -> CartesianPoint {
    CartesianPoint::new(p.x + origin.x, p.y + origin.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_to_cartesian_quarter_turns() {
        let right = to_cartesian(PolarPoint::new(2.0, 0.0));
        assert_relative_eq!(right.x, 2.0);
        assert_relative_eq!(right.y, 0.0);

        // Positive angles turn toward +y (downward on the canvas)
        let down = to_cartesian(PolarPoint::new(2.0, FRAC_PI_2));
        assert_relative_eq!(down.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(down.y, 2.0);
    }

    #[test]
    fn test_polar_cartesian_inverse() {
        let p = PolarPoint::new(3.5, 0.75 * PI);
        let back = to_polar(to_cartesian(p));
        assert_relative_eq!(back.r, p.r, epsilon = 1e-5);
        assert_relative_eq!(back.theta, p.theta, epsilon = 1e-5);
    }

    #[test]
    fn test_translate() {
        let p = translate(
            CartesianPoint::new(1.0, -2.0),
            CartesianPoint::new(100.0, 50.0),
        );
        assert_eq!(p, CartesianPoint::new(101.0, 48.0));
    }
}
