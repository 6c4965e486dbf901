use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// 2D vector with chainable in-place operations and `*_new` counterparts
/// that leave the receiver untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn reset(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn reset_to(&mut self, other: Vector2) -> &mut Self {
        self.x = other.x;
        self.y = other.y;
        self
    }

    pub fn add(&mut self, rhs: Vector2) -> &mut Self {
        self.x += rhs.x;
        self.y += rhs.y;
        self
    }

    pub fn add_new(&self, rhs: Vector2) -> Vector2 {
        let mut v = *self;
        Vector2::add(&mut v, rhs);
        v
    }

    pub fn add_scalar(&mut self, scalar: f64) -> &mut Self {
        self.add(Vector2::new(scalar, scalar))
    }

    pub fn add_scalar_new(&self, scalar: f64) -> Vector2 {
        let mut v = *self;
        v.add_scalar(scalar);
        v
    }

    pub fn subtract(&mut self, rhs: Vector2) -> &mut Self {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self
    }

    pub fn subtract_new(&self, rhs: Vector2) -> Vector2 {
        let mut v = *self;
        v.subtract(rhs);
        v
    }

    pub fn subtract_scalar(&mut self, scalar: f64) -> &mut Self {
        self.subtract(Vector2::new(scalar, scalar))
    }

    pub fn subtract_scalar_new(&self, scalar: f64) -> Vector2 {
        let mut v = *self;
        v.subtract_scalar(scalar);
        v
    }

    pub fn multiply(&mut self, rhs: Vector2) -> &mut Self {
        self.x *= rhs.x;
        self.y *= rhs.y;
        self
    }

    pub fn multiply_new(&self, rhs: Vector2) -> Vector2 {
        let mut v = *self;
        v.multiply(rhs);
        v
    }

    pub fn multiply_scalar(&mut self, scalar: f64) -> &mut Self {
        self.multiply(Vector2::new(scalar, scalar))
    }

    pub fn multiply_scalar_new(&self, scalar: f64) -> Vector2 {
        let mut v = *self;
        v.multiply_scalar(scalar);
        v
    }

    /// Alias of [`Vector2::multiply_scalar`].
    pub fn scale(&mut self, scalar: f64) -> &mut Self {
        self.multiply_scalar(scalar)
    }

    /// Alias of [`Vector2::multiply_scalar_new`].
    pub fn scale_new(&self, scalar: f64) -> Vector2 {
        self.multiply_scalar_new(scalar)
    }

    /// Componentwise division. A zero component in `rhs` zeroes the
    /// corresponding component instead of producing an infinity; the
    /// simulation relies on this to stay finite.
    pub fn divide(&mut self, rhs: Vector2) -> &mut Self {
        self.x = if rhs.x != 0.0 { self.x / rhs.x } else { 0.0 };
        self.y = if rhs.y != 0.0 { self.y / rhs.y } else { 0.0 };
        self
    }

    pub fn divide_new(&self, rhs: Vector2) -> Vector2 {
        let mut v = *self;
        v.divide(rhs);
        v
    }

    pub fn divide_scalar(&mut self, scalar: f64) -> &mut Self {
        self.divide(Vector2::new(scalar, scalar))
    }

    pub fn divide_scalar_new(&self, scalar: f64) -> Vector2 {
        let mut v = *self;
        v.divide_scalar(scalar);
        v
    }

    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        let (sin, cos) = radians.sin_cos();
        let x = self.x * cos - self.y * sin;
        let y = self.x * sin + self.y * cos;
        self.x = x;
        self.y = y;
        self
    }

    pub fn rotate_new(&self, radians: f64) -> Vector2 {
        let mut v = *self;
        v.rotate(radians);
        v
    }

    pub fn rotate_deg(&mut self, degrees: f64) -> &mut Self {
        self.rotate(degrees.to_radians())
    }

    pub fn rotate_deg_new(&self, degrees: f64) -> Vector2 {
        self.rotate_new(degrees.to_radians())
    }

    /// Rotates to an absolute angle by applying the delta from the current one.
    pub fn rotate_to(&mut self, radians: f64) -> &mut Self {
        let delta = radians - self.angle();
        self.rotate(delta)
    }

    pub fn rotate_to_new(&self, radians: f64) -> Vector2 {
        let mut v = *self;
        v.rotate_to(radians);
        v
    }

    pub fn rotate_to_deg(&mut self, degrees: f64) -> &mut Self {
        self.rotate_to(degrees.to_radians())
    }

    pub fn rotate_to_deg_new(&self, degrees: f64) -> Vector2 {
        self.rotate_to_new(degrees.to_radians())
    }

    /// Divides the vector by its own length. A zero vector stays zero via
    /// the [`Vector2::divide`] policy rather than degenerating to NaN.
    pub fn normalise(&mut self) -> &mut Self {
        let length = self.length();
        self.divide_scalar(length)
    }

    pub fn normalise_new(&self) -> Vector2 {
        let mut v = *self;
        v.normalise();
        v
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle().to_degrees()
    }

    /// Rescales the vector to the requested length.
    pub fn set_length(&mut self, length: f64) -> Result<(), VectorError> {
        if !length.is_finite() {
            return Err(VectorError::NonFinite);
        }
        let current = self.length();
        if current == 0.0 {
            return Err(VectorError::ZeroLength);
        }
        self.multiply_scalar(length / current);
        Ok(())
    }

    /// Rescales the vector by the ratio of the requested and current
    /// squared lengths.
    pub fn set_length_squared(&mut self, length_squared: f64) -> Result<(), VectorError> {
        if !length_squared.is_finite() {
            return Err(VectorError::NonFinite);
        }
        let current = self.length_squared();
        if current == 0.0 {
            return Err(VectorError::ZeroLength);
        }
        self.multiply_scalar(length_squared / current);
        Ok(())
    }

    pub fn distance(&self, other: Vector2) -> f64 {
        self.subtract_new(other).length()
    }

    pub fn distance_x(&self, other: Vector2) -> f64 {
        self.x - other.x
    }

    pub fn distance_y(&self, other: Vector2) -> f64 {
        self.y - other.y
    }

    pub fn dot(&self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar pseudo-cross `x1*x2 - y1*y2`, kept as-is from the original
    /// force math rather than the textbook `x1*y2 - y1*x2`.
    pub fn cross(&self, other: Vector2) -> f64 {
        self.x * other.x - self.y * other.y
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self * rhs.x, self * rhs.y)
    }
}

/// Failure modes of the fallible magnitude setters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorError {
    /// The vector has zero length, so no rescale factor exists.
    ZeroLength,
    /// The requested magnitude is NaN or infinite.
    NonFinite,
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::ZeroLength => write!(f, "cannot rescale a zero-length vector"),
            VectorError::NonFinite => write!(f, "magnitude must be finite"),
        }
    }
}

impl std::error::Error for VectorError {}

/// Read-only per-body state handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct BodySnapshot {
    pub position: Vector2,
    pub velocity: Vector2,
    pub mass: f64,
    pub size: f64,
    pub fixed: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SimStats {
    pub body_count: usize,
    pub fixed_count: usize,
    pub total_mass: f64,
    pub max_speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorId {
    White,
    Gray,
    Yellow,
    Cyan,
    Red,
    Link,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    mod vector2_new {
        use super::*;

        #[test]
        fn creates_vector_with_given_coordinates() {
            let v = Vector2::new(3.0, 4.0);
            assert_eq!(v.x, 3.0);
            assert_eq!(v.y, 4.0);
        }

        #[test]
        fn zero_constant_is_origin() {
            assert_eq!(Vector2::ZERO.x, 0.0);
            assert_eq!(Vector2::ZERO.y, 0.0);
        }
    }

    mod vector2_reset {
        use super::*;

        #[test]
        fn reset_overwrites_both_components() {
            let mut v = Vector2::new(1.0, 2.0);
            v.reset(5.0, 6.0);
            assert_eq!(v, Vector2::new(5.0, 6.0));
        }

        #[test]
        fn reset_to_copies_other_vector() {
            let mut v = Vector2::new(1.0, 2.0);
            v.reset_to(Vector2::new(-3.0, 7.0));
            assert_eq!(v, Vector2::new(-3.0, 7.0));
        }
    }

    mod vector2_add {
        use super::*;

        #[test]
        fn mutates_receiver_in_place() {
            let mut v = Vector2::new(1.0, 2.0);
            v.add(Vector2::new(3.0, 4.0));
            assert_eq!(v, Vector2::new(4.0, 6.0));
        }

        #[test]
        fn add_new_leaves_receiver_untouched() {
            let v = Vector2::new(1.0, 2.0);
            let w = v.add_new(Vector2::new(3.0, 4.0));
            assert_eq!(v, Vector2::new(1.0, 2.0));
            assert_eq!(w, Vector2::new(4.0, 6.0));
        }

        #[test]
        fn add_scalar_applies_to_both_components() {
            let mut v = Vector2::new(1.0, 2.0);
            v.add_scalar(3.0);
            assert_eq!(v, Vector2::new(4.0, 5.0));
        }

        #[test]
        fn add_then_subtract_round_trips() {
            let mut v = Vector2::new(1.5, -2.25);
            let w = Vector2::new(0.3, 9.7);
            v.add(w).subtract(w);
            assert!((v.x - 1.5).abs() < EPS);
            assert!((v.y + 2.25).abs() < EPS);
        }
    }

    mod vector2_subtract {
        use super::*;

        #[test]
        fn subtracts_componentwise() {
            let mut v = Vector2::new(5.0, 7.0);
            v.subtract(Vector2::new(2.0, 3.0));
            assert_eq!(v, Vector2::new(3.0, 4.0));
        }

        #[test]
        fn subtract_scalar_applies_to_both_components() {
            let v = Vector2::new(5.0, 7.0).subtract_scalar_new(2.0);
            assert_eq!(v, Vector2::new(3.0, 5.0));
        }
    }

    mod vector2_multiply {
        use super::*;

        #[test]
        fn multiplies_componentwise() {
            let mut v = Vector2::new(2.0, 3.0);
            v.multiply(Vector2::new(4.0, -1.0));
            assert_eq!(v, Vector2::new(8.0, -3.0));
        }

        #[test]
        fn scale_is_scalar_multiplication() {
            let mut v = Vector2::new(2.0, 3.0);
            v.scale(2.0);
            assert_eq!(v, Vector2::new(4.0, 6.0));
        }

        #[test]
        fn scale_new_leaves_receiver_untouched() {
            let v = Vector2::new(2.0, 3.0);
            let w = v.scale_new(2.0);
            assert_eq!(v, Vector2::new(2.0, 3.0));
            assert_eq!(w, Vector2::new(4.0, 6.0));
        }
    }

    mod vector2_divide {
        use super::*;

        #[test]
        fn divides_componentwise() {
            let mut v = Vector2::new(8.0, 6.0);
            v.divide(Vector2::new(2.0, 3.0));
            assert_eq!(v, Vector2::new(4.0, 2.0));
        }

        #[test]
        fn zero_component_yields_zero_not_infinity() {
            let v = Vector2::new(5.0, 5.0).divide_new(Vector2::new(0.0, 2.0));
            assert_eq!(v, Vector2::new(0.0, 2.5));
        }

        #[test]
        fn divide_scalar_by_zero_yields_zero_vector() {
            let v = Vector2::new(5.0, 5.0).divide_scalar_new(0.0);
            assert_eq!(v, Vector2::ZERO);
        }
    }

    mod vector2_rotate {
        use super::*;
        use std::f64::consts::{FRAC_PI_2, PI};

        #[test]
        fn quarter_turn_maps_x_axis_to_y_axis() {
            let v = Vector2::new(1.0, 0.0).rotate_new(FRAC_PI_2);
            assert!(v.x.abs() < EPS);
            assert!((v.y - 1.0).abs() < EPS);
        }

        #[test]
        fn rotation_is_invertible() {
            let mut v = Vector2::new(3.0, -2.0);
            v.rotate(0.7).rotate(-0.7);
            assert!((v.x - 3.0).abs() < EPS);
            assert!((v.y + 2.0).abs() < EPS);
        }

        #[test]
        fn degree_variant_matches_radian_variant() {
            let a = Vector2::new(2.0, 5.0).rotate_new(PI);
            let b = Vector2::new(2.0, 5.0).rotate_deg_new(180.0);
            assert!((a.x - b.x).abs() < EPS);
            assert!((a.y - b.y).abs() < EPS);
        }

        #[test]
        fn rotate_to_reaches_absolute_angle() {
            let mut v = Vector2::new(1.0, 1.0);
            v.rotate_to(FRAC_PI_2);
            assert!((v.angle() - FRAC_PI_2).abs() < EPS);
            assert!((v.length() - 2.0_f64.sqrt()).abs() < EPS);
        }

        #[test]
        fn rotating_zero_vector_stays_zero() {
            let v = Vector2::ZERO.rotate_new(1.0);
            assert_eq!(v, Vector2::ZERO);
        }
    }

    mod vector2_length {
        use super::*;

        #[test]
        fn three_four_five_triangle() {
            let v = Vector2::new(3.0, 4.0);
            assert_eq!(v.length_squared(), 25.0);
            assert_eq!(v.length(), 5.0);
        }

        #[test]
        fn set_length_rescales_preserving_direction() {
            let mut v = Vector2::new(3.0, 4.0);
            v.set_length(10.0).unwrap();
            assert!((v.x - 6.0).abs() < EPS);
            assert!((v.y - 8.0).abs() < EPS);
        }

        #[test]
        fn set_length_on_zero_vector_errors() {
            let mut v = Vector2::ZERO;
            assert_eq!(v.set_length(5.0), Err(VectorError::ZeroLength));
            assert_eq!(v, Vector2::ZERO);
        }

        #[test]
        fn set_length_rejects_non_finite_target() {
            let mut v = Vector2::new(3.0, 4.0);
            assert_eq!(v.set_length(f64::NAN), Err(VectorError::NonFinite));
            assert_eq!(v, Vector2::new(3.0, 4.0));
        }

        #[test]
        fn set_length_squared_rescales_by_ratio() {
            let mut v = Vector2::new(3.0, 4.0);
            v.set_length_squared(50.0).unwrap();
            assert!((v.x - 6.0).abs() < EPS);
            assert!((v.y - 8.0).abs() < EPS);
        }
    }

    mod vector2_normalise {
        use super::*;

        #[test]
        fn unit_length_after_normalising() {
            let mut v = Vector2::new(3.0, 4.0);
            v.normalise();
            assert!((v.length() - 1.0).abs() < EPS);
            assert!((v.x - 0.6).abs() < EPS);
        }

        #[test]
        fn zero_vector_normalises_to_zero() {
            let v = Vector2::ZERO.normalise_new();
            assert_eq!(v, Vector2::ZERO);
        }
    }

    mod vector2_angle {
        use super::*;
        use std::f64::consts::FRAC_PI_2;

        #[test]
        fn angle_of_positive_y_axis() {
            let v = Vector2::new(0.0, 1.0);
            assert!((v.angle() - FRAC_PI_2).abs() < EPS);
        }

        #[test]
        fn angle_deg_converts() {
            let v = Vector2::new(0.0, 1.0);
            assert!((v.angle_deg() - 90.0).abs() < EPS);
        }
    }

    mod vector2_distance {
        use super::*;

        #[test]
        fn euclidean_distance() {
            let a = Vector2::new(0.0, 0.0);
            let b = Vector2::new(3.0, 4.0);
            assert_eq!(a.distance(b), 5.0);
        }

        #[test]
        fn per_axis_distance_is_signed() {
            let a = Vector2::new(1.0, 10.0);
            let b = Vector2::new(4.0, 2.0);
            assert_eq!(a.distance_x(b), -3.0);
            assert_eq!(a.distance_y(b), 8.0);
        }
    }

    mod vector2_dot_cross {
        use super::*;

        #[test]
        fn dot_product() {
            assert_eq!(Vector2::new(2.0, -3.0).dot(Vector2::new(-4.0, 2.0)), -14.0);
        }

        #[test]
        fn pseudo_cross_product() {
            assert_eq!(Vector2::new(2.0, -3.0).cross(Vector2::new(-4.0, 2.0)), -2.0);
            assert_eq!(Vector2::new(2.0, -4.0).cross(Vector2::new(-3.0, 2.0)), 2.0);
        }
    }

    mod vector2_operators {
        use super::*;

        #[test]
        fn operator_forms_match_method_forms() {
            let a = Vector2::new(1.0, 2.0);
            let b = Vector2::new(3.0, 4.0);
            assert_eq!(a + b, a.add_new(b));
            assert_eq!(a - b, a.subtract_new(b));
            assert_eq!(a * 2.0, a.scale_new(2.0));
            assert_eq!(2.0 * a, a.scale_new(2.0));
        }

        #[test]
        fn assign_operators_mutate() {
            let mut v = Vector2::new(1.0, 2.0);
            v += Vector2::new(1.0, 1.0);
            v -= Vector2::new(0.5, 0.5);
            assert_eq!(v, Vector2::new(1.5, 2.5));
        }
    }
}
