/*
 * Vector Module
 *
 * This module defines the Vector struct used for every position, velocity
 * and steering force in the scene. The in-place operations mutate the
 * receiver and return it so calls can be chained:
 *
 *     velocity.add(&acceleration).limit(max_speed);
 *
 * The free functions `add`, `subtract`, `multiply` and `divide` (and the
 * std::ops operators) work on copies and leave their arguments alone.
 */

use std::ops;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn copy(&self) -> Vector {
        *self
    }

    pub fn add(&mut self, other: &Vector) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
        self
    }

    pub fn subtract(&mut self, other: &Vector) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
        self
    }

    pub fn multiply(&mut self, n: f32) -> &mut Self {
        self.x *= n;
        self.y *= n;
        self.z *= n;
        self
    }

    // Division by zero is not guarded; the result follows IEEE rules
    pub fn divide(&mut self, n: f32) -> &mut Self {
        self.x /= n;
        self.y /= n;
        self.z /= n;
        self
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    // Scale to unit length; zero vectors are left untouched
    pub fn normalize(&mut self) -> &mut Self {
        let m = self.magnitude();
        if m > 0.0 {
            self.divide(m);
        }
        self
    }

    // Clamp the magnitude to `max`, keeping the direction
    pub fn limit(&mut self, max: f32) -> &mut Self {
        if self.magnitude() > max {
            self.normalize();
            self.multiply(max);
        }
        self
    }

    pub fn distance(&self, other: &Vector) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance with the X/Y axes treated as a torus of the given size.
    /// Z is measured directly.
    pub fn wrapped_distance(&self, other: &Vector, width: f32, height: f32) -> f32 {
        let mut dx = (self.x - other.x).abs();
        let mut dy = (self.y - other.y).abs();
        let dz = (self.z - other.z).abs();
        if dx >= width / 2.0 {
            dx = width - dx;
        }
        if dy >= height / 2.0 {
            dy = height - dy;
        }
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Returns a copy of `self` shifted by one torus period on each of X/Y
    /// where that brings it closer to `location`.
    pub fn wrap_relative_to(&self, location: &Vector, width: f32, height: f32) -> Vector {
        let mut v = *self;
        let dx = self.x - location.x;
        if dx.abs() > width / 2.0 {
            v.x = if dx > 0.0 { self.x - width } else { self.x + width };
        }
        let dy = self.y - location.y;
        if dy.abs() > height / 2.0 {
            v.y = if dy > 0.0 { self.y - height } else { self.y + height };
        }
        v
    }

    pub fn dot(&self, other: &Vector) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    // Angle of the XY projection, in radians
    pub fn heading(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Scales `other` by `self · other`. Meant for a unit-length `other`.
    pub fn project_onto(&self, other: &Vector) -> Vector {
        multiply(other, self.dot(other))
    }

    // True when any component is NaN or infinite
    pub fn invalid(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite())
    }
}

pub fn add(a: &Vector, b: &Vector) -> Vector {
    let mut v = a.copy();
    v.add(b);
    v
}

pub fn subtract(a: &Vector, b: &Vector) -> Vector {
    let mut v = a.copy();
    v.subtract(b);
    v
}

pub fn multiply(a: &Vector, n: f32) -> Vector {
    let mut v = a.copy();
    v.multiply(n);
    v
}

pub fn divide(a: &Vector, n: f32) -> Vector {
    let mut v = a.copy();
    v.divide(n);
    v
}

impl ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        add(&self, &rhs)
    }
}

impl ops::Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        subtract(&self, &rhs)
    }
}

impl ops::Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        multiply(&self, rhs)
    }
}

impl ops::Div<f32> for Vector {
    type Output = Vector;

    fn div(self, rhs: f32) -> Vector {
        divide(&self, rhs)
    }
}

impl ops::Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl ops::AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        Vector::add(self, &rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn operations_chain_on_receiver() {
        let mut v = Vector::new(1.0, 2.0, 3.0);
        v.add(&Vector::new(1.0, 1.0, 1.0)).multiply(2.0).subtract(&Vector::new(4.0, 6.0, 8.0));
        assert_eq!(v, Vector::ZERO);
    }

    #[test]
    fn free_functions_leave_arguments_alone() {
        let a = Vector::new(3.0, 4.0, 0.0);
        let b = Vector::new(1.0, 1.0, 1.0);
        let sum = add(&a, &b);
        let diff = subtract(&a, &b);
        let scaled = multiply(&a, 2.0);
        let halved = divide(&a, 2.0);
        assert_eq!(a, Vector::new(3.0, 4.0, 0.0));
        assert_eq!(b, Vector::new(1.0, 1.0, 1.0));
        assert_eq!(sum, Vector::new(4.0, 5.0, 1.0));
        assert_eq!(diff, Vector::new(2.0, 3.0, -1.0));
        assert_eq!(scaled, Vector::new(6.0, 8.0, 0.0));
        assert_eq!(halved, Vector::new(1.5, 2.0, 0.0));
        assert_eq!(a + b, sum);
        assert_eq!(a - b, diff);
    }

    #[test]
    fn normalize_zero_vector_is_a_no_op() {
        let mut v = Vector::ZERO;
        v.normalize();
        assert_eq!(v, Vector::ZERO);
        assert!(!v.invalid());
    }

    #[test]
    fn normalize_produces_unit_length() {
        let mut v = Vector::new(3.0, 4.0, 12.0);
        v.normalize();
        assert!((v.magnitude() - 1.0).abs() < EPS);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 6.0, 3.0);
        assert!((a.distance(&b) - 5.0).abs() < EPS);
    }

    #[test]
    fn wrapped_distance_takes_short_way_round() {
        let a = Vector::new(5.0, 300.0, 0.0);
        let b = Vector::new(795.0, 300.0, 0.0);
        assert!((a.wrapped_distance(&b, 800.0, 600.0) - 10.0).abs() < EPS);
        assert!((a.distance(&b) - 790.0).abs() < EPS);
    }

    #[test]
    fn wrap_relative_to_moves_across_the_seam() {
        let far = Vector::new(795.0, 10.0, 0.0);
        let here = Vector::new(5.0, 10.0, 0.0);
        let wrapped = far.wrap_relative_to(&here, 800.0, 600.0);
        assert!((wrapped.x + 5.0).abs() < EPS);
        assert_eq!(wrapped.y, 10.0);
    }

    #[test]
    fn heading_and_projection() {
        let v = Vector::new(0.0, 2.0, 0.0);
        assert!((v.heading() - std::f32::consts::FRAC_PI_2).abs() < EPS);

        let p = Vector::new(3.0, 4.0, 5.0).project_onto(&Vector::new(1.0, 0.0, 0.0));
        assert_eq!(p, Vector::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_flags_nan_and_infinity() {
        assert!(Vector::new(f32::NAN, 0.0, 0.0).invalid());
        assert!(Vector::new(0.0, f32::INFINITY, 0.0).invalid());
        assert!(!Vector::new(1.0, 2.0, 3.0).invalid());
    }

    fn component() -> impl Strategy<Value = f32> {
        -1000.0f32..1000.0
    }

    proptest! {
        #[test]
        fn limit_clamps_only_long_vectors(
            x in component(),
            y in component(),
            z in component(),
            max in 0.01f32..500.0,
        ) {
            let original = Vector::new(x, y, z);
            let mut v = original;
            v.limit(max);
            if original.magnitude() > max {
                prop_assert!((v.magnitude() - max).abs() <= max * 1e-4);
            } else {
                prop_assert_eq!(v, original);
            }
        }

        #[test]
        fn normalize_never_produces_nan(x in component(), y in component(), z in component()) {
            let mut v = Vector::new(x, y, z);
            v.normalize();
            prop_assert!(!v.invalid());
        }
    }
}
