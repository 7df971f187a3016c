/*
 * Point Module
 *
 * This module defines the Point struct, a single particle of the globe.
 * Surface and water points ride a rigid spin around the Y axis. Cloud points
 * are boids: they integrate a flocking acceleration (see flocking.rs) across
 * the globe's X/Y while keeping their depth, then orbit with the spin.
 */

use std::cmp::Ordering;
use std::f32::consts::PI;

use rand::Rng;

use crate::camera::Camera;
use crate::canvas::{Canvas, Circle};
use crate::settings::SceneSettings;
use crate::vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointStyle {
    Surface,
    Water,
    Cloud,
}

#[derive(Clone, Debug)]
pub struct Point {
    pub position: Vector,
    pub velocity: Vector,
    pub theta: f32,
    pub phi: f32,
    pub style: PointStyle,
}

impl Point {
    pub fn new(position: Vector, velocity: Vector, style: PointStyle) -> Self {
        Self {
            position,
            velocity,
            theta: 0.0,
            phi: 0.0,
            style,
        }
    }

    // Place a point on a sphere of `radius` at azimuth theta and polar angle phi
    pub fn from_spherical(radius: f32, theta: f32, phi: f32, velocity: Vector, style: PointStyle) -> Self {
        let position = Vector::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        );
        Self {
            position,
            velocity,
            theta,
            phi,
            style,
        }
    }

    /// A point uniformly distributed over the sphere for its style.
    /// Cloud points get a small diagonal drift with a random sign.
    pub fn random<R: Rng>(style: PointStyle, settings: &SceneSettings, rng: &mut R) -> Self {
        let theta = rng.gen::<f32>() * 2.0 * PI;
        let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
        let velocity = match style {
            PointStyle::Cloud => {
                let sign = if rng.gen::<f32>() > 0.5 { 1.0 } else { -1.0 };
                Vector::new(
                    sign * rng.gen::<f32>() / 200.0,
                    sign * rng.gen::<f32>() / 200.0,
                    0.0,
                )
            }
            PointStyle::Surface | PointStyle::Water => Vector::ZERO,
        };
        Self::from_spherical(settings.style(style).radius, theta, phi, velocity, style)
    }

    pub fn is_cloud(&self) -> bool {
        self.style == PointStyle::Cloud
    }

    pub fn rotate_x(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let (y, z) = (self.position.y, self.position.z);
        self.position.y = y * cos + z * sin;
        self.position.z = -y * sin + z * cos;
    }

    pub fn rotate_y(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let (x, z) = (self.position.x, self.position.z);
        self.position.x = x * cos + z * sin;
        self.position.z = -x * sin + z * cos;
    }

    pub fn rotate_z(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let (x, y) = (self.position.x, self.position.y);
        self.position.x = x * cos + y * sin;
        self.position.y = -x * sin + y * cos;
    }

    // One frame of the globe's spin for surface and water points
    pub fn spin(&mut self, settings: &SceneSettings) {
        self.rotate_y(settings.rotation);
    }

    /// Integrate one frame of cloud motion from a steering acceleration.
    /// Depth is restored after the position update so clouds only drift
    /// across the globe, never towards or away from the camera.
    pub fn drift(&mut self, acceleration: &Vector, settings: &SceneSettings) {
        let z = self.position.z;
        self.velocity.add(acceleration).limit(settings.max_speed);
        self.position.add(&self.velocity);
        self.position.z = z;

        self.rotate_x(self.velocity.x);
        self.rotate_y(self.velocity.y);
        self.rotate_y(settings.rotation / 2.0);
    }

    // Draw the point, returning false when it was culled
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, camera: &Camera, settings: &SceneSettings) -> bool {
        let Some(projected) = camera.project(&self.position, canvas.width(), canvas.height()) else {
            return false;
        };
        let style = settings.style(self.style);
        canvas.fill_circle(Circle {
            x: projected.x,
            y: projected.y,
            radius: (projected.scale * style.scale).abs(),
            color: style.color,
            alpha: 1.0,
            glow: 0.0,
        });
        true
    }
}

// Far-to-near order for the painter's algorithm
pub fn depth_order(a: &Point, b: &Point) -> Ordering {
    b.position.z.total_cmp(&a.position.z)
}

pub fn sort_by_depth(points: &mut [Point]) {
    points.sort_by(depth_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CommandBuffer;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-3;

    #[test]
    fn spherical_points_sit_on_their_radius() {
        let settings = SceneSettings::default();
        let mut rng = StdRng::seed_from_u64(7);
        for style in [PointStyle::Surface, PointStyle::Water, PointStyle::Cloud] {
            for _ in 0..50 {
                let p = Point::random(style, &settings, &mut rng);
                let radius = settings.style(style).radius;
                assert!((p.position.magnitude() - radius).abs() < radius * 1e-4);
                assert_eq!(p.style, style);
            }
        }
    }

    #[test]
    fn cloud_velocity_is_small_and_flat() {
        let settings = SceneSettings::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let p = Point::random(PointStyle::Cloud, &settings, &mut rng);
            assert_eq!(p.velocity.z, 0.0);
            assert!(p.velocity.x.abs() <= 1.0 / 200.0);
            assert!(p.velocity.y.abs() <= 1.0 / 200.0);
            assert!(p.velocity.x * p.velocity.y >= 0.0);
        }
        let p = Point::random(PointStyle::Water, &settings, &mut rng);
        assert_eq!(p.velocity, Vector::ZERO);
    }

    #[test]
    fn rotate_y_quarter_turn() {
        let mut p = Point::new(Vector::new(10.0, 5.0, 0.0), Vector::ZERO, PointStyle::Water);
        p.rotate_y(PI / 2.0);
        assert!(p.position.x.abs() < EPS);
        assert!((p.position.z + 10.0).abs() < EPS);
        assert_eq!(p.position.y, 5.0);
    }

    #[test]
    fn rotate_x_and_z_leave_their_axis_alone() {
        let mut p = Point::new(Vector::new(1.0, 2.0, 3.0), Vector::ZERO, PointStyle::Water);
        p.rotate_x(0.7);
        assert_eq!(p.position.x, 1.0);
        p.rotate_z(0.3);
        assert!((p.position.magnitude() - 14.0f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn drift_keeps_depth_before_rotation() {
        let settings = SceneSettings {
            rotation: 0.0,
            ..SceneSettings::default()
        };
        // Velocity has no x/y component, so every rotation is the identity
        let mut p = Point::new(Vector::new(3.0, 4.0, 12.0), Vector::ZERO, PointStyle::Cloud);
        p.drift(&Vector::new(0.0, 0.0, 0.01), &settings);
        assert_eq!(p.position.x, 3.0);
        assert_eq!(p.position.y, 4.0);
        assert_eq!(p.position.z, 12.0);
    }

    #[test]
    fn drift_clamps_velocity() {
        let settings = SceneSettings::default();
        let mut p = Point::new(Vector::new(0.0, 0.0, 170.0), Vector::ZERO, PointStyle::Cloud);
        p.drift(&Vector::new(1.0, 1.0, 0.0), &settings);
        assert!((p.velocity.magnitude() - settings.max_speed).abs() < 1e-6);
    }

    #[test]
    fn culled_point_never_draws() {
        let settings = SceneSettings::default();
        let camera = Camera::from_settings(&settings);
        let mut canvas = CommandBuffer::new(800.0, 600.0);

        let far_side = Point::new(Vector::new(0.0, 0.0, 30.0), Vector::ZERO, PointStyle::Surface);
        assert!(!far_side.draw(&mut canvas, &camera, &settings));
        assert!(canvas.is_empty());

        let near_side = Point::new(Vector::new(0.0, 0.0, -30.0), Vector::ZERO, PointStyle::Surface);
        assert!(near_side.draw(&mut canvas, &camera, &settings));
        let circle = canvas.circles().next().unwrap();
        assert_eq!((circle.x, circle.y), (400.0, 300.0));
        assert!((circle.radius - 15.0 * 400.0 / 370.0).abs() < EPS);
    }

    #[test]
    fn sort_by_depth_is_descending() {
        let mut points: Vec<Point> = [3.0, -7.0, 12.0, 0.0, 12.0, -1.0]
            .iter()
            .map(|&z| Point::new(Vector::new(0.0, 0.0, z), Vector::ZERO, PointStyle::Water))
            .collect();
        sort_by_depth(&mut points);
        for pair in points.windows(2) {
            assert!(pair[0].position.z >= pair[1].position.z);
        }
    }

    proptest! {
        #[test]
        fn rotate_y_preserves_norm(
            x in -200.0f32..200.0,
            y in -200.0f32..200.0,
            z in -200.0f32..200.0,
            angles in prop::collection::vec(-6.3f32..6.3, 1..20),
        ) {
            let mut p = Point::new(Vector::new(x, y, z), Vector::ZERO, PointStyle::Water);
            let before = p.position.magnitude();
            for angle in angles {
                p.rotate_y(angle);
            }
            prop_assert!((p.position.magnitude() - before).abs() <= 1e-3 * before.max(1.0));
        }

        #[test]
        fn depth_sort_orders_any_input(zs in prop::collection::vec(-200.0f32..200.0, 0..64)) {
            let mut points: Vec<Point> = zs
                .iter()
                .map(|&z| Point::new(Vector::new(0.0, 0.0, z), Vector::ZERO, PointStyle::Water))
                .collect();
            sort_by_depth(&mut points);
            for pair in points.windows(2) {
                prop_assert!(pair[0].position.z >= pair[1].position.z);
            }
        }
    }
}
