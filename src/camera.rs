/*
 * Camera Module
 *
 * This module defines the Camera struct that maps scene space onto the
 * canvas. Scene space is centred on the globe; the camera sits on the
 * negative z side looking down +z, so larger z is further away.
 *
 *     scale = fov / (fov + z)
 *     screen = (x, y) * scale + canvas centre
 *
 * Points with z > cull_z sit on the far side of the globe and are culled.
 */

use crate::settings::SceneSettings;
use crate::vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub fov: f32,
    pub cull_z: f32,
}

impl Camera {
    pub fn new(fov: f32, cull_z: f32) -> Self {
        Self { fov, cull_z }
    }

    pub fn from_settings(settings: &SceneSettings) -> Self {
        Self::new(settings.fov, settings.cull_z)
    }

    #[inline]
    pub fn is_culled(&self, position: &Vector) -> bool {
        position.z > self.cull_z
    }

    // Perspective scale factor at depth `z`
    #[inline]
    pub fn scale_at(&self, z: f32) -> f32 {
        self.fov / (self.fov + z)
    }

    // Convert a point from scene space to canvas space, None when culled
    pub fn project(&self, position: &Vector, width: f32, height: f32) -> Option<Projected> {
        if self.is_culled(position) {
            return None;
        }
        let scale = self.scale_at(position.z);
        Some(Projected {
            x: position.x * scale + width / 2.0,
            y: position.y * scale + height / 2.0,
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_canvas_centre() {
        let camera = Camera::new(400.0, 25.0);
        let p = camera.project(&Vector::ZERO, 800.0, 600.0).unwrap();
        assert_eq!(p, Projected { x: 400.0, y: 300.0, scale: 1.0 });
    }

    #[test]
    fn nearer_points_appear_larger() {
        let camera = Camera::new(400.0, 25.0);
        assert!(camera.scale_at(-100.0) > camera.scale_at(0.0));
        assert!(camera.scale_at(0.0) > camera.scale_at(20.0));
    }

    #[test]
    fn points_past_threshold_are_culled() {
        let camera = Camera::new(400.0, 25.0);
        assert!(camera.project(&Vector::new(0.0, 0.0, 25.5), 800.0, 600.0).is_none());
        assert!(camera.project(&Vector::new(0.0, 0.0, 25.0), 800.0, 600.0).is_some());
    }

    #[test]
    fn projection_scales_offsets() {
        let camera = Camera::new(400.0, 25.0);
        let p = camera.project(&Vector::new(100.0, -50.0, -200.0), 800.0, 600.0).unwrap();
        assert!((p.scale - 2.0).abs() < 1e-6);
        assert!((p.x - 600.0).abs() < 1e-4);
        assert!((p.y - 200.0).abs() < 1e-4);
    }
}
