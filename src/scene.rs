/*
 * Scene Module
 *
 * This module defines the Scene: the globe's surface and water points, its
 * flocking clouds and the starfield backdrop, plus the frame loop that
 * drives them. Each frame:
 *
 * 1. Repaint the starfield (this clears the canvas)
 * 2. Spin the surface and water points, then step the clouds
 * 3. Sort each collection far-to-near and draw it, sphere before clouds
 *
 * Clouds are always painted over the sphere regardless of depth; sorting
 * happens within each collection only.
 */

use rand::rngs::StdRng;

use crate::animation::{FrameHandle, FrameLoop, LoopState};
use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::flocking::step_clouds;
use crate::point::{sort_by_depth, Point, PointStyle};
use crate::settings::{ConfigError, SceneSettings, StarSettings};
use crate::spatial_grid::SpatialGrid;
use crate::starfield::StarField;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("canvas has no drawable area ({width}x{height})")]
    EmptyCanvas { width: f32, height: f32 },

    #[error("invalid scene settings: {0}")]
    Settings(#[from] ConfigError),

    #[error("window {0} not found")]
    MissingWindow(String),
}

// What one frame put on the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub points_drawn: usize,
    pub points_culled: usize,
    pub clouds_drawn: usize,
    pub clouds_culled: usize,
    pub stars_drawn: usize,
}

pub struct Scene {
    settings: SceneSettings,
    star_settings: StarSettings,
    camera: Camera,
    width: f32,
    height: f32,
    current_time: f64,
    dt: f64,
    points: Vec<Point>,
    clouds: Vec<Point>,
    starfield: StarField,
    frames: FrameLoop,
    grid: Option<SpatialGrid>,
    rng: StdRng,
}

fn check_canvas(width: f32, height: f32) -> Result<(), SceneError> {
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Ok(())
    } else {
        Err(SceneError::EmptyCanvas { width, height })
    }
}

impl Scene {
    /// Build the globe at random spherical positions and a starfield for the
    /// given canvas size. Sphere points from `water_points` onwards are
    /// surface (land); the rest are water.
    pub fn new(
        width: f32,
        height: f32,
        settings: SceneSettings,
        star_settings: StarSettings,
        mut rng: StdRng,
    ) -> Result<Self, SceneError> {
        let points = (0..settings.sphere_points)
            .map(|i| {
                let style = if i >= settings.water_points {
                    PointStyle::Surface
                } else {
                    PointStyle::Water
                };
                Point::random(style, &settings, &mut rng)
            })
            .collect();
        let clouds = (0..settings.cloud_points)
            .map(|_| Point::random(PointStyle::Cloud, &settings, &mut rng))
            .collect();
        let starfield = StarField::generate(width, height, &star_settings, &mut rng);

        let scene = Self::from_parts(width, height, settings, star_settings, points, clouds, starfield, rng)?;
        log::info!(
            "built scene {}x{} with {} sphere points, {} clouds and {} stars",
            width,
            height,
            scene.points.len(),
            scene.clouds.len(),
            scene.starfield.len()
        );
        Ok(scene)
    }

    // Assemble a scene from explicit points and stars
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        width: f32,
        height: f32,
        settings: SceneSettings,
        star_settings: StarSettings,
        points: Vec<Point>,
        clouds: Vec<Point>,
        starfield: StarField,
        rng: StdRng,
    ) -> Result<Self, SceneError> {
        check_canvas(width, height)?;
        settings.validate()?;
        star_settings.validate()?;

        let grid = settings.spatial_grid.then(|| {
            SpatialGrid::new(settings.neighbor_radius.max(settings.desired_separation))
        });

        Ok(Self {
            camera: Camera::from_settings(&settings),
            settings,
            star_settings,
            width,
            height,
            current_time: 0.0,
            dt: 0.0,
            points,
            clouds,
            starfield,
            frames: FrameLoop::new(),
            grid,
            rng,
        })
    }

    pub fn enable(&mut self) -> FrameHandle {
        let was_running = self.frames.is_running();
        let handle = self.frames.enable();
        if !was_running {
            log::info!("scene animation started");
        }
        handle
    }

    pub fn disable(&mut self) {
        if let Some(handle) = self.frames.disable() {
            log::info!("scene animation paused, cancelled frame {}", handle.id());
        }
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    pub fn state(&self) -> LoopState {
        self.frames.state()
    }

    /// Run one scheduled frame: request the next frame first, then update.
    /// Returns None without touching the canvas when the loop is not running.
    pub fn animate<C: Canvas + ?Sized>(&mut self, time: f64, canvas: &mut C) -> Option<FrameStats> {
        self.frames.request_next()?;
        Some(self.update(time, canvas))
    }

    // Advance every point one frame and paint the whole scene
    pub fn update<C: Canvas + ?Sized>(&mut self, time: f64, canvas: &mut C) -> FrameStats {
        self.dt = time - self.current_time;
        self.current_time = time;

        let mut stats = FrameStats {
            stars_drawn: self.starfield.render(canvas, &self.star_settings),
            ..FrameStats::default()
        };

        for point in &mut self.points {
            point.spin(&self.settings);
        }
        step_clouds(&mut self.clouds, &self.settings, self.grid.as_mut());

        sort_by_depth(&mut self.points);
        sort_by_depth(&mut self.clouds);

        for point in &self.points {
            if point.draw(canvas, &self.camera, &self.settings) {
                stats.points_drawn += 1;
            } else {
                stats.points_culled += 1;
            }
        }
        for cloud in &self.clouds {
            if cloud.draw(canvas, &self.camera, &self.settings) {
                stats.clouds_drawn += 1;
            } else {
                stats.clouds_culled += 1;
            }
        }

        stats
    }

    /// Adopt a new canvas size and regenerate the starfield for it. The
    /// globe keeps its geometry; projection re-centres it.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SceneError> {
        check_canvas(width, height)?;
        self.width = width;
        self.height = height;
        self.starfield = StarField::generate(width, height, &self.star_settings, &mut self.rng);
        log::debug!(
            "canvas resized to {}x{}, regenerated {} stars",
            width,
            height,
            self.starfield.len()
        );
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn clouds(&self) -> &[Point] {
        &self.clouds
    }

    pub fn starfield(&self) -> &StarField {
        &self.starfield
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }
}
