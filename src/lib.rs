/*
 * Starglobe - Module Definitions
 *
 * This file defines the module structure for the globe scene: a rotating
 * point-cloud planet with flocking clouds over a twinkling starfield.
 * The simulation modules (vector, point, flocking, starfield, scene) are
 * independent of nannou's windowing; app, renderer and ui hold the front end.
 */

// Re-export key components for easier access
pub use animation::{FrameHandle, FrameLoop, LoopState};
pub use camera::Camera;
pub use canvas::{Canvas, CommandBuffer};
pub use point::{Point, PointStyle};
pub use scene::{FrameStats, Scene, SceneError};
pub use settings::{ConfigError, SceneSettings, Settings, StarSettings};
pub use spatial_grid::SpatialGrid;
pub use starfield::{Star, StarField};
pub use vector::Vector;
pub use debug::DebugInfo;
pub use app::Model;

// Define modules
pub mod vector;
pub mod point;
pub mod flocking;
pub mod spatial_grid;
pub mod camera;
pub mod canvas;
pub mod starfield;
pub mod animation;
pub mod resize;
pub mod scene;
pub mod settings;
pub mod debug;
pub mod app;
pub mod ui;
pub mod renderer;
