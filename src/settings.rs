/*
 * Settings Module
 *
 * This module defines the immutable configuration for a scene: the globe and
 * flocking constants (SceneSettings), the starfield backdrop (StarSettings)
 * and the window front end (WindowSettings). Defaults reproduce the stock
 * look; a JSON file named by STARGLOBE_CONFIG can override any field.
 */

use std::fs;
use std::path::Path;
use std::time::Duration;

use nannou::color::Srgb;
use serde::{Deserialize, Deserializer};

use crate::point::PointStyle;

pub const CONFIG_ENV_VAR: &str = "STARGLOBE_CONFIG";

pub type Rgb8 = Srgb<u8>;

pub const MIN_NEIGHBOR_RADIUS: f32 = 1e-3;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

// Per-style geometry and paint
#[derive(Clone, Debug, Deserialize)]
pub struct StyleSettings {
    pub radius: f32,
    pub scale: f32,
    #[serde(deserialize_with = "deserialize_hex_color")]
    pub color: Rgb8,
}

impl StyleSettings {
    fn new(radius: f32, scale: f32, color: Rgb8) -> Self {
        Self { radius, scale, color }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub sphere_points: usize,
    pub water_points: usize,
    pub cloud_points: usize,
    pub rotation: f32,
    pub fov: f32,
    pub cull_z: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub desired_separation: f32,
    pub neighbor_radius: f32,
    pub depth_layer: f32,
    pub arrival_distance: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub spatial_grid: bool,
    pub surface: StyleSettings,
    pub water: StyleSettings,
    pub cloud: StyleSettings,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sphere_points: 1800,
            water_points: 1601,
            cloud_points: 200,
            rotation: 0.006,
            fov: 400.0,
            cull_z: 25.0,
            max_speed: 0.015,
            max_force: 0.10,
            desired_separation: 0.5,
            neighbor_radius: 50.0,
            depth_layer: 20.0,
            arrival_distance: 100.0,
            separation_weight: 2.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            spatial_grid: false,
            surface: StyleSettings::new(140.0, 15.0, Srgb::new(0x27, 0xae, 0x60)),
            water: StyleSettings::new(120.0, 20.0, Srgb::new(0x29, 0x80, 0xb9)),
            cloud: StyleSettings::new(170.0, 6.0, Srgb::new(0xec, 0xf0, 0xf1)),
        }
    }
}

impl SceneSettings {
    pub fn style(&self, style: PointStyle) -> &StyleSettings {
        match style {
            PointStyle::Surface => &self.surface,
            PointStyle::Water => &self.water,
            PointStyle::Cloud => &self.cloud,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov > 0.0) {
            return Err(invalid("fov", "must be positive"));
        }
        if self.water_points > self.sphere_points {
            return Err(invalid("water_points", "cannot exceed sphere_points"));
        }
        // Also the spatial grid's cell size
        if !(self.neighbor_radius >= MIN_NEIGHBOR_RADIUS) {
            return Err(invalid("neighbor_radius", "must be at least 0.001"));
        }
        if !(self.desired_separation > 0.0) {
            return Err(invalid("desired_separation", "must be positive"));
        }
        if !(self.depth_layer > 0.0) {
            return Err(invalid("depth_layer", "must be positive"));
        }
        if !(self.max_speed > 0.0) {
            return Err(invalid("max_speed", "must be positive"));
        }
        if !(self.max_force > 0.0) {
            return Err(invalid("max_force", "must be positive"));
        }
        if !(self.arrival_distance > 0.0) {
            return Err(invalid("arrival_distance", "must be positive"));
        }
        for style in [&self.surface, &self.water, &self.cloud] {
            if !(style.radius > 0.0) {
                return Err(invalid("radius", "style radius must be positive"));
            }
            if !(style.scale > 0.0) {
                return Err(invalid("scale", "style scale must be positive"));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StarSettings {
    pub count: usize,
    #[serde(deserialize_with = "deserialize_hex_color")]
    pub color: Rgb8,
    pub size: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub twinkle_amplitude: f32,
    pub glow: f32,
    pub visibility_epsilon: f32,
    pub gradient_drift: f32,
    pub gradient_step: f32,
    pub gradient_radius_factor: f32,
    pub gradient_stops: Vec<GradientStopSettings>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GradientStopSettings {
    pub offset: f32,
    #[serde(deserialize_with = "deserialize_hex_color")]
    pub color: Rgb8,
}

impl Default for StarSettings {
    fn default() -> Self {
        let stop = |offset, r, g, b| GradientStopSettings { offset, color: Srgb::new(r, g, b) };
        Self {
            count: 120,
            color: Srgb::new(0xff, 0xff, 0xff),
            size: 1.2,
            min_opacity: 0.2,
            max_opacity: 1.0,
            twinkle_amplitude: 1.0,
            glow: 10.0,
            visibility_epsilon: 0.01,
            gradient_drift: 40.0,
            gradient_step: 0.01,
            gradient_radius_factor: 0.6,
            gradient_stops: vec![
                stop(0.0, 0x23, 0x24, 0x3a),
                stop(0.3, 0x1a, 0x22, 0x50),
                stop(0.6, 0x0a, 0x0c, 0x1b),
                stop(1.0, 0x18, 0x1c, 0x2a),
            ],
        }
    }
}

impl StarSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_opacity > 0.0 && self.max_opacity <= 1.0) {
            return Err(invalid("max_opacity", "must lie in (0, 1]"));
        }
        if self.min_opacity > self.max_opacity {
            return Err(invalid("min_opacity", "cannot exceed max_opacity"));
        }
        if self.gradient_stops.is_empty() {
            return Err(invalid("gradient_stops", "needs at least one stop"));
        }
        if self.gradient_stops.windows(2).any(|w| w[0].offset > w[1].offset) {
            return Err(invalid("gradient_stops", "offsets must be ascending"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub monitor_fraction: f32,
    pub resize_debounce_ms: u64,
    pub show_debug: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Starglobe".to_string(),
            monitor_fraction: 0.8,
            resize_debounce_ms: 100,
            show_debug: false,
        }
    }
}

impl WindowSettings {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneSettings,
    pub stars: StarSettings,
    pub window: WindowSettings,
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    // Settings from the file named by STARGLOBE_CONFIG, or the defaults
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(settings) => {
                log::info!("loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; falling back to default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene.validate()?;
        self.stars.validate()?;
        if !(self.window.monitor_fraction > 0.0 && self.window.monitor_fraction <= 1.0) {
            return Err(invalid("monitor_fraction", "must lie in (0, 1]"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

pub fn parse_hex_color(text: &str) -> Result<Rgb8, ConfigError> {
    let bad = || ConfigError::InvalidColor(text.to_string());
    let hex = text.strip_prefix('#').ok_or_else(bad)?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    Ok(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<Rgb8, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_hex_color(&text).map_err(serde::de::Error::custom)
}
