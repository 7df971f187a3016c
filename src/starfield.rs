/*
 * Starfield Module
 *
 * The backdrop behind the globe: a radial gradient whose centre slowly
 * circles the middle of the canvas, plus a fixed set of stars that drift,
 * wrap around the canvas edges and twinkle. Stars that have twinkled out
 * are skipped rather than painted transparent.
 *
 * The star set is regenerated whole whenever the canvas changes size.
 */

use std::f32::consts::PI;

use rand::Rng;

use crate::canvas::{Canvas, Circle, ColorStop, RadialGradient};
use crate::settings::StarSettings;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    pub twinkle: f32,
    pub speed: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Star {
    pub fn random<R: Rng>(width: f32, height: f32, settings: &StarSettings, rng: &mut R) -> Self {
        Self {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            size: rng.gen::<f32>() * settings.size + 0.7,
            opacity: rng.gen::<f32>() * (settings.max_opacity - settings.min_opacity) + settings.min_opacity,
            twinkle: rng.gen::<f32>() * PI * 2.0,
            speed: rng.gen::<f32>() * 0.03 + 0.015,
            vx: (rng.gen::<f32>() - 0.5) * 0.25,
            vy: (rng.gen::<f32>() - 0.5) * 0.25,
        }
    }

    // Drift and wrap toroidally into [0, width) x [0, height)
    pub fn advance(&mut self, width: f32, height: f32) {
        self.x = wrap(self.x + self.vx, width);
        self.y = wrap(self.y + self.vy, height);
        self.twinkle += self.speed;
    }

    // Current opacity after twinkling, clamped to [0, max_opacity]
    pub fn current_opacity(&self, settings: &StarSettings) -> f32 {
        let opacity = self.opacity + self.twinkle.sin() * settings.twinkle_amplitude;
        opacity.clamp(0.0, settings.max_opacity)
    }
}

fn wrap(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[derive(Clone, Debug, Default)]
pub struct StarField {
    pub stars: Vec<Star>,
    pub gradient_angle: f32,
}

impl StarField {
    pub fn generate<R: Rng>(width: f32, height: f32, settings: &StarSettings, rng: &mut R) -> Self {
        let stars = (0..settings.count)
            .map(|_| Star::random(width, height, settings, rng))
            .collect();
        Self {
            stars,
            gradient_angle: 0.0,
        }
    }

    pub fn from_stars(stars: Vec<Star>) -> Self {
        Self {
            stars,
            gradient_angle: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    // The background gradient for the current angle
    pub fn gradient(&self, width: f32, height: f32, settings: &StarSettings) -> RadialGradient {
        RadialGradient {
            center_x: width / 2.0 + self.gradient_angle.cos() * settings.gradient_drift,
            center_y: height / 2.0 + self.gradient_angle.sin() * settings.gradient_drift,
            radius: width.max(height) * settings.gradient_radius_factor,
            stops: settings.gradient_stops.iter().map(ColorStop::from).collect(),
        }
    }

    /// Advance the backdrop one frame and paint it. Returns the number of
    /// stars drawn.
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, settings: &StarSettings) -> usize {
        let (width, height) = (canvas.width(), canvas.height());

        self.gradient_angle += settings.gradient_step;
        canvas.fill_radial_gradient(&self.gradient(width, height, settings));

        let mut drawn = 0;
        for star in &mut self.stars {
            star.advance(width, height);
            let opacity = star.current_opacity(settings);
            if opacity > settings.visibility_epsilon {
                canvas.fill_circle(Circle {
                    x: star.x,
                    y: star.y,
                    radius: star.size,
                    color: settings.color,
                    alpha: opacity,
                    glow: settings.glow,
                });
                drawn += 1;
            }
        }
        drawn
    }
}
