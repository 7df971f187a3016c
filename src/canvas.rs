/*
 * Canvas Module
 *
 * This module defines the drawing surface the scene paints onto. Coordinates
 * are canvas pixels with the origin in the top-left corner and y pointing
 * down. The scene only ever needs two primitives: a filled circle and a
 * full-surface radial gradient.
 *
 * CommandBuffer records every call in order. The app fills one per frame
 * and the renderer replays it onto nannou's Draw.
 */

use crate::settings::{GradientStopSettings, Rgb8};

pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    // Paint every pixel of the surface with the gradient
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);

    fn fill_circle(&mut self, circle: Circle);
}

#[derive(Clone, Copy, Debug)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Rgb8,
    pub alpha: f32,
    // Blur radius of the soft halo, 0 for none
    pub glow: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgb8,
}

impl From<&GradientStopSettings> for ColorStop {
    fn from(stop: &GradientStopSettings) -> Self {
        Self { offset: stop.offset, color: stop.color }
    }
}

#[derive(Clone, Debug)]
pub struct RadialGradient {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Colour at `t`, the distance from the centre as a fraction of the
    /// radius. Values before the first stop or past the last one take that
    /// stop's colour.
    pub fn color_at(&self, t: f32) -> Rgb8 {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Rgb8::new(0, 0, 0),
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.offset && t <= b.offset {
                let span = b.offset - a.offset;
                let f = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return lerp_color(a.color, b.color, f);
            }
        }
        last.color
    }

    // Colour filling everything beyond the gradient radius
    pub fn outer_color(&self) -> Rgb8 {
        self.color_at(1.0)
    }
}

fn lerp_color(a: Rgb8, b: Rgb8, f: f32) -> Rgb8 {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round().clamp(0.0, 255.0) as u8;
    Rgb8::new(mix(a.red, b.red), mix(a.green, b.green), mix(a.blue, b.blue))
}

#[derive(Clone, Debug)]
pub enum DrawCommand {
    Gradient(RadialGradient),
    Circle(Circle),
}

#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    // Start a new frame, keeping the allocation
    pub fn reset(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle(circle) => Some(circle),
            DrawCommand::Gradient(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for CommandBuffer {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::Gradient(gradient.clone()));
    }

    fn fill_circle(&mut self, circle: Circle) {
        self.commands.push(DrawCommand::Circle(circle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> RadialGradient {
        RadialGradient {
            center_x: 0.0,
            center_y: 0.0,
            radius: 10.0,
            stops: vec![
                ColorStop { offset: 0.0, color: Rgb8::new(0, 0, 0) },
                ColorStop { offset: 0.5, color: Rgb8::new(200, 100, 50) },
                ColorStop { offset: 1.0, color: Rgb8::new(0, 0, 100) },
            ],
        }
    }

    #[test]
    fn gradient_interpolates_between_stops() {
        let g = gradient();
        let c = g.color_at(0.25);
        assert_eq!((c.red, c.green, c.blue), (100, 50, 25));
        let c = g.color_at(0.5);
        assert_eq!((c.red, c.green, c.blue), (200, 100, 50));
    }

    #[test]
    fn gradient_clamps_outside_range() {
        let g = gradient();
        let c = g.color_at(-1.0);
        assert_eq!((c.red, c.green, c.blue), (0, 0, 0));
        let c = g.color_at(3.0);
        assert_eq!((c.red, c.green, c.blue), (0, 0, 100));
        let c = g.outer_color();
        assert_eq!((c.red, c.green, c.blue), (0, 0, 100));
    }

    #[test]
    fn command_buffer_records_in_order() {
        let mut buffer = CommandBuffer::new(800.0, 600.0);
        buffer.fill_radial_gradient(&gradient());
        buffer.fill_circle(Circle {
            x: 1.0,
            y: 2.0,
            radius: 3.0,
            color: Rgb8::new(255, 255, 255),
            alpha: 1.0,
            glow: 0.0,
        });
        assert!(matches!(buffer.commands()[0], DrawCommand::Gradient(_)));
        assert_eq!(buffer.circles().count(), 1);

        buffer.reset(400.0, 300.0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.width(), 400.0);
    }
}
