/*
 * Renderer Module
 *
 * Replays the frame's recorded canvas commands onto nannou's Draw. The
 * canvas has its origin top-left with y down; nannou is centred with y up.
 * Radial gradients are approximated with concentric rings over a
 * background of the outermost stop colour.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::canvas::{Canvas, Circle, CommandBuffer, DrawCommand, RadialGradient};

const GRADIENT_RINGS: usize = 64;

// Share of the glow radius used for the halo around a circle
const GLOW_SPREAD: f32 = 0.4;
const GLOW_ALPHA: f32 = 0.2;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    if model.frame.is_empty() {
        draw.background().color(BLACK);
    } else {
        replay(&draw, &model.frame);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to present frame: {:?}", err);
    }

    if model.settings.window.show_debug {
        if let Some(egui) = &model.egui {
            if let Err(err) = egui.draw_to_frame(&frame) {
                log::error!("failed to draw debug overlay: {:?}", err);
            }
        }
    }
}

pub fn replay(draw: &Draw, buffer: &CommandBuffer) {
    let half_w = buffer.width() / 2.0;
    let half_h = buffer.height() / 2.0;
    let to_world = |x: f32, y: f32| pt2(x - half_w, half_h - y);

    for command in buffer.commands() {
        match command {
            DrawCommand::Gradient(gradient) => draw_gradient(draw, gradient, to_world(gradient.center_x, gradient.center_y)),
            DrawCommand::Circle(circle) => draw_circle(draw, circle, to_world(circle.x, circle.y)),
        }
    }
}

fn draw_gradient(draw: &Draw, gradient: &RadialGradient, center: Point2) {
    draw.background().color(gradient.outer_color());

    for k in 0..GRADIENT_RINGS {
        let t = 1.0 - k as f32 / GRADIENT_RINGS as f32;
        draw.ellipse()
            .xy(center)
            .radius(gradient.radius * t)
            .color(gradient.color_at(t));
    }
}

fn draw_circle(draw: &Draw, circle: &Circle, center: Point2) {
    let (r, g, b) = (
        circle.color.red as f32 / 255.0,
        circle.color.green as f32 / 255.0,
        circle.color.blue as f32 / 255.0,
    );

    if circle.glow > 0.0 {
        draw.ellipse()
            .xy(center)
            .radius(circle.radius + circle.glow * GLOW_SPREAD)
            .color(rgba(r, g, b, circle.alpha * GLOW_ALPHA));
    }

    draw.ellipse()
        .xy(center)
        .radius(circle.radius)
        .color(rgba(r, g, b, circle.alpha));
}
