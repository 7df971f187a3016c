/*
 * UI Module
 *
 * A read-only nannou_egui overlay with frame metrics. It has no controls;
 * the scene is purely ambient.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;

pub fn update_ui(egui: &mut Egui, debug_info: &DebugInfo) {
    let ctx = egui.begin_frame();

    egui::Window::new("Scene Stats")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(&ctx, |ui| {
            let frame = &debug_info.last_frame;
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Loop: {}", debug_info.loop_label()));
            ui.label(format!("Frames rendered: {}", debug_info.frames_rendered));
            ui.separator();
            ui.label(format!("Sphere points drawn: {}", frame.points_drawn));
            ui.label(format!("Clouds drawn: {}", frame.clouds_drawn));
            ui.label(format!("Culled: {:.1}%", debug_info.culled_percent()));
            ui.label(format!("Stars visible: {}", frame.stars_drawn));
        });
}
