/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that holds per-frame metrics for
 * the optional overlay:
 * - FPS (frames per second)
 * - Frame time
 * - Points drawn and culled on the far side of the globe
 * - Stars visible after twinkling
 * - Frame loop state
 */

use std::time::Duration;

use crate::animation::LoopState;
use crate::scene::FrameStats;

#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub last_frame: FrameStats,
    pub frames_rendered: u64,
    pub loop_state: Option<LoopState>,
}

impl DebugInfo {
    pub fn record(&mut self, stats: FrameStats) {
        self.last_frame = stats;
        self.frames_rendered += 1;
    }

    pub fn loop_label(&self) -> &'static str {
        match self.loop_state {
            None => "no scene",
            Some(LoopState::Initialized) => "initialized",
            Some(LoopState::Running(_)) => "running",
            Some(LoopState::Paused) => "paused",
        }
    }

    // Share of globe points culled on the far side, in percent
    pub fn culled_percent(&self) -> f32 {
        let f = &self.last_frame;
        let total = f.points_drawn + f.points_culled + f.clouds_drawn + f.clouds_culled;
        if total == 0 {
            return 0.0;
        }
        (f.points_culled + f.clouds_culled) as f32 / total as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn culled_percent_covers_both_collections() {
        let mut info = DebugInfo::default();
        assert_eq!(info.culled_percent(), 0.0);
        info.record(FrameStats {
            points_drawn: 30,
            points_culled: 10,
            clouds_drawn: 5,
            clouds_culled: 5,
            stars_drawn: 100,
        });
        assert!((info.culled_percent() - 30.0).abs() < 1e-4);
        assert_eq!(info.frames_rendered, 1);
        assert_eq!(info.loop_label(), "no scene");
    }
}
