//! Screen geometry shared by drawing and hit testing

use game_core::{Config, Params, Rect};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    PlayAgain,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub ball_size: f32,
    pub start_button: Rect,
    pub play_again_button: Rect,
    pub quit_button: Rect,
    /// Bottom-right camera thumbnail during play
    pub preview: Rect,
    /// Trail greys, newest first
    pub trail_colors: Vec<u32>,
}

impl Layout {
    pub fn new(config: &Config) -> Self {
        let w = config.screen_width;
        let h = config.screen_height;
        let preview_w = Params::CAMERA_PREVIEW_WIDTH;
        let preview_h = Params::CAMERA_PREVIEW_HEIGHT;
        let margin = Params::CAMERA_PREVIEW_MARGIN;

        Self {
            width: w,
            height: h,
            ball_size: config.ball_size,
            start_button: Rect::new(w / 2.0 - 100.0, h / 2.0, 200.0, 60.0),
            play_again_button: Rect::new(w / 2.0 - 250.0, h * 0.75 - 30.0, 200.0, 60.0),
            quit_button: Rect::new(w / 2.0 + 50.0, h * 0.75 - 30.0, 200.0, 60.0),
            preview: Rect::new(
                w - preview_w - margin,
                h - preview_h - margin,
                preview_w,
                preview_h,
            ),
            trail_colors: trail_colors(config.trail_count, Params::TRAIL_START_COLOR),
        }
    }

    pub fn screen(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn button(&self, button: Button) -> Rect {
        match button {
            Button::Start => self.start_button,
            Button::PlayAgain => self.play_again_button,
            Button::Quit => self.quit_button,
        }
    }

    /// Which of `candidates` contains `point`, if any
    pub fn hit(&self, point: Vec2, candidates: &[Button]) -> Option<Button> {
        candidates
            .iter()
            .copied()
            .find(|button| self.button(*button).contains(point))
    }
}

/// Grey ramp fading from `start` toward black, as `0RGB`
pub fn trail_colors(count: usize, start: u8) -> Vec<u32> {
    (0..count)
        .map(|i| {
            let v = (start as usize - i * start as usize / count) as u32;
            v << 16 | v << 8 | v
        })
        .collect()
}
