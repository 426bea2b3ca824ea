pub mod draw;
pub mod font;

use std::time::Duration;

use game_core::{Config, PreviewFrame, Rect};
use glam::Vec2;
use minifb::{KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::input::FrameInput;
use crate::scene::{Align, Canvas, FontSize};
use draw::Framebuffer;

pub const WINDOW_TITLE: &str = "Hand Tracking Pong";

/// Desktop window backed by a software framebuffer
pub struct MinifbCanvas {
    window: Window,
    frame: Framebuffer,
    mouse_was_down: bool,
}

impl MinifbCanvas {
    pub fn new(config: &Config) -> Result<Self, String> {
        let width = config.screen_width as usize;
        let height = config.screen_height as usize;
        let mut window = Window::new(
            WINDOW_TITLE,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(Duration::from_secs_f32(config.tick_seconds())));

        Ok(Self {
            window,
            frame: Framebuffer::new(width, height),
            mouse_was_down: false,
        })
    }

    /// Collect the keys and clicks seen since the previous frame
    pub fn poll_input(&mut self) -> FrameInput {
        let keys = self.window.get_keys_pressed(KeyRepeat::No);

        // minifb reports button state, not press events
        let down = self.window.get_mouse_down(MouseButton::Left);
        let pressed = down && !self.mouse_was_down;
        self.mouse_was_down = down;
        let click = if pressed {
            self.window
                .get_mouse_pos(MouseMode::Discard)
                .map(|(x, y)| Vec2::new(x, y))
        } else {
            None
        };

        FrameInput {
            close_requested: !self.window.is_open(),
            keys,
            click,
        }
    }
}

impl Canvas for MinifbCanvas {
    fn clear(&mut self, color: u32) {
        self.frame.clear(color);
    }

    fn draw_rect(&mut self, rect: Rect, color: u32) {
        self.frame.fill_rect(rect, color);
    }

    fn draw_ellipse(&mut self, rect: Rect, color: u32) {
        self.frame.fill_ellipse(rect, color);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: u32) {
        self.frame.line(from, to, color);
    }

    fn draw_text(&mut self, text: &str, size: FontSize, color: u32, pos: Vec2, align: Align) {
        let scale = size.scale();
        let (w, h) = font::measure(text, scale);
        let origin = match align {
            Align::TopLeft => pos,
            Align::TopCenter => Vec2::new(pos.x - w as f32 / 2.0, pos.y),
            Align::Center => pos - Vec2::new(w as f32, h as f32) / 2.0,
        };
        self.frame.text(text, scale, color, origin);
    }

    fn blit_image(&mut self, image: &PreviewFrame, dest: Rect) {
        self.frame.blit_scaled(image, dest);
    }

    fn present(&mut self) -> Result<(), String> {
        self.window
            .update_with_buffer(self.frame.pixels(), self.frame.width(), self.frame.height())
            .map_err(|e| e.to_string())
    }
}
