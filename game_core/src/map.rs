use glam::Vec2;

use crate::{Config, Side};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2, // top-left corner
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y * 0.5
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size * 0.5;
    }

    pub fn set_center_y(&mut self, y: f32) {
        self.pos.y = y - self.size.y * 0.5;
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Clamp the vertical extent into `[0, height]`
    pub fn clamp_vertical(&mut self, height: f32) {
        if self.top() < 0.0 {
            self.pos.y = 0.0;
        }
        if self.bottom() > height {
            self.pos.y = height - self.size.y;
        }
    }
}

/// Playing field geometry
#[derive(Debug, Clone)]
pub struct GameMap {
    pub width: f32,
    pub height: f32,
    pub paddle_size: Vec2,
    pub ball_size: f32,
    paddle_x: [f32; 2],
}

impl GameMap {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.screen_width,
            height: config.screen_height,
            paddle_size: Vec2::new(config.paddle_width, config.paddle_height),
            ball_size: config.ball_size,
            paddle_x: [config.paddle_x(Side::Player), config.paddle_x(Side::Opponent)],
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Where the ball is (re)served from
    pub fn ball_spawn(&self) -> Rect {
        Rect::from_center_size(self.center(), Vec2::splat(self.ball_size))
    }

    /// Paddle rectangle vertically centred on its side
    pub fn paddle_spawn(&self, side: Side) -> Rect {
        let x = match side {
            Side::Player => self.paddle_x[0],
            Side::Opponent => self.paddle_x[1],
        };
        Rect::new(
            x,
            self.height / 2.0 - self.paddle_size.y / 2.0,
            self.paddle_size.x,
            self.paddle_size.y,
        )
    }
}
