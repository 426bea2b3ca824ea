use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Params, Side};

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("screen size must be positive, got {width}x{height}")]
    ScreenSize { width: f32, height: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be a finite non-negative number, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} of {size} does not fit a screen {limit} high")]
    TooTall {
        name: &'static str,
        size: f32,
        limit: f32,
    },
    #[error("{name} range is inverted: [{min}, {max}]")]
    InvertedRange {
        name: &'static str,
        min: i32,
        max: i32,
    },
    #[error("smoothing factor must be in (0, 1], got {0}")]
    Smoothing(f32),
    #[error("winning score must be at least 1")]
    WinningScore,
    #[error("trail length must be at least 1")]
    TrailLength,
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub opponent_speed: f32,
    pub smoothing_factor: f32,
    pub ball_size: f32,
    pub ball_initial_speed_min: i32,
    pub ball_initial_speed_max: i32,
    pub ball_collision_speed_min: i32,
    pub ball_collision_speed_max: i32,
    pub ball_min_vertical_speed: f32,
    pub ball_vertical_jitter: f32,
    pub trail_count: usize,
    pub winning_score: u8,
    pub calibration_countdown: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: Params::SCREEN_WIDTH,
            screen_height: Params::SCREEN_HEIGHT,
            fps: Params::FPS,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            opponent_speed: Params::OPPONENT_SPEED,
            smoothing_factor: Params::SMOOTHING_FACTOR,
            ball_size: Params::BALL_SIZE,
            ball_initial_speed_min: Params::BALL_INITIAL_SPEED_MIN,
            ball_initial_speed_max: Params::BALL_INITIAL_SPEED_MAX,
            ball_collision_speed_min: Params::BALL_COLLISION_SPEED_MIN,
            ball_collision_speed_max: Params::BALL_COLLISION_SPEED_MAX,
            ball_min_vertical_speed: Params::BALL_MIN_VERTICAL_SPEED,
            ball_vertical_jitter: Params::BALL_VERTICAL_JITTER,
            trail_count: Params::TRAIL_COUNT,
            winning_score: Params::WINNING_SCORE,
            calibration_countdown: Params::CALIBRATION_COUNTDOWN,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        for (name, value) in [
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("calibration_countdown", self.calibration_countdown),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("paddle_margin", self.paddle_margin),
            ("opponent_speed", self.opponent_speed),
            ("ball_min_vertical_speed", self.ball_min_vertical_speed),
            ("ball_vertical_jitter", self.ball_vertical_jitter),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Negative { name, value });
            }
        }
        // paddles are clamped inside the screen, so they must fit in it
        for (name, size) in [
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
        ] {
            if size > self.screen_height {
                return Err(ConfigError::TooTall {
                    name,
                    size,
                    limit: self.screen_height,
                });
            }
        }
        if self.fps == 0 {
            return Err(ConfigError::NonPositive {
                name: "fps",
                value: 0.0,
            });
        }
        for (name, min, max) in [
            (
                "ball_initial_speed",
                self.ball_initial_speed_min,
                self.ball_initial_speed_max,
            ),
            (
                "ball_collision_speed",
                self.ball_collision_speed_min,
                self.ball_collision_speed_max,
            ),
        ] {
            if min <= 0 || max < min {
                return Err(ConfigError::InvertedRange { name, min, max });
            }
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(ConfigError::Smoothing(self.smoothing_factor));
        }
        if self.winning_score == 0 {
            return Err(ConfigError::WinningScore);
        }
        if self.trail_count == 0 {
            return Err(ConfigError::TrailLength);
        }
        Ok(())
    }

    /// Left edge of the paddle for a side
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.paddle_margin,
            Side::Opponent => self.screen_width - self.paddle_margin - self.paddle_width,
        }
    }

    /// Seconds per tick at the configured frame rate
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.fps as f32
    }
}
