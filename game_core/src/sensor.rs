//! Hand sensor capability
//!
//! The game only needs one number per frame: how far the index fingertip is
//! raised above the wrist, in image-normalised units. Anything that can
//! produce that number (a camera + landmark model, a recorded feed, a test
//! script) implements [`HandSensor`].

use std::collections::VecDeque;

use glam::Vec2;

/// Landmark indices in the 21-point hand model
pub const WRIST: usize = 0;
pub const INDEX_FINGER_TIP: usize = 8;
pub const HAND_LANDMARK_COUNT: usize = 21;

/// One detected hand, coordinates normalised to `[0, 1]` image space
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    pub points: Vec<Vec2>,
}

impl HandLandmarks {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Vertical wrist-to-fingertip offset; positive when the finger points up
    pub fn offset(&self) -> Option<f32> {
        let wrist = self.points.get(WRIST)?;
        let tip = self.points.get(INDEX_FINGER_TIP)?;
        Some(wrist.y - tip.y)
    }
}

/// Small camera image for on-screen preview, `0RGB` pixels row-major
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl PreviewFrame {
    /// Build from packed RGB24 bytes; `None` if the buffer size is wrong
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> Option<Self> {
        if width == 0 || height == 0 || rgb.len() != width * height * 3 {
            return None;
        }
        let pixels = rgb
            .chunks_exact(3)
            .map(|px| (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32)
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Source of finger offsets, polled once per tick
pub trait HandSensor {
    /// Latest offset, or `None` if no frame or no hand this tick. Never blocks.
    fn poll(&mut self) -> Option<f32>;

    /// Most recent camera image, if the sensor produces one
    fn preview(&self) -> Option<&PreviewFrame> {
        None
    }
}

/// Deterministic sensor that replays a fixed script, then reports no hand
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    readings: VecDeque<Option<f32>>,
    polls: usize,
}

impl ScriptedSensor {
    pub fn new(readings: impl IntoIterator<Item = Option<f32>>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            polls: 0,
        }
    }

    /// Number of times the sensor has been polled
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl HandSensor for ScriptedSensor {
    fn poll(&mut self) -> Option<f32> {
        self.polls += 1;
        self.readings.pop_front().flatten()
    }
}
