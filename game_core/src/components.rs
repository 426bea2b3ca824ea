use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use crate::{GameRng, Rect};

/// Which end of the table a paddle (or a point) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,   // left, hand controlled
    Opponent, // right, AI controlled
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Paddle component
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
}

impl Paddle {
    pub fn new(side: Side, rect: Rect) -> Self {
        Self { side, rect }
    }
}

/// Ball component - velocity is in pixels per tick
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self { rect, vel }
    }

    /// Opening serve: centred, same speed on both axes, random signs
    pub fn serve(&mut self, center: Vec2, speed_min: i32, speed_max: i32, rng: &mut GameRng) {
        self.rect.set_center(center);
        let speed = rng.0.gen_range(speed_min..=speed_max) as f32;
        self.vel = Vec2::new(speed * random_sign(rng), speed * random_sign(rng));
    }

    /// Re-serve after a point: centred, horizontal direction flipped,
    /// vertical sign re-drawn
    pub fn reset(&mut self, center: Vec2, rng: &mut GameRng) {
        self.rect.set_center(center);
        self.vel.x = -self.vel.x;
        self.vel.y *= random_sign(rng);
    }
}

fn random_sign(rng: &mut GameRng) -> f32 {
    if rng.0.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// Fixed-length history of previous ball centres, newest first
#[derive(Debug, Clone)]
pub struct Trail {
    pub points: VecDeque<Vec2>,
}

impl Trail {
    /// A trail whose every slot sits at `origin`
    pub fn new(len: usize, origin: Vec2) -> Self {
        Self {
            points: std::iter::repeat(origin).take(len).collect(),
        }
    }

    pub fn push(&mut self, point: Vec2) {
        let len = self.points.len();
        self.points.push_front(point);
        self.points.truncate(len);
    }

    pub fn fill(&mut self, point: Vec2) {
        for p in self.points.iter_mut() {
            *p = point;
        }
    }
}
