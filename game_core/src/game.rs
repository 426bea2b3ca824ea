use glam::Vec2;
use hecs::World;
use tracing::info;

use crate::{
    create_ball, create_paddle, step, Ball, CalibrationRange, Config, Events, GameMap, GameRng,
    Paddle, Rect, Score, Side, Trail,
};

/// Everything the presentation layer needs to draw one frame of play
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub ball: Rect,
    pub ball_vel: Vec2,
    pub player_paddle: Rect,
    pub opponent_paddle: Rect,
    pub trail: Vec<Vec2>, // newest first
    pub score: Score,
}

/// One match: the ECS world plus the resources the systems run against.
///
/// Owned by the session; every mutation goes through [`Game::step`] or one
/// of the explicit reset/placement calls.
pub struct Game {
    world: World,
    map: GameMap,
    config: Config,
    score: Score,
    events: Events,
    rng: GameRng,
    range: CalibrationRange,
    tick: u64,
}

impl Game {
    pub fn new(config: Config, rng: GameRng) -> Self {
        let map = GameMap::new(&config);
        let mut world = World::new();

        create_paddle(&mut world, Side::Player, map.paddle_spawn(Side::Player));
        create_paddle(&mut world, Side::Opponent, map.paddle_spawn(Side::Opponent));
        create_ball(&mut world, map.ball_spawn(), Vec2::ZERO, config.trail_count);

        let mut game = Self {
            world,
            map,
            config,
            score: Score::new(),
            events: Events::new(),
            rng,
            range: CalibrationRange::fallback(),
            tick: 0,
        };
        game.reset();
        game
    }

    /// Fresh match: zero scores, centred paddles, new random serve. The
    /// calibration range is dropped and must be set again.
    pub fn reset(&mut self) {
        self.score = Score::new();
        self.events.clear();
        self.range = CalibrationRange::fallback();
        self.tick = 0;

        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.rect = self.map.paddle_spawn(paddle.side);
        }

        let center = self.map.center();
        for (_entity, (ball, trail)) in self.world.query_mut::<(&mut Ball, &mut Trail)>() {
            ball.serve(
                center,
                self.config.ball_initial_speed_min,
                self.config.ball_initial_speed_max,
                &mut self.rng,
            );
            trail.fill(center);
        }
    }

    pub fn set_range(&mut self, range: CalibrationRange) {
        self.range = range;
    }

    pub fn range(&self) -> CalibrationRange {
        self.range
    }

    /// Advance one tick. Once the match has a winner this does nothing.
    pub fn step(&mut self, reading: Option<f32>) -> Option<Side> {
        if let Some(winner) = self.winner() {
            return Some(winner);
        }
        self.tick += 1;

        let winner = step(
            &mut self.world,
            &self.map,
            &self.config,
            &self.range,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
            reading,
        );

        if self.events.player_scored || self.events.opponent_scored {
            let scorer = if self.events.player_scored {
                Side::Player
            } else {
                Side::Opponent
            };
            info!(
                ?scorer,
                player = self.score.player,
                opponent = self.score.opponent,
                "Point scored"
            );
        }

        if let Some(winner) = winner {
            info!(
                ?winner,
                player = self.score.player,
                opponent = self.score.opponent,
                ticks = self.tick,
                "Match decided"
            );
        }
        winner
    }

    pub fn winner(&self) -> Option<Side> {
        self.score.has_winner(self.config.winning_score)
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let (ball, ball_vel, trail) = self
            .world
            .query::<(&Ball, &Trail)>()
            .iter()
            .next()
            .map(|(_e, (ball, trail))| {
                (ball.rect, ball.vel, trail.points.iter().copied().collect())
            })
            .unwrap_or_else(|| (self.map.ball_spawn(), Vec2::ZERO, Vec::new()));

        let mut player_paddle = self.map.paddle_spawn(Side::Player);
        let mut opponent_paddle = self.map.paddle_spawn(Side::Opponent);
        for (_e, paddle) in self.world.query::<&Paddle>().iter() {
            match paddle.side {
                Side::Player => player_paddle = paddle.rect,
                Side::Opponent => opponent_paddle = paddle.rect,
            }
        }

        GameSnapshot {
            ball,
            ball_vel,
            player_paddle,
            opponent_paddle,
            trail,
            score: self.score,
        }
    }

    /// Put the ball somewhere specific; its trail collapses onto it
    pub fn place_ball(&mut self, center: Vec2, vel: Vec2) {
        for (_entity, (ball, trail)) in self.world.query_mut::<(&mut Ball, &mut Trail)>() {
            ball.rect.set_center(center);
            ball.vel = vel;
            trail.fill(center);
        }
    }

    /// Move a paddle so its centre sits at `center_y`
    #[cfg(test)]
    pub fn place_paddle(&mut self, side: Side, center_y: f32) {
        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            if paddle.side == side {
                paddle.rect.set_center_y(center_y);
            }
        }
    }
}
