use hecs::World;
use tracing::debug;

use crate::{Ball, Config, Events, GameMap, GameRng, Score, Side};

/// Award a point when the ball reaches a side edge.
///
/// On a point that does not end the match the ball is re-served from the
/// centre with its horizontal direction inverted. On a winning point the ball
/// is left where it is.
pub fn check_scoring(
    world: &mut World,
    map: &GameMap,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
    config: &Config,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.rect.left() <= 0.0 {
            score.increment(Side::Opponent);
            events.opponent_scored = true;
            debug!(player = score.player, opponent = score.opponent, "Opponent scored");
            if score.has_winner(config.winning_score).is_some() {
                return;
            }
            ball.reset(map.center(), rng);
        }
        if ball.rect.right() >= map.width {
            score.increment(Side::Player);
            events.player_scored = true;
            debug!(player = score.player, opponent = score.opponent, "Player scored");
            if score.has_winner(config.winning_score).is_some() {
                return;
            }
            ball.reset(map.center(), rng);
        }
    }
}
