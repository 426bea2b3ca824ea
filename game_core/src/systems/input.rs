use hecs::World;

use crate::{CalibrationRange, Config, GameMap, Paddle, Side};

/// Ease the player paddle toward the position the finger points at.
///
/// First-order low-pass: each tick closes `smoothing_factor` of the gap, so
/// the paddle never snaps to the target. Without a reading the paddle holds.
pub fn steer_player_paddle(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    range: &CalibrationRange,
    reading: Option<f32>,
) {
    let Some(offset) = reading else {
        return;
    };
    let Some(target_y) = range.target_y(offset, map.height) else {
        return;
    };

    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == Side::Player {
            let center_y = paddle.rect.center_y();
            paddle
                .rect
                .set_center_y(center_y + (target_y - center_y) * config.smoothing_factor);
        }
    }
}
