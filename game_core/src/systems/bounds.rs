use hecs::World;

use crate::{GameMap, Paddle};

/// Keep both paddles fully on screen. Runs last in the tick.
pub fn clamp_paddles(world: &mut World, map: &GameMap) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.rect.clamp_vertical(map.height);
    }
}
