use hecs::World;

use crate::{Ball, Trail};

/// Push the current ball centre onto its trail. Runs before the ball moves,
/// so the trail only ever shows previous positions.
pub fn record_trail(world: &mut World) {
    for (_entity, (ball, trail)) in world.query_mut::<(&Ball, &mut Trail)>() {
        trail.push(ball.rect.center());
    }
}

/// Move ball by one tick of velocity. Not scaled by elapsed time: the
/// simulation assumes the configured fixed tick rate.
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.rect.pos += ball.vel;
    }
}
