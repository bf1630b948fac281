//! Per-frame physics step
//!
//! Runs aim resolution, integration, ball/ball collisions, cushions and
//! pockets, in that order, over the ball store. Presentation side effects
//! are left to the caller via the returned [`StepOutcome`].

use glam::Vec2;

use super::collision::{reflect_off_walls, resolve_ball_pair};
use super::shot::ShotController;
use super::state::{BallStore, SimEvent};
use crate::consts::PLAYER_BALL;
use crate::geometry::aim_direction;
use crate::layout::TableLayout;
use crate::tuning::Tuning;

/// What a physics step did
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Nothing was moving; the table was left untouched
    AtRest,
    /// Balls moved; `pocketed` lists object balls that dropped this frame
    Moved { pocketed: Vec<usize> },
    /// The player ball dropped; processing stopped at that point
    PlayerPocketed { pocket: usize },
}

impl StepOutcome {
    /// Whether anything was moving at the start of the step
    pub fn was_moving(&self) -> bool {
        !matches!(self, StepOutcome::AtRest)
    }
}

/// Advance the table by one frame
pub fn step(
    balls: &mut BallStore,
    shot: &mut ShotController,
    layout: &TableLayout,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) -> StepOutcome {
    if !balls.any_moving() {
        return StepOutcome::AtRest;
    }

    resolve_aim(balls, shot);
    integrate(balls, tuning);
    collide_balls(balls, layout, tuning, events);
    bounce_off_walls(balls, layout, tuning, events);

    let outcome = capture_pockets(balls, layout, events);
    if matches!(outcome, StepOutcome::Moved { .. }) && !balls.any_moving() {
        events.push(SimEvent::TableAtRest);
    }
    outcome
}

/// Turn a staged release point into the player ball's travel direction
fn resolve_aim(balls: &mut BallStore, shot: &mut ShotController) {
    let player = balls.player_mut();
    if !player.alive || player.direction != Vec2::ZERO {
        return;
    }
    let Some(target) = shot.take_aim() else {
        return;
    };

    match aim_direction(player.position, target) {
        Some(direction) => player.direction = direction,
        None => {
            log::debug!("Aim target {target} coincides with the player ball; shot cancelled");
            player.stop();
        }
    }
}

/// Move every ball along its direction and apply rolling friction
fn integrate(balls: &mut BallStore, tuning: &Tuning) {
    for ball in balls.iter_mut().filter(|b| b.alive) {
        if ball.direction == Vec2::ZERO {
            // No direction left to carry the speed (e.g. a dead-stop head-on hit)
            if ball.is_moving() {
                ball.stop();
            }
            continue;
        }

        ball.position += ball.direction * ball.impulse;
        ball.impulse *= tuning.friction;

        if ball.impulse < tuning.rest_threshold {
            ball.stop();
        }
    }
}

/// Resolve every touching pair of balls still on the table
fn collide_balls(
    balls: &mut BallStore,
    layout: &TableLayout,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) {
    let contact = layout.contact_distance();
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let (a, b) = balls.pair_mut(i, j);
            if !a.alive || !b.alive {
                continue;
            }
            if resolve_ball_pair(a, b, contact, tuning.collision_loss) {
                events.push(SimEvent::BallsCollided { a: i, b: j });
            }
        }
    }
}

fn bounce_off_walls(
    balls: &mut BallStore,
    layout: &TableLayout,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) {
    for (i, ball) in balls.iter_mut().enumerate() {
        if let Some(wall) = reflect_off_walls(ball, layout, tuning.edge_loss) {
            events.push(SimEvent::WallHit { ball: i, wall });
        }
    }
}

/// Drop balls that reached a pocket. Pockets are scanned in layout order.
fn capture_pockets(
    balls: &mut BallStore,
    layout: &TableLayout,
    events: &mut Vec<SimEvent>,
) -> StepOutcome {
    let mut pocketed = Vec::new();

    for (p, pocket) in layout.pockets.iter().enumerate() {
        for i in 0..balls.len() {
            let ball = &mut balls[i];
            if !ball.alive || !layout.captures(*pocket, ball.position) {
                continue;
            }

            if i == PLAYER_BALL {
                events.push(SimEvent::PlayerPocketed { pocket: p });
                return StepOutcome::PlayerPocketed { pocket: p };
            }

            ball.remove();
            events.push(SimEvent::BallPocketed { ball: i, pocket: p });
            pocketed.push(i);
        }
    }

    StepOutcome::Moved { pocketed }
}
