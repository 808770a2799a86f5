//! Per-frame simulation step
//!
//! Input arbitration followed by paddle and ball integration. The ball uses
//! the position from the previous frame for its wall checks, so it may sit up
//! to one frame's travel past a wall before being pulled back.

use glam::Vec2;

use super::collision::Aabb;
use super::input::{Arbitration, arbitrate};
use super::state::{Ball, GameState, Player};
use crate::platform::abi::ClientInput;
use crate::renderer::sprites::{BALL, PADDLE};
use crate::settings::{BallTuning, PaddleTuning, Settings};
use crate::screen_size;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &ClientInput, settings: &Settings) -> Arbitration {
    state.timer = state.timer.wrapping_add(1);

    let screen = screen_size();
    let arbitration = arbitrate(state, input, screen.x as u16);

    step_paddle(&mut state.player, &settings.paddle, screen.x);
    step_ball(&mut state.ball, &state.player, &settings.ball, screen);

    arbitration
}

/// Force, drag, speed cap, integrate, position clamp. In that order: drag runs
/// even with no input, so the paddle coasts to a stop.
pub fn step_paddle(player: &mut Player, tuning: &PaddleTuning, screen_width: f32) {
    player.vel.x += tuning.accel * player.movement.direction();
    player.vel.x *= tuning.drag;
    player.vel.x = player.vel.x.clamp(-tuning.max_speed, tuning.max_speed);
    player.pos.x += player.vel.x;
    player.pos.x = player.pos.x.clamp(
        tuning.margin_left,
        screen_width - PADDLE.size().x - tuning.margin_right,
    );
}

/// Ball travel limits: `(min, max)` for the top-left corner
pub fn ball_bounds(tuning: &BallTuning, screen: Vec2) -> (Vec2, Vec2) {
    let margin = tuning.wall_margin;
    let min = Vec2::splat(margin);
    let max = Vec2::new(screen.x - margin - BALL.size().x, screen.y - margin);
    (min, max)
}

/// Pull the ball back inside the walls, pointing its velocity away from any wall it crossed
pub fn resolve_walls(ball: &mut Ball, tuning: &BallTuning, screen: Vec2) {
    let (min, max) = ball_bounds(tuning, screen);
    for axis in 0..2 {
        if ball.pos[axis] < min[axis] {
            ball.pos[axis] = min[axis];
            ball.vel[axis] = ball.vel[axis].abs();
        } else if ball.pos[axis] > max[axis] {
            ball.pos[axis] = max[axis];
            ball.vel[axis] = -ball.vel[axis].abs();
        }
    }
}

/// Always bounce up off the paddle, whatever direction the ball came from
pub fn bounce_off_paddle(ball: &mut Ball, player: &Player) {
    let ball_box = Aabb::new(ball.pos, BALL.size());
    let paddle_box = Aabb::new(player.pos, PADDLE.size());
    if ball_box.overlaps(&paddle_box) {
        ball.vel.y = -ball.vel.y.abs();
    }
}

pub fn step_ball(ball: &mut Ball, player: &Player, tuning: &BallTuning, screen: Vec2) {
    resolve_walls(ball, tuning, screen);
    ball.pos += ball.vel;
    bounce_off_paddle(ball, player);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::abi::KEY_LEFT;
    use crate::sim::state::Movement;

    fn left_held() -> ClientInput {
        ClientInput {
            keys: KEY_LEFT,
            ..Default::default()
        }
    }

    #[test]
    fn test_left_hold_converges_to_speed_cap() {
        let settings = Settings::default();
        let mut state = GameState::default();
        assert_eq!(state.player.pos.x, 53.0);

        let mut last_x = state.player.pos.x;
        for _ in 0..5 {
            tick(&mut state, &left_held(), &settings);
            assert!(state.player.pos.x < last_x);
            assert!(state.player.pos.x >= 8.0);
            last_x = state.player.pos.x;
        }
        assert_eq!(state.player.vel.x, -3.0);
        assert!((state.player.pos.x - 39.52).abs() < 1e-3);
    }

    #[test]
    fn test_paddle_coasts_to_stop() {
        let tuning = PaddleTuning::default();
        let mut player = Player {
            vel: Vec2::new(3.0, 0.0),
            ..Default::default()
        };
        for _ in 0..60 {
            step_paddle(&mut player, &tuning, 128.0);
        }
        assert!(player.vel.x.abs() < 1e-4);
    }

    #[test]
    fn test_paddle_clamped_to_track() {
        let tuning = PaddleTuning::default();
        let mut player = Player {
            movement: Movement::Right,
            ..Default::default()
        };
        for _ in 0..200 {
            step_paddle(&mut player, &tuning, 128.0);
        }
        assert_eq!(player.pos.x, 128.0 - 22.0 - 8.0);

        player.movement = Movement::Left;
        for _ in 0..200 {
            step_paddle(&mut player, &tuning, 128.0);
        }
        assert_eq!(player.pos.x, 8.0);
    }

    #[test]
    fn test_wall_bounce_forces_velocity_inward() {
        let tuning = BallTuning::default();
        let screen = Vec2::new(128.0, 192.0);
        let mut ball = Ball {
            pos: Vec2::new(2.0, 190.0),
            vel: Vec2::new(-1.0, 2.0),
        };
        resolve_walls(&mut ball, &tuning, screen);
        assert_eq!(ball.pos, Vec2::new(8.0, 184.0));
        assert_eq!(ball.vel, Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_wall_check_uses_previous_position() {
        let tuning = BallTuning::default();
        let screen = Vec2::new(128.0, 192.0);
        let mut ball = Ball {
            pos: Vec2::new(9.0, 100.0),
            vel: Vec2::new(-2.0, 0.0),
        };
        step_ball(&mut ball, &Player::default(), &tuning, screen);
        // Inside the wall before integrating, so it overshoots this frame
        assert_eq!(ball.pos.x, 7.0);
        step_ball(&mut ball, &Player::default(), &tuning, screen);
        assert_eq!(ball.pos.x, 10.0);
        assert_eq!(ball.vel.x, 2.0);
    }

    #[test]
    fn test_paddle_bounce_points_up() {
        let player = Player::default();
        let mut falling = Ball {
            pos: player.pos + Vec2::new(4.0, -2.0),
            vel: Vec2::new(0.5, 1.3),
        };
        bounce_off_paddle(&mut falling, &player);
        assert_eq!(falling.vel.y, -1.3);

        let mut rising = Ball {
            pos: player.pos + Vec2::new(4.0, 2.0),
            vel: Vec2::new(0.5, -2.0),
        };
        bounce_off_paddle(&mut rising, &player);
        assert_eq!(rising.vel.y, -2.0);
    }

    #[test]
    fn test_no_bounce_when_clear_of_paddle() {
        let player = Player::default();
        let mut ball = Ball {
            pos: player.pos - Vec2::new(0.0, 20.0),
            vel: Vec2::new(0.0, 1.3),
        };
        bounce_off_paddle(&mut ball, &player);
        assert_eq!(ball.vel.y, 1.3);
    }

    #[test]
    fn test_timer_counts_frames() {
        let settings = Settings::default();
        let mut state = GameState::default();
        for _ in 0..3 {
            tick(&mut state, &ClientInput::default(), &settings);
        }
        assert_eq!(state.timer, 3);
    }
}
