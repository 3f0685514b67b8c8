//! Physics & Platform Resolution
//!
//! Player movement, jumping, wall-slide, gravity, platform collisions, the
//! grappling hook, the horizontal world clamp and fall-off detection. Enemy
//! integration lives here too since it shares the platform resolver.

use tracing::trace;

use crate::core::constants::*;
use crate::core::vec2::Vec2;
use crate::game::collision::{CollisionSide, penetration_side, point_in_any, resolve_penetration, snap_to_side};
use crate::game::input::InputFrame;
use crate::game::state::{ColorTag, Enemy, HookState, Platform, Player, WorldBounds, WorldState};

/// Result of advancing the grappling hook for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HookOutcome {
    /// No hook out
    Idle,
    /// Still extending
    Extending,
    /// Tip entered a platform; pull applied
    Attached(Vec2),
    /// Reached max length without a hit
    MaxLength,
}

/// Run player physics for one frame.
pub fn update_player(state: &mut WorldState, input: &InputFrame, time_scale: f32) {
    if let Some(burst_at) = apply_movement_input(&mut state.player, input) {
        state.request_burst(burst_at, 10, ColorTag::Cyan);
    }

    integrate_player(&mut state.player, time_scale);
    resolve_player_platforms(&mut state.player, &state.platforms);

    let outcome = update_hook(
        &mut state.player,
        input.grapple(),
        input.aim,
        &state.platforms,
        time_scale,
    );
    if let HookOutcome::Attached(tip) = outcome {
        trace!(frame = state.frame, x = tip.x, y = tip.y, "hook attached");
    }

    clamp_to_world(&mut state.player, &state.bounds);
    check_fall_off(&mut state.player, &state.bounds);
}

/// Apply horizontal intent, jump and wall-jump.
///
/// Returns where to emit a dust burst if the player left the ground or a wall.
pub fn apply_movement_input(player: &mut Player, input: &InputFrame) -> Option<Vec2> {
    player.velocity.x = 0.0;
    if input.left() {
        player.velocity.x = -PLAYER_SPEED;
        player.facing = -1.0;
    }
    if input.right() {
        player.velocity.x = PLAYER_SPEED;
        player.facing = 1.0;
    }

    let mut burst = None;

    if input.jump() && !player.is_jumping && !player.is_wall_sliding {
        player.velocity.y = -PLAYER_JUMP_FORCE;
        player.is_jumping = true;
        burst = Some(Vec2::new(player.body.center().x, player.body.bottom()));
    }

    if player.is_wall_sliding {
        player.velocity.y = WALL_SLIDE_SPEED;

        if input.jump() {
            player.velocity.y = -WALL_JUMP_FORCE;
            player.velocity.x = WALL_JUMP_FORCE * -player.facing;
            player.is_wall_sliding = false;
            player.is_wall_jumping = true;

            let edge_x = if player.facing > 0.0 { player.body.right() } else { player.body.x };
            burst = Some(Vec2::new(edge_x, player.body.center().y));
        }
    }

    burst
}

/// Gravity, then position integration.
pub fn integrate_player(player: &mut Player, time_scale: f32) {
    player.velocity.y += GRAVITY * time_scale;
    player.body.translate(player.velocity * time_scale);
}

/// Resolve the player against every platform in order.
///
/// Wall-slide is recomputed from scratch each frame.
pub fn resolve_player_platforms(player: &mut Player, platforms: &[Platform]) {
    player.is_wall_sliding = false;

    for platform in platforms {
        match resolve_penetration(&mut player.body, player.velocity, &platform.body) {
            CollisionSide::Top => {
                player.velocity.y = 0.0;
                player.is_jumping = false;
                player.is_wall_jumping = false;
            }
            CollisionSide::Bottom => {
                player.velocity.y = 0.0;
            }
            CollisionSide::Left => {
                player.velocity.x = 0.0;
                if player.is_airborne() {
                    player.is_wall_sliding = true;
                    player.facing = -1.0;
                }
            }
            CollisionSide::Right => {
                player.velocity.x = 0.0;
                if player.is_airborne() {
                    player.is_wall_sliding = true;
                    player.facing = 1.0;
                }
            }
            CollisionSide::None => {}
        }
    }
}

/// Fire (if requested) and advance the grappling hook.
///
/// Only one hook can be out; a fire intent while extending is ignored.
pub fn update_hook(
    player: &mut Player,
    fire: bool,
    aim: Vec2,
    platforms: &[Platform],
    time_scale: f32,
) -> HookOutcome {
    if fire && !player.hook.is_active() {
        let origin = player.center();
        player.hook.state = HookState::Extending;
        player.hook.origin = origin;
        player.hook.length = 0.0;
        player.hook.direction = (aim - origin).normalize();
    }

    if !player.hook.is_active() {
        return HookOutcome::Idle;
    }

    player.hook.length += HOOK_SPEED * time_scale;
    let tip = player.hook.tip();

    if point_in_any(tip, platforms.iter().map(|p| &p.body)) {
        let pull = (tip - player.center()) * HOOK_PULL_FORCE;
        player.velocity += pull;
        player.hook.state = HookState::Idle;
        return HookOutcome::Attached(tip);
    }

    if player.hook.length >= player.hook.max_length {
        player.hook.state = HookState::Idle;
        return HookOutcome::MaxLength;
    }

    HookOutcome::Extending
}

/// Keep the player within `[0, 2·width − player.width]`.
pub fn clamp_to_world(player: &mut Player, bounds: &WorldBounds) {
    let max_x = bounds.width * 2.0 - player.body.width;
    if player.body.x < 0.0 {
        player.body.x = 0.0;
    }
    if player.body.x > max_x {
        player.body.x = max_x;
    }
}

/// Falling below the viewport is fatal.
pub fn check_fall_off(player: &mut Player, bounds: &WorldBounds) {
    if player.body.y > bounds.height {
        player.health = 0.0;
    }
}

/// Integrate one enemy: move, half gravity, land on platforms.
///
/// Enemies only resolve landings; they pass through platform sides.
pub fn integrate_enemy(enemy: &mut Enemy, platforms: &[Platform], time_scale: f32) {
    enemy.body.translate(enemy.velocity * time_scale);
    enemy.velocity.y += GRAVITY * ENEMY_GRAVITY_FACTOR * time_scale;

    for platform in platforms {
        if penetration_side(&enemy.body, enemy.velocity, &platform.body) == CollisionSide::Top {
            snap_to_side(&mut enemy.body, CollisionSide::Top, &platform.body);
            enemy.velocity.y = 0.0;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rect::Rect;
    use crate::game::state::EnemyKind;

    fn ground() -> Vec<Platform> {
        vec![Platform {
            body: Rect::new(0.0, 670.0, 2560.0, 50.0),
            color: ColorTag::Ground,
        }]
    }

    fn standing_player() -> Player {
        Player::new(Vec2::new(300.0, 610.0))
    }

    // =========================================================================
    // Movement
    // =========================================================================

    #[test]
    fn test_horizontal_intent_sets_velocity_and_facing() {
        let mut player = standing_player();
        let mut input = InputFrame::new();

        input.set_left(true);
        apply_movement_input(&mut player, &input);
        assert_eq!(player.velocity.x, -PLAYER_SPEED);
        assert_eq!(player.facing, -1.0);

        let input = InputFrame::new();
        apply_movement_input(&mut player, &input);
        assert_eq!(player.velocity.x, 0.0);
        assert_eq!(player.facing, -1.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut player = standing_player();
        let mut input = InputFrame::new();
        input.set_jump(true);

        let burst = apply_movement_input(&mut player, &input);
        assert!(burst.is_some());
        assert_eq!(player.velocity.y, -PLAYER_JUMP_FORCE);
        assert!(player.is_jumping);

        // Holding jump in the air does nothing
        player.velocity.y = -3.0;
        assert!(apply_movement_input(&mut player, &input).is_none());
        assert_eq!(player.velocity.y, -3.0);
    }

    #[test]
    fn test_wall_jump_pushes_away_from_wall() {
        let mut player = standing_player();
        player.is_jumping = true;
        player.is_wall_sliding = true;
        player.facing = -1.0;

        let mut input = InputFrame::new();
        input.set_jump(true);
        let burst = apply_movement_input(&mut player, &input);

        assert!(burst.is_some());
        assert_eq!(player.velocity.y, -WALL_JUMP_FORCE);
        assert_eq!(player.velocity.x, WALL_JUMP_FORCE);
        assert!(!player.is_wall_sliding);
        assert!(player.is_wall_jumping);
    }

    #[test]
    fn test_wall_slide_caps_fall() {
        let mut player = standing_player();
        player.is_wall_sliding = true;
        player.velocity.y = 9.0;

        apply_movement_input(&mut player, &InputFrame::new());
        assert_eq!(player.velocity.y, WALL_SLIDE_SPEED);
    }

    // =========================================================================
    // Platforms
    // =========================================================================

    #[test]
    fn test_player_lands_and_clears_jump_flags() {
        let mut player = standing_player();
        player.is_jumping = true;
        player.is_wall_jumping = true;
        player.velocity.y = 5.0;
        player.body.y = 612.0;

        resolve_player_platforms(&mut player, &ground());
        assert_eq!(player.body.bottom(), 670.0);
        assert_eq!(player.velocity.y, 0.0);
        assert!(!player.is_jumping);
        assert!(!player.is_wall_jumping);
    }

    #[test]
    fn test_airborne_side_hit_enters_wall_slide() {
        let wall = vec![Platform {
            body: Rect::new(400.0, 0.0, 50.0, 720.0),
            color: ColorTag::Wall,
        }];
        let mut player = Player::new(Vec2::new(362.0, 300.0));
        player.is_jumping = true;
        player.velocity = Vec2::new(PLAYER_SPEED, 0.0);

        resolve_player_platforms(&mut player, &wall);
        assert_eq!(player.body.right(), 400.0);
        assert_eq!(player.velocity.x, 0.0);
        assert!(player.is_wall_sliding);
        assert_eq!(player.facing, -1.0);
    }

    #[test]
    fn test_gravity_scales_with_time() {
        let mut slow = standing_player();
        let mut normal = standing_player();
        integrate_player(&mut slow, 0.4);
        integrate_player(&mut normal, 1.0);
        assert!((slow.velocity.y - 0.2).abs() < 1e-6);
        assert!((normal.velocity.y - 0.5).abs() < 1e-6);
    }

    // =========================================================================
    // Hook
    // =========================================================================

    #[test]
    fn test_hook_attaches_to_platform() {
        let platforms = vec![Platform {
            body: Rect::new(400.0, 200.0, 200.0, 20.0),
            color: ColorTag::Hue(200),
        }];
        let mut player = Player::new(Vec2::new(280.0, 180.0));
        let center = player.center();
        let aim = Vec2::new(center.x + 100.0, center.y);

        let first = update_hook(&mut player, true, aim, &platforms, 1.0);
        assert_eq!(first, HookOutcome::Extending);

        let mut outcome = first;
        for _ in 0..40 {
            outcome = update_hook(&mut player, false, aim, &platforms, 1.0);
            if outcome != HookOutcome::Extending {
                break;
            }
        }

        match outcome {
            HookOutcome::Attached(tip) => {
                assert!(tip.x > 400.0);
                assert!(player.velocity.x > 0.0);
            }
            other => panic!("expected attach, got {:?}", other),
        }
        assert!(!player.hook.is_active());
    }

    #[test]
    fn test_hook_releases_at_max_length() {
        let mut player = standing_player();
        let aim = player.center() + Vec2::new(0.0, -500.0);

        update_hook(&mut player, true, aim, &[], 1.0);
        let mut frames = 1;
        while player.hook.is_active() {
            let outcome = update_hook(&mut player, false, aim, &[], 1.0);
            frames += 1;
            if !player.hook.is_active() {
                assert_eq!(outcome, HookOutcome::MaxLength);
            }
        }
        assert_eq!(frames, 20);
        assert_eq!(player.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_second_fire_ignored_while_extending() {
        let mut player = standing_player();
        update_hook(&mut player, true, Vec2::new(1000.0, 0.0), &[], 1.0);
        let direction = player.hook.direction;

        update_hook(&mut player, true, Vec2::new(-1000.0, 0.0), &[], 1.0);
        assert_eq!(player.hook.direction, direction);
        assert_eq!(player.hook.length, 2.0 * HOOK_SPEED);
    }

    // =========================================================================
    // Bounds
    // =========================================================================

    #[test]
    fn test_clamp_and_fall_off() {
        let bounds = WorldBounds { width: 800.0, height: 600.0 };
        let mut player = standing_player();

        player.body.x = -20.0;
        clamp_to_world(&mut player, &bounds);
        assert_eq!(player.body.x, 0.0);

        player.body.x = 5000.0;
        clamp_to_world(&mut player, &bounds);
        assert_eq!(player.body.x, 1600.0 - PLAYER_WIDTH);

        player.body.y = 601.0;
        check_fall_off(&mut player, &bounds);
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_enemy_lands_with_half_gravity() {
        let mut enemy = Enemy::new(0, EnemyKind::MeleeBot, Vec2::new(100.0, 608.0), 40.0, 1000.0);
        enemy.velocity.y = 4.0;

        integrate_enemy(&mut enemy, &ground(), 1.0);
        assert_eq!(enemy.body.bottom(), 670.0);
        assert_eq!(enemy.velocity.y, 0.0);

        let mut falling = Enemy::new(1, EnemyKind::Drone, Vec2::new(100.0, 0.0), 40.0, 1000.0);
        integrate_enemy(&mut falling, &ground(), 1.0);
        assert_eq!(falling.velocity.y, GRAVITY * ENEMY_GRAVITY_FACTOR);
    }
}
