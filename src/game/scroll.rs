//! World Scroll
//!
//! The camera never moves. When the player runs past the scroll line the
//! whole world shifts left by the overshoot instead, so the player stays at
//! the line.

use crate::core::constants::SCROLL_THRESHOLD;
use crate::core::vec2::Vec2;
use crate::game::state::{AreaAttack, Projectile, WorldState};

/// Shift the world if the player is past the scroll line moving right.
///
/// Returns the distance scrolled (0 when nothing moved).
pub fn update_scroll(state: &mut WorldState) -> f32 {
    let line = state.bounds.width * SCROLL_THRESHOLD;
    let player = &state.player;
    if player.body.x <= line || player.velocity.x <= 0.0 {
        return 0.0;
    }

    let amount = player.body.x - line;
    shift_world(state, amount);
    amount
}

/// Move every world-space entity `amount` units to the left.
pub fn shift_world(state: &mut WorldState, amount: f32) {
    let delta = Vec2::new(-amount, 0.0);
    let shift_attacks = |attacks: &mut Vec<AreaAttack>| {
        for attack in attacks.iter_mut() {
            attack.body.translate(delta);
        }
    };
    let shift_projectiles = |projectiles: &mut Vec<Projectile>| {
        for projectile in projectiles.iter_mut() {
            projectile.body.translate(delta);
        }
    };

    let player = &mut state.player;
    player.body.translate(delta);
    shift_attacks(&mut player.attacks);
    player.hook.origin += delta;

    for platform in state.platforms.iter_mut() {
        platform.body.translate(delta);
    }
    for element in state.background.iter_mut() {
        element.body.translate(delta);
    }
    for enemy in state.enemies.iter_mut() {
        enemy.body.translate(delta);
        shift_attacks(&mut enemy.attacks);
    }
    if let Some(boss) = state.boss.as_mut() {
        boss.body.translate(delta);
        shift_projectiles(&mut boss.missiles);
        shift_attacks(&mut boss.attacks);
    }
    shift_projectiles(&mut state.projectiles);
    for particle in state.particles.iter_mut() {
        particle.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::generate_level;
    use crate::game::state::WorldBounds;

    #[test]
    fn test_no_scroll_behind_line_or_moving_left() {
        let mut state = WorldState::new(1, WorldBounds { width: 1000.0, height: 600.0 });
        state.player.body.x = 500.0;
        state.player.velocity.x = 5.0;
        assert_eq!(update_scroll(&mut state), 0.0);

        state.player.body.x = 700.0;
        state.player.velocity.x = -5.0;
        assert_eq!(update_scroll(&mut state), 0.0);
        assert_eq!(state.player.body.x, 700.0);
    }

    #[test]
    fn test_scroll_shifts_everything() {
        let mut state = WorldState::new(1, WorldBounds { width: 1000.0, height: 600.0 });
        generate_level(&mut state, 3);
        state.player.body.x = 620.0;
        state.player.velocity.x = 5.0;
        state.player.hook.origin = Vec2::new(640.0, 100.0);

        let ground_x = state.platforms[0].body.x;
        let enemy_x = state.enemies[0].body.x;
        let boss_x = state.boss.as_ref().unwrap().body.x;

        let scrolled = update_scroll(&mut state);
        assert_eq!(scrolled, 20.0);
        assert_eq!(state.player.body.x, 600.0);
        assert_eq!(state.player.hook.origin.x, 620.0);
        assert_eq!(state.platforms[0].body.x, ground_x - 20.0);
        assert_eq!(state.enemies[0].body.x, enemy_x - 20.0);
        assert_eq!(state.boss.as_ref().unwrap().body.x, boss_x - 20.0);
    }
}
