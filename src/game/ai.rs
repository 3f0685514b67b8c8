//! Enemy AI
//!
//! Every enemy walks toward the player and attacks once in range: drones
//! shoot, the melee kinds swing a short-lived hitbox on the player's side.

use crate::core::constants::*;
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::physics::integrate_enemy;
use crate::game::state::{AreaAttack, AttackKind, Enemy, Projectile, WorldState};
use crate::game::time_scale::FrameStep;

/// Attack chosen by an enemy this frame.
#[derive(Clone, Debug, PartialEq)]
pub enum EnemyAttack {
    /// Drone bullet
    Shot(Projectile),
    /// Melee swing (already pushed onto the enemy)
    Swing,
}

/// Run pursuit, movement and attacks for every live enemy.
pub fn update_enemies(state: &mut WorldState, step: FrameStep) {
    let target = state.player.body.position();

    for enemy in state.enemies.iter_mut().filter(|e| !e.is_dead()) {
        pursue(enemy, target);
        integrate_enemy(enemy, &state.platforms, step.scale);

        if let Some(EnemyAttack::Shot(bullet)) = try_attack(enemy, target, step) {
            state.projectiles.push(bullet);
        }
    }
}

/// Walk toward the player's x.
#[inline]
pub fn pursue(enemy: &mut Enemy, target: Vec2) {
    enemy.velocity.x = if enemy.body.x < target.x { ENEMY_SPEED } else { -ENEMY_SPEED };
}

/// Attack if ready and in range, otherwise count the cooldown down.
///
/// Range is measured top-left to top-left. An enemy out of range keeps its
/// expired cooldown and attacks the moment the player comes close.
pub fn try_attack(enemy: &mut Enemy, target: Vec2, step: FrameStep) -> Option<EnemyAttack> {
    if enemy.attack_cooldown > 0.0 {
        enemy.attack_cooldown -= step.dt_ms;
        return None;
    }

    let position = enemy.body.position();
    if position.distance(target) >= ENEMY_ATTACK_RANGE {
        return None;
    }
    let offset = target - position;

    enemy.attack_cooldown = enemy.attack_rate;

    if enemy.kind.is_ranged() {
        let origin = enemy.body.center();
        return Some(EnemyAttack::Shot(Projectile::drone_bullet(origin, origin + offset)));
    }

    let toward = if offset.x > 0.0 { 1.0 } else { -1.0 };
    let x = if toward > 0.0 {
        enemy.body.right()
    } else {
        enemy.body.x - ENEMY_MELEE_SIZE
    };
    enemy.attacks.push(AreaAttack::new(
        AttackKind::EnemyMelee,
        Rect::new(x, enemy.body.y, ENEMY_MELEE_SIZE, ENEMY_MELEE_SIZE),
        ENEMY_MELEE_DAMAGE,
        Some(toward),
    ));
    Some(EnemyAttack::Swing)
}
