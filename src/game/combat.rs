//! Combat Resolution
//!
//! Melee swings, blaster shots, projectile flight, hitbox overlap, body
//! contact, enemy deaths and hitbox expiry. Every score change is
//! `base × combo` and goes through [`WorldState::add_combo_score`].

use tracing::debug;

use crate::core::constants::*;
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::collision::{first_overlap, rects_overlap};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::InputFrame;
use crate::game::state::{
    AreaAttack, AttackKind, BurstRequest, ColorTag, Particle, PickupSize,
    Projectile, Side, WorldState,
};
use crate::game::time_scale::FrameStep;

// =============================================================================
// COMBO
// =============================================================================

/// Reset the combo once no swing has landed within the timeout.
pub fn update_combo_timeout(state: &mut WorldState, timeout_ms: f32) {
    if state.combo > 0 && state.clock_ms - state.last_combo_at > timeout_ms as f64 {
        state.set_combo(0);
    }
}

// =============================================================================
// PLAYER ATTACKS
// =============================================================================

/// Start a sword swing if the intent is held and the cooldown has run out.
///
/// Damage uses the combo before this swing increments it.
pub fn try_melee(state: &mut WorldState, input: &InputFrame) -> bool {
    if !input.melee() || state.player.attack_cooldown > 0.0 {
        return false;
    }

    let combo = state.combo;
    let player = &mut state.player;
    player.attack_cooldown = ATTACK_COOLDOWN_MS;
    player.is_attacking = true;

    let facing = player.facing;
    let x = if facing > 0.0 {
        player.body.right()
    } else {
        player.body.x - SWORD_WIDTH
    };
    let hitbox = Rect::new(x, player.body.y, SWORD_WIDTH, SWORD_HEIGHT);
    let damage = SWORD_DAMAGE + SWORD_COMBO_BONUS * combo as f32;
    player.attacks.push(AreaAttack::new(AttackKind::Sword, hitbox, damage, Some(facing)));

    let center = player.center();
    let slash_at = Vec2::new(center.x + facing * 40.0, center.y);
    let color = if facing > 0.0 { ColorTag::Cyan } else { ColorTag::Magenta };

    state.set_combo(combo + 1);
    state.last_combo_at = state.clock_ms;
    state.request_burst(slash_at, 15, color);
    true
}

/// Fire a blaster bullet toward the aim point if off cooldown.
pub fn try_shoot(state: &mut WorldState, input: &InputFrame) -> bool {
    if !input.ranged() {
        return false;
    }

    let player = &state.player;
    let ready = match player.last_shot_at {
        Some(last) => state.clock_ms - last > player.shot_cooldown as f64,
        None => true,
    };
    if !ready {
        return false;
    }

    let origin = player.center();
    // Aiming at the player's own centre fires straight ahead
    let target = if input.aim == origin {
        origin.shifted_x(player.facing)
    } else {
        input.aim
    };

    state.player.last_shot_at = Some(state.clock_ms);
    state.projectiles.push(Projectile::player_bullet(origin, target));
    state.request_burst(origin, 5, ColorTag::Yellow);
    true
}

/// Count the melee cooldown down; the swing ends when it runs out.
pub fn tick_attack_cooldown(state: &mut WorldState, step: FrameStep) {
    let player = &mut state.player;
    if player.attack_cooldown > 0.0 {
        player.attack_cooldown -= step.dt_ms;
    }
    if player.attack_cooldown <= 0.0 {
        player.is_attacking = false;
    }
}

// =============================================================================
// PROJECTILES
// =============================================================================

/// Move free projectiles, resolve hits, cull strays.
///
/// Player bullets hit the first live enemy they overlap, otherwise the boss.
/// Hostile bullets only hit the player. A projectile dies on its first hit.
pub fn update_projectiles(state: &mut WorldState, step: FrameStep) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut kept = Vec::with_capacity(projectiles.len());

    for mut projectile in projectiles {
        projectile.body.translate(projectile.velocity * step.scale);

        let hit = match projectile.side {
            Side::Hostile => hit_player_with_projectile(state, &projectile),
            Side::Player => hit_hostiles_with_bullet(state, &projectile),
        };
        if hit || projectile.is_out_of_bounds(&state.bounds) {
            continue;
        }
        kept.push(projectile);
    }

    state.projectiles = kept;
}

/// Move boss missiles, resolve hits on the player, cull strays.
pub fn update_boss_missiles(state: &mut WorldState, step: FrameStep) {
    let missiles = match state.boss.as_mut() {
        Some(boss) => std::mem::take(&mut boss.missiles),
        None => return,
    };
    let mut kept = Vec::with_capacity(missiles.len());

    for mut missile in missiles {
        missile.body.translate(missile.velocity * step.scale);

        if hit_player_with_projectile(state, &missile) {
            continue;
        }
        if missile.is_out_of_bounds(&state.bounds) {
            continue;
        }
        kept.push(missile);
    }

    if let Some(boss) = state.boss.as_mut() {
        boss.missiles = kept;
    }
}

/// Apply a hostile projectile to the player if they overlap.
fn hit_player_with_projectile(state: &mut WorldState, projectile: &Projectile) -> bool {
    if !rects_overlap(&projectile.body, &state.player.body) {
        return false;
    }

    state.player.take_damage(projectile.damage);
    state.player.velocity = projectile.velocity * PROJECTILE_KNOCKBACK;
    state.request_burst(projectile.body.center(), 15, projectile.color);
    true
}

/// Apply a player bullet to the first enemy it overlaps, else the boss.
fn hit_hostiles_with_bullet(state: &mut WorldState, bullet: &Projectile) -> bool {
    let target = first_overlap(&bullet.body, &state.enemies, |e| (!e.is_dead()).then_some(e.body));

    if let Some(index) = target {
        let enemy = &mut state.enemies[index];
        enemy.take_damage(bullet.damage);
        enemy.velocity = bullet.velocity * PROJECTILE_KNOCKBACK;
        let color = enemy.color();

        state.request_burst(bullet.body.center(), 10, color);
        state.add_combo_score(SCORE_MINOR_HIT);
        return true;
    }

    if let Some(boss) = state.boss.as_mut() {
        if !boss.is_dead() && rects_overlap(&boss.body, &bullet.body) {
            boss.take_damage(bullet.damage / 2.0);
            let color = boss.color;

            state.request_burst(bullet.body.center(), 15, color);
            state.add_combo_score(SCORE_MINOR_HIT);
            return true;
        }
    }

    false
}

// =============================================================================
// AREA ATTACKS
// =============================================================================

/// Resolve the player's sword hitboxes against enemies and the boss.
///
/// A swing damages everything it overlaps on every frame it is alive.
pub fn resolve_player_attacks(state: &mut WorldState) {
    if state.player.attacks.is_empty() {
        return;
    }

    let attacks = std::mem::take(&mut state.player.attacks);
    let mut bursts = Vec::new();
    let mut enemy_hits = 0u32;
    let mut boss_hits = 0u32;

    for attack in &attacks {
        for enemy in state.enemies.iter_mut().filter(|e| !e.is_dead()) {
            if !rects_overlap(&enemy.body, &attack.body) {
                continue;
            }

            enemy.take_damage(attack.damage);
            if let Some(direction) = attack.direction {
                enemy.velocity = Vec2::new(direction * 5.0, -3.0);
            }
            bursts.push(BurstRequest {
                position: enemy.body.center(),
                count: 10,
                color: enemy.color(),
            });
            enemy_hits += 1;
        }

        if let Some(boss) = state.boss.as_mut() {
            if !boss.is_dead() && rects_overlap(&boss.body, &attack.body) {
                boss.take_damage(attack.damage);
                bursts.push(BurstRequest {
                    position: attack.body.center(),
                    count: 15,
                    color: boss.color,
                });
                boss_hits += 1;
            }
        }
    }

    state.player.attacks = attacks;
    state.flush_bursts(bursts);

    for _ in 0..enemy_hits {
        state.add_combo_score(SCORE_MELEE_HIT);
    }
    for _ in 0..boss_hits {
        state.add_combo_score(SCORE_MINOR_HIT);
    }
}

/// Resolve enemy melee swings and boss lasers against the player.
///
/// Like the sword, a hostile hitbox hits on every frame it overlaps.
pub fn resolve_hostile_attacks(state: &mut WorldState) {
    let player_body = state.player.body;
    let player_center = state.player.center();
    let mut damage = 0.0;
    let mut knockback = None;
    let mut hits = 0u32;

    for enemy in state.enemies.iter_mut() {
        let away = if player_center.x < enemy.body.center().x { -5.0 } else { 5.0 };
        for attack in &enemy.attacks {
            if rects_overlap(&attack.body, &player_body) {
                damage += attack.damage;
                knockback = Some(Vec2::new(away, -3.0));
                hits += 1;
            }
        }
    }

    if let Some(boss) = state.boss.as_ref() {
        for attack in &boss.attacks {
            if rects_overlap(&attack.body, &player_body) {
                damage += attack.damage;
                hits += 1;
            }
        }
    }

    if hits == 0 {
        return;
    }

    state.player.take_damage(damage);
    if let Some(velocity) = knockback {
        state.player.velocity = velocity;
    }
    for _ in 0..hits {
        state.request_burst(player_center, 15, ColorTag::Red);
    }
}

/// Touching an enemy or the boss hurts, unless mid-swing.
pub fn resolve_body_contact(state: &mut WorldState) {
    if state.player.is_attacking {
        return;
    }

    let mut bursts = Vec::new();
    let player = &mut state.player;

    for enemy in state.enemies.iter().filter(|e| !e.is_dead()) {
        if !rects_overlap(&player.body, &enemy.body) {
            continue;
        }
        player.take_damage(ENEMY_CONTACT_DAMAGE);
        let vx = if player.body.x < enemy.body.x { -5.0 } else { 5.0 };
        player.velocity = Vec2::new(vx, -3.0);
        bursts.push(BurstRequest {
            position: player.center(),
            count: 15,
            color: ColorTag::Red,
        });
    }

    if let Some(boss) = state.boss.as_ref() {
        if !boss.is_dead() && rects_overlap(&player.body, &boss.body) {
            player.take_damage(BOSS_CONTACT_DAMAGE);
            let vx = if player.body.x < boss.body.x { -10.0 } else { 10.0 };
            player.velocity = Vec2::new(vx, -5.0);
            bursts.push(BurstRequest {
                position: player.center(),
                count: 20,
                color: ColorTag::Red,
            });
        }
    }

    state.flush_bursts(bursts);
}

// =============================================================================
// DEATHS & EXPIRY
// =============================================================================

/// Remove dead enemies, scoring and maybe dropping a pickup for each.
///
/// Pickups only roll while the player is hurt; at full health no RNG draw
/// is made.
pub fn remove_dead_enemies(state: &mut WorldState, drop_chance: f32) {
    if !state.enemies.iter().any(|e| e.is_dead()) {
        return;
    }

    let enemies = std::mem::take(&mut state.enemies);
    let (dead, alive): (Vec<_>, Vec<_>) = enemies.into_iter().partition(|e| e.is_dead());
    state.enemies = alive;

    for enemy in dead {
        let center = enemy.body.center();
        state.request_burst(center, 20, enemy.color());
        state.add_combo_score(SCORE_ENEMY_KILL);
        state.push_event(GameEvent::new(
            state.frame,
            GameEventData::EnemyKilled {
                enemy_id: enemy.id,
                kind: enemy.kind,
                position: center,
            },
        ));

        if state.player.health < state.player.max_health && state.rng.chance(drop_chance) {
            state.particles.push(Particle::health_pickup(center, PickupSize::Small));
        }

        debug!(frame = state.frame, enemy_id = enemy.id, kind = ?enemy.kind, "enemy destroyed");
    }
}

/// Count every hitbox down and drop the expired ones.
///
/// Surviving lasers follow the boss.
pub fn update_area_attacks(state: &mut WorldState, step: FrameStep) {
    let expire = |attacks: &mut Vec<AreaAttack>| {
        for attack in attacks.iter_mut() {
            attack.timer -= step.dt_ms;
        }
        attacks.retain(|a| a.timer > 0.0);
    };

    expire(&mut state.player.attacks);
    for enemy in state.enemies.iter_mut() {
        expire(&mut enemy.attacks);
    }

    if let Some(boss) = state.boss.as_mut() {
        expire(&mut boss.attacks);
        let anchor = laser_anchor(&boss.body);
        for attack in boss.attacks.iter_mut().filter(|a| a.kind == AttackKind::Laser) {
            attack.body.x = anchor.x;
            attack.body.y = anchor.y;
        }
    }
}

/// Top-left of a laser fired by a boss at `boss_body`.
#[inline]
pub fn laser_anchor(boss_body: &Rect) -> Vec2 {
    Vec2::new(boss_body.x - 100.0, boss_body.y + 50.0)
}

// =============================================================================
// TESTS
// =============================================================================
