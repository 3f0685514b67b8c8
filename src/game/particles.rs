//! Particles & Health Pickups
//!
//! Materializes queued burst requests, ages every particle and applies
//! health pickups the player touches.

use crate::core::vec2::Vec2;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::state::{BurstRequest, ColorTag, Particle, ParticleKind, WorldState};
use crate::core::rng::DeterministicRng;

/// Gravity applied to burst particles.
const BURST_GRAVITY: f32 = 0.1;

/// Heal effect burst size.
const HEAL_BURST: u32 = 15;

/// Spawn the particles for one burst request.
pub fn spawn_burst(rng: &mut DeterministicRng, request: &BurstRequest, out: &mut Vec<Particle>) {
    out.reserve(request.count as usize);
    for _ in 0..request.count {
        let angle = rng.next_angle();
        let speed = rng.range_f32(1.0, 4.0);
        let width = rng.range_f32(2.0, 7.0);
        let height = rng.range_f32(2.0, 7.0);
        let life = rng.range_f32(30.0, 90.0);

        out.push(Particle {
            position: request.position,
            velocity: Vec2::from_angle(angle, speed),
            size: Vec2::new(width, height),
            color: request.color,
            life,
            gravity: BURST_GRAVITY,
            kind: ParticleKind::Generic,
        });
    }
}

/// Turn every pending burst request into particles.
pub fn drain_bursts(state: &mut WorldState) {
    let requests = std::mem::take(&mut state.burst_requests);
    for request in &requests {
        spawn_burst(&mut state.rng, request, &mut state.particles);
    }
}

/// Run the particle system for one frame.
///
/// Pickups ignore bullet-time; everything else moves at `time_scale`. Heal
/// bursts requested by pickups appear the same frame.
pub fn update_particles(state: &mut WorldState, time_scale: f32) {
    drain_bursts(state);

    let particles = std::mem::take(&mut state.particles);
    let mut kept = Vec::with_capacity(particles.len());
    let player_body = state.player.body;

    for mut particle in particles {
        let scale = if particle.is_pickup() { 1.0 } else { time_scale };

        particle.position += particle.velocity * scale;
        particle.velocity.y += particle.gravity * scale;
        particle.life -= scale;

        if let ParticleKind::Health(size) = particle.kind {
            if particle.bounds().overlaps(&player_body) {
                let restored = state.player.heal(size.heal_amount());
                let health = state.player.health;
                state.request_burst(state.player.center(), HEAL_BURST, ColorTag::Green);
                state.push_event(GameEvent::new(
                    state.frame,
                    GameEventData::PlayerHealed { amount: restored, size, health },
                ));
                continue;
            }
        }

        if particle.life > 0.0 {
            kept.push(particle);
        }
    }

    state.particles = kept;
    drain_bursts(state);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::game::state::{PickupSize, WorldBounds};

    #[test]
    fn test_burst_particle_ranges() {
        let mut rng = DeterministicRng::new(5);
        let mut out = Vec::new();
        let request = BurstRequest {
            position: Vec2::new(10.0, 20.0),
            count: 200,
            color: ColorTag::Cyan,
        };
        spawn_burst(&mut rng, &request, &mut out);

        assert_eq!(out.len(), 200);
        for p in &out {
            let speed = p.velocity.length();
            assert!((0.999..4.001).contains(&speed));
            assert!((2.0..7.0).contains(&p.size.x));
            assert!((30.0..90.0).contains(&p.life));
            assert_eq!(p.position, request.position);
        }
    }

    #[test]
    fn test_requests_materialize_and_drain() {
        let mut state = WorldState::new(9, WorldBounds::default());
        state.request_burst(Vec2::new(0.0, 0.0), 12, ColorTag::Red);

        update_particles(&mut state, 1.0);
        assert_eq!(state.particles.len(), 12);
        assert!(state.burst_requests.is_empty());
    }

    #[test]
    fn test_particles_age_with_time_scale() {
        let mut state = WorldState::new(9, WorldBounds::default());
        state.particles.push(Particle {
            position: Vec2::new(-500.0, -500.0),
            velocity: Vec2::new(2.0, 0.0),
            size: Vec2::new(3.0, 3.0),
            color: ColorTag::Cyan,
            life: 1.0,
            gravity: 0.1,
            kind: ParticleKind::Generic,
        });

        update_particles(&mut state, 0.4);
        let p = &state.particles[0];
        assert!((p.position.x + 499.2).abs() < 1e-4);
        assert!((p.life - 0.6).abs() < 1e-6);

        update_particles(&mut state, 1.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_pickup_heals_and_emits() {
        let mut state = WorldState::new(9, WorldBounds::default());
        state.player.health = 50.0;
        let center = state.player.center();
        state.particles.push(Particle::health_pickup(center, PickupSize::Small));

        update_particles(&mut state, 0.4);
        assert_eq!(state.player.health, 50.0 + HEAL_SMALL);

        // Pickup consumed, heal burst materialized
        assert_eq!(state.particles.len(), HEAL_BURST as usize);
        assert!(state.particles.iter().all(|p| !p.is_pickup()));
        assert!(state
            .take_events()
            .iter()
            .any(|e| matches!(e.data, GameEventData::PlayerHealed { size: PickupSize::Small, .. })));
    }

    #[test]
    fn test_big_pickup_clamps_at_max() {
        let mut state = WorldState::new(9, WorldBounds::default());
        state.player.health = 90.0;
        let center = state.player.center();
        state.particles.push(Particle::health_pickup(center, PickupSize::Big));

        update_particles(&mut state, 1.0);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_pickup_ignores_bullet_time() {
        let mut state = WorldState::new(9, WorldBounds::default());
        state.particles.push(Particle::health_pickup(Vec2::new(-900.0, -900.0), PickupSize::Small));

        update_particles(&mut state, 0.4);
        assert_eq!(state.particles[0].life, PICKUP_LIFE - 1.0);
    }
}
