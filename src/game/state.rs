//! World State Definitions
//!
//! Every entity pool lives inside one [`WorldState`] aggregate that the frame
//! loop passes by `&mut` into each system. No system keeps state of its own.

use serde::{Serialize, Deserialize};

use crate::core::constants::*;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::rect::Rect;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::events::GameEvent;
use crate::game::schedule::Schedule;

// =============================================================================
// TAGS
// =============================================================================

/// Colour tag carried by particles, platforms and hit effects.
///
/// Purely cosmetic; no behaviour is keyed off colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Cyan,
    Magenta,
    Yellow,
    Red,
    Orange,
    Green,
    /// Ground slab
    Ground,
    /// Boundary wall
    Wall,
    /// Arbitrary hue in degrees (generated platforms)
    Hue(u16),
}

impl ColorTag {
    fn code(self) -> u16 {
        match self {
            ColorTag::Cyan => 0,
            ColorTag::Magenta => 1,
            ColorTag::Yellow => 2,
            ColorTag::Red => 3,
            ColorTag::Orange => 4,
            ColorTag::Green => 5,
            ColorTag::Ground => 6,
            ColorTag::Wall => 7,
            ColorTag::Hue(h) => 1000 + h,
        }
    }
}

/// Which side an attack or projectile belongs to.
///
/// Player-side damage lands on enemies and the boss; hostile damage lands
/// only on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    Player = 0,
    Hostile = 1,
}

/// Cosmetic player skin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Skin {
    #[default]
    Default,
    CyberNinja,
    NeonSamurai,
}

// =============================================================================
// AREA ATTACKS & PROJECTILES
// =============================================================================

/// Kind of timed rectangular hitbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttackKind {
    /// Player sword swing
    Sword = 0,
    /// Enemy melee swing
    EnemyMelee = 1,
    /// Boss phase 2 laser
    Laser = 2,
}

impl AttackKind {
    /// Ownership side of this attack kind.
    pub fn side(self) -> Side {
        match self {
            AttackKind::Sword => Side::Player,
            AttackKind::EnemyMelee | AttackKind::Laser => Side::Hostile,
        }
    }
}

/// A timed rectangular hitbox owned by exactly one actor.
///
/// Damages every opposing target it overlaps, on every frame, until its
/// timer runs out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaAttack {
    /// Kind of attack
    pub kind: AttackKind,
    /// Hitbox
    pub body: Rect,
    /// Damage per hit
    pub damage: f32,
    /// Remaining lifetime (ms)
    pub timer: f32,
    /// Horizontal knockback direction (±1), if any
    pub direction: Option<f32>,
}

impl AreaAttack {
    /// Create a new area attack.
    pub fn new(kind: AttackKind, body: Rect, damage: f32, direction: Option<f32>) -> Self {
        Self {
            kind,
            body,
            damage,
            timer: AREA_ATTACK_TIMER_MS,
            direction,
        }
    }

    /// Ownership side.
    #[inline]
    pub fn side(&self) -> Side {
        self.kind.side()
    }
}

/// Kind of projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProjectileKind {
    /// Blaster / drone bullet
    Bullet = 0,
    /// Boss homing missile
    Missile = 1,
}

/// A moving damage source destroyed on its first hit or when off-screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Kind of projectile
    pub kind: ProjectileKind,
    /// Hitbox
    pub body: Rect,
    /// Velocity per reference frame
    pub velocity: Vec2,
    /// Damage on hit
    pub damage: f32,
    /// Ownership side
    pub side: Side,
    /// Cosmetic colour, also used for the impact burst
    pub color: ColorTag,
}

impl Projectile {
    /// Player blaster bullet from `origin` toward `target`.
    pub fn player_bullet(origin: Vec2, target: Vec2) -> Self {
        Self {
            kind: ProjectileKind::Bullet,
            body: Rect::new(origin.x, origin.y, BULLET_SIZE, BULLET_SIZE),
            velocity: origin.toward(target, BULLET_SPEED),
            damage: BULLET_DAMAGE,
            side: Side::Player,
            color: ColorTag::Yellow,
        }
    }

    /// Drone bullet from `origin` toward `target`.
    pub fn drone_bullet(origin: Vec2, target: Vec2) -> Self {
        Self {
            kind: ProjectileKind::Bullet,
            body: Rect::new(origin.x, origin.y, BULLET_SIZE, BULLET_SIZE),
            velocity: origin.toward(target, DRONE_BULLET_SPEED),
            damage: DRONE_BULLET_DAMAGE,
            side: Side::Hostile,
            color: ColorTag::Magenta,
        }
    }

    /// Boss missile from `origin` with a precomputed velocity.
    pub fn missile(origin: Vec2, velocity: Vec2) -> Self {
        Self {
            kind: ProjectileKind::Missile,
            body: Rect::new(origin.x, origin.y, MISSILE_SIZE, MISSILE_SIZE),
            velocity,
            damage: MISSILE_DAMAGE,
            side: Side::Hostile,
            color: ColorTag::Orange,
        }
    }

    /// Check whether the projectile is beyond the bounds plus margin.
    pub fn is_out_of_bounds(&self, bounds: &WorldBounds) -> bool {
        let x = self.body.x;
        let y = self.body.y;
        x < -CULL_MARGIN
            || x > bounds.width + CULL_MARGIN
            || y < -CULL_MARGIN
            || y > bounds.height + CULL_MARGIN
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// Persistent grappling hook phase.
///
/// Attaching and hitting max length resolve within the frame they happen
/// and drop straight back to `Idle`; they surface as
/// [`HookOutcome`](crate::game::physics::HookOutcome) from
/// [`update_hook`](crate::game::physics::update_hook).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HookState {
    #[default]
    Idle,
    Extending,
}

/// Grappling hook sub-state of the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrapplingHook {
    /// Current phase
    pub state: HookState,
    /// Fire point (player centre when fired)
    pub origin: Vec2,
    /// Unit direction toward the aim point
    pub direction: Vec2,
    /// Current rope length
    pub length: f32,
    /// Maximum rope length
    pub max_length: f32,
}

impl Default for GrapplingHook {
    fn default() -> Self {
        Self {
            state: HookState::Idle,
            origin: Vec2::ZERO,
            direction: Vec2::ZERO,
            length: 0.0,
            max_length: HOOK_MAX_LENGTH,
        }
    }
}

impl GrapplingHook {
    /// Whether the hook is out.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == HookState::Extending
    }

    /// Current tip position.
    #[inline]
    pub fn tip(&self) -> Vec2 {
        self.origin + self.direction * self.length
    }
}

/// The player character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Body
    pub body: Rect,
    /// Velocity per reference frame
    pub velocity: Vec2,
    /// +1 facing right, -1 facing left
    pub facing: f32,

    /// Current health
    pub health: f32,
    /// Maximum health
    pub max_health: f32,

    /// Airborne after a ground jump
    pub is_jumping: bool,
    /// Pressed against a wall while airborne
    pub is_wall_sliding: bool,
    /// Airborne after a wall jump
    pub is_wall_jumping: bool,
    /// Mid-swing (attack cooldown running)
    pub is_attacking: bool,

    // =========================================================================
    // Bullet-time
    // =========================================================================

    /// Gauge, 0 to 100
    pub bullet_time: f32,
    /// Active this frame
    pub bullet_time_active: bool,
    /// Clock time the gauge last emptied
    pub bullet_time_ended_at: Option<f64>,

    // =========================================================================
    // Attacks
    // =========================================================================

    /// Melee cooldown remaining (ms)
    pub attack_cooldown: f32,
    /// Live sword hitboxes
    pub attacks: Vec<AreaAttack>,
    /// Minimum delay between shots (ms)
    pub shot_cooldown: f32,
    /// Clock time of the last shot
    pub last_shot_at: Option<f64>,

    /// Grappling hook
    pub hook: GrapplingHook,

    /// Cosmetic skin
    pub skin: Skin,
}

impl Player {
    /// Create a new player at a position.
    pub fn new(position: Vec2) -> Self {
        Self {
            body: Rect::new(position.x, position.y, PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity: Vec2::ZERO,
            facing: 1.0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            is_jumping: false,
            is_wall_sliding: false,
            is_wall_jumping: false,
            is_attacking: false,
            bullet_time: BULLET_TIME_MAX,
            bullet_time_active: false,
            bullet_time_ended_at: None,
            attack_cooldown: 0.0,
            attacks: Vec::new(),
            shot_cooldown: SHOT_COOLDOWN_MS,
            last_shot_at: None,
            hook: GrapplingHook::default(),
            skin: Skin::Default,
        }
    }

    /// Spawn point for a viewport: quarter width, half height.
    pub fn spawn_point(bounds: &WorldBounds) -> Vec2 {
        Vec2::new(bounds.width / 4.0, bounds.height / 2.0)
    }

    /// Centre of the body.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Airborne from a ground jump or a wall jump.
    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.is_jumping || self.is_wall_jumping
    }

    /// Subtract health, clamped at zero.
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Add health, clamped at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Check if player is dead.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Health as a percentage of max.
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health * 100.0).clamp(0.0, 100.0)
    }
}

// =============================================================================
// ENEMIES
// =============================================================================

/// Enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EnemyKind {
    /// Ranged: fires bullets at the player
    Drone = 0,
    /// Melee
    CyberNinja = 1,
    /// Melee
    MeleeBot = 2,
}

impl EnemyKind {
    /// All kinds, in spawn-table order.
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Drone, EnemyKind::CyberNinja, EnemyKind::MeleeBot];

    /// Colour used for the body and hit bursts.
    pub fn color(self) -> ColorTag {
        match self {
            EnemyKind::Drone => ColorTag::Magenta,
            EnemyKind::CyberNinja => ColorTag::Cyan,
            EnemyKind::MeleeBot => ColorTag::Red,
        }
    }

    /// Whether this kind attacks with projectiles.
    pub fn is_ranged(self) -> bool {
        match self {
            EnemyKind::Drone => true,
            EnemyKind::CyberNinja | EnemyKind::MeleeBot => false,
        }
    }
}

/// A regular enemy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique id within the current level
    pub id: u32,
    /// Body
    pub body: Rect,
    /// Velocity per reference frame
    pub velocity: Vec2,
    /// Current health
    pub health: f32,
    /// Maximum health
    pub max_health: f32,
    /// Archetype
    pub kind: EnemyKind,
    /// Time until next attack (ms)
    pub attack_cooldown: f32,
    /// Attack interval (ms)
    pub attack_rate: f32,
    /// Live melee hitboxes
    pub attacks: Vec<AreaAttack>,
}

impl Enemy {
    /// Create an enemy with full health.
    pub fn new(id: u32, kind: EnemyKind, position: Vec2, max_health: f32, attack_rate: f32) -> Self {
        Self {
            id,
            body: Rect::new(position.x, position.y, ENEMY_WIDTH, ENEMY_HEIGHT),
            velocity: Vec2::ZERO,
            health: max_health,
            max_health,
            kind,
            attack_cooldown: 0.0,
            attack_rate,
            attacks: Vec::new(),
        }
    }

    /// Colour (from kind).
    #[inline]
    pub fn color(&self) -> ColorTag {
        self.kind.color()
    }

    /// Subtract health, clamped at zero.
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Check if enemy is dead.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

// =============================================================================
// BOSS
// =============================================================================

/// The boss singleton.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    /// Body
    pub body: Rect,
    /// Velocity per reference frame
    pub velocity: Vec2,
    /// Current health
    pub health: f32,
    /// Maximum health
    pub max_health: f32,
    /// 1 or 2, never decreases
    pub phase: u8,
    /// Time until next attack (ms)
    pub attack_cooldown: f32,
    /// Attack interval (ms)
    pub attack_rate: f32,
    /// Number of attack decisions made (cosmetic pattern counter)
    pub attack_pattern: u32,
    /// Live missiles
    pub missiles: Vec<Projectile>,
    /// Live lasers
    pub attacks: Vec<AreaAttack>,
    /// Body colour (changes on phase 2)
    pub color: ColorTag,
}

impl Boss {
    /// Create a phase 1 boss.
    pub fn new(position: Vec2, max_health: f32) -> Self {
        Self {
            body: Rect::new(position.x, position.y, BOSS_WIDTH, BOSS_HEIGHT),
            velocity: Vec2::new(-BOSS_SPEED, 0.0),
            health: max_health,
            max_health,
            phase: 1,
            attack_cooldown: 0.0,
            attack_rate: BOSS_ATTACK_RATE_PHASE1,
            attack_pattern: 0,
            missiles: Vec::new(),
            attacks: Vec::new(),
            color: ColorTag::Orange,
        }
    }

    /// Subtract health, clamped at zero.
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Check if boss is dead.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Whether the phase 2 threshold has been reached.
    #[inline]
    pub fn below_half(&self) -> bool {
        self.health <= self.max_health / 2.0
    }
}

// =============================================================================
// PARTICLES
// =============================================================================

/// Health pickup size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupSize {
    Small,
    Big,
}

impl PickupSize {
    /// Health restored on pickup.
    pub fn heal_amount(self) -> f32 {
        match self {
            PickupSize::Small => HEAL_SMALL,
            PickupSize::Big => HEAL_BIG,
        }
    }

    /// Side length of the pickup.
    pub fn size(self) -> f32 {
        match self {
            PickupSize::Small => 15.0,
            PickupSize::Big => 30.0,
        }
    }
}

/// Particle behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Cosmetic only
    Generic,
    /// Heals the player on overlap
    Health(PickupSize),
}

/// Ephemeral visual or pickup entity.
///
/// `position` is the centre; the collision box is `size` around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Centre
    pub position: Vec2,
    /// Velocity per reference frame
    pub velocity: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Colour
    pub color: ColorTag,
    /// Remaining life (frames)
    pub life: f32,
    /// Added to vertical velocity each frame
    pub gravity: f32,
    /// Behaviour
    pub kind: ParticleKind,
}

impl Particle {
    /// Create a stationary health pickup centred on `position`.
    pub fn health_pickup(position: Vec2, size: PickupSize) -> Self {
        let side = size.size();
        Self {
            position,
            velocity: Vec2::ZERO,
            size: Vec2::new(side, side),
            color: ColorTag::Green,
            life: PICKUP_LIFE,
            gravity: 0.0,
            kind: ParticleKind::Health(size),
        }
    }

    /// Collision box.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size.x, self.size.y)
    }

    /// Whether this particle is a health pickup.
    #[inline]
    pub fn is_pickup(&self) -> bool {
        matches!(self.kind, ParticleKind::Health(_))
    }
}

// =============================================================================
// TERRAIN
// =============================================================================

/// Static collidable terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Extent
    pub body: Rect,
    /// Colour
    pub color: ColorTag,
}

/// Cosmetic skyline block, no physics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundElement {
    /// Extent
    pub body: Rect,
    /// Hue in degrees
    pub hue: u16,
    /// Brightness, 0.1 to 0.6
    pub brightness: f32,
}

// =============================================================================
// WORLD
// =============================================================================

/// Viewport dimensions supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Viewport width
    pub width: f32,
    /// Viewport height
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Current phase of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level generated, waiting for start
    #[default]
    Title,
    /// Active gameplay
    Playing,
    /// Player died; only a restart resumes
    GameOver,
}

/// A pending "spawn particle burst" request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BurstRequest {
    /// Burst origin
    pub position: Vec2,
    /// Number of particles
    pub count: u32,
    /// Colour
    pub color: ColorTag,
}

/// Complete state of the simulation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    /// Frames simulated while playing
    pub frame: u64,

    /// Accumulated real time (ms) while playing
    pub clock_ms: f64,

    /// Current game phase
    pub phase: GamePhase,

    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state
    pub rng: DeterministicRng,

    /// Viewport dimensions
    pub bounds: WorldBounds,

    /// Current level (1-based)
    pub level: u32,

    /// Collidable terrain, ground first
    pub platforms: Vec<Platform>,

    /// Cosmetic skyline
    pub background: Vec<BackgroundElement>,

    /// The player
    pub player: Player,

    /// Active enemies
    pub enemies: Vec<Enemy>,

    /// Next enemy id
    pub next_enemy_id: u32,

    /// The boss, if a boss level is active
    pub boss: Option<Boss>,

    /// Whether the current level's boss is still alive
    pub boss_active: bool,

    /// Free-flying bullets (player and drone)
    pub projectiles: Vec<Projectile>,

    /// Particles and pickups
    pub particles: Vec<Particle>,

    /// Running score
    pub score: u32,

    /// Current combo count
    pub combo: u32,

    /// Clock time of the last combo increment
    pub last_combo_at: f64,

    /// Delayed boss sub-attacks
    pub schedule: Schedule,

    /// Burst requests not yet materialized
    #[serde(skip)]
    pub burst_requests: Vec<BurstRequest>,

    /// Events generated this frame (cleared each frame)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl WorldState {
    /// Create an empty world at level 1.
    ///
    /// No terrain or enemies exist until a level is generated.
    pub fn new(rng_seed: u64, bounds: WorldBounds) -> Self {
        Self {
            frame: 0,
            clock_ms: 0.0,
            phase: GamePhase::Title,
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            bounds,
            level: 1,
            platforms: Vec::new(),
            background: Vec::new(),
            player: Player::new(Player::spawn_point(&bounds)),
            enemies: Vec::new(),
            next_enemy_id: 0,
            boss: None,
            boss_active: false,
            projectiles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            combo: 0,
            last_combo_at: 0.0,
            schedule: Schedule::new(),
            burst_requests: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Check if the game is running.
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, GamePhase::Playing)
    }

    /// Check if the game has ended.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver)
    }

    /// Request a particle burst.
    ///
    /// Recorded both as an event for presentation and as a pending request
    /// that the particle system materializes this frame.
    pub fn request_burst(&mut self, position: Vec2, count: u32, color: ColorTag) {
        self.burst_requests.push(BurstRequest { position, count, color });
        self.push_event(GameEvent::particle_burst(self.frame, position, count, color));
    }

    /// Request every burst in `bursts`, in order.
    pub fn flush_bursts(&mut self, bursts: Vec<BurstRequest>) {
        for burst in bursts {
            self.request_burst(burst.position, burst.count, burst.color);
        }
    }

    /// Add `base × combo` to the score. Returns the delta.
    pub fn add_combo_score(&mut self, base: u32) -> u32 {
        let delta = base.saturating_mul(self.combo);
        if delta > 0 {
            self.score = self.score.saturating_add(delta);
            self.push_event(GameEvent::score_changed(self.frame, delta, self.score));
        }
        delta
    }

    /// Set the combo counter and notify.
    pub fn set_combo(&mut self, combo: u32) {
        self.combo = combo;
        self.push_event(GameEvent::combo_changed(self.frame, combo));
    }

    /// Allocate an enemy id.
    pub fn alloc_enemy_id(&mut self) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        id
    }

    /// Bullet-time gauge as a percentage.
    pub fn bullet_time_percent(&self) -> f32 {
        (self.player.bullet_time / BULLET_TIME_MAX * 100.0).clamp(0.0, 100.0)
    }

    /// Compute hash of current state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, self.rng_seed, |hasher| {
            hasher.update_u8(self.phase as u8);
            for word in self.rng.state() {
                hasher.update_u64(word);
            }
            hasher.update_u32(self.level);
            hasher.update_u32(self.score);
            hasher.update_u32(self.combo);

            let p = &self.player;
            hasher.update_rect(&p.body);
            hasher.update_vec2(p.velocity);
            hasher.update_f32(p.health);
            hasher.update_f32(p.bullet_time);
            hasher.update_bool(p.bullet_time_active);
            hasher.update_u32(p.attacks.len() as u32);
            hasher.update_bool(p.hook.is_active());

            for platform in &self.platforms {
                hasher.update_rect(&platform.body);
            }

            for enemy in &self.enemies {
                hasher.update_u32(enemy.id);
                hasher.update_u8(enemy.kind as u8);
                hasher.update_rect(&enemy.body);
                hasher.update_f32(enemy.health);
                hasher.update_u32(enemy.attacks.len() as u32);
            }

            hasher.update_bool(self.boss_active);
            if let Some(boss) = &self.boss {
                hasher.update_rect(&boss.body);
                hasher.update_f32(boss.health);
                hasher.update_u8(boss.phase);
                hasher.update_u32(boss.missiles.len() as u32);
                hasher.update_u32(boss.attacks.len() as u32);
            }

            for projectile in &self.projectiles {
                hasher.update_u8(projectile.side as u8);
                hasher.update_rect(&projectile.body);
            }

            hasher.update_u32(self.particles.len() as u32);
            for particle in self.particles.iter().filter(|p| p.is_pickup()) {
                hasher.update_vec2(particle.position);
                hasher.update_u32(particle.color.code() as u32);
            }

            hasher.update_u32(self.schedule.len() as u32);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
