//! All game entity types. Pure data plus a few lookups, no simulation logic.

use std::time::Duration;

use crate::constants::{
    Rgb, Sprite, C_ENEMY_FIGHTER, C_ENEMY_PROJECTILE, C_ENEMY_SCOUT, C_ENEMY_TANK,
    C_PLAYER_PROJECTILE, ENEMY_SHOT_SPEED, PIXEL_SCALE, PLAYER_SHOT_SPEED, PROJECTILE_DAMAGE,
    SPRITE_FIGHTER, SPRITE_PROJECTILE, SPRITE_SCOUT, SPRITE_TANK,
};

// ── Identity ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Hands out world-unique ids in increasing order.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

// ── Sprite-backed body ────────────────────────────────────────────────────────

/// Position, velocity and look of a sprite-rendered object.
///
/// `width`/`height` are always `cols * PIXEL_SCALE` / `rows * PIXEL_SCALE` of
/// the sprite; they can only be read.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    sprite: Sprite,
    width: f32,
    height: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, color: Rgb, sprite: Sprite) -> Self {
        Body {
            x,
            y,
            vx,
            vy,
            color,
            sprite,
            width: sprite_width(sprite),
            height: sprite_height(sprite),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn sprite(&self) -> Sprite {
        self.sprite
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Axis-aligned bounding-box overlap (touching edges do not count).
    pub fn overlaps(&self, other: &Body) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

pub fn sprite_width(sprite: Sprite) -> f32 {
    sprite.first().map_or(0, |row| row.len()) as f32 * PIXEL_SCALE
}

pub fn sprite_height(sprite: Sprite) -> f32 {
    sprite.len() as f32 * PIXEL_SCALE
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    /// Can go negative on the killing blow; the HUD clamps it.
    pub hp: i32,
    pub max_hp: i32,
    /// Frames of damage immunity left.
    pub invulnerable: u32,
}

impl Player {
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Scout,
    Fighter,
    Tank,
}

impl EnemyKind {
    pub fn sprite(self) -> Sprite {
        match self {
            EnemyKind::Scout => SPRITE_SCOUT,
            EnemyKind::Fighter => SPRITE_FIGHTER,
            EnemyKind::Tank => SPRITE_TANK,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            EnemyKind::Scout => C_ENEMY_SCOUT,
            EnemyKind::Fighter => C_ENEMY_FIGHTER,
            EnemyKind::Tank => C_ENEMY_TANK,
        }
    }

    pub fn hit_points(self) -> i32 {
        match self {
            EnemyKind::Scout => 1,
            EnemyKind::Fighter => 3,
            EnemyKind::Tank => 8,
        }
    }

    /// Score credited when an enemy of this kind is destroyed.
    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::Scout => 100,
            EnemyKind::Fighter => 300,
            EnemyKind::Tank => 800,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub kind: EnemyKind,
    pub hp: i32,
}

impl Enemy {
    /// A full-health enemy of `kind` at rest at (`x`, `y`).
    pub fn new(id: EntityId, kind: EnemyKind, x: f32, y: f32) -> Self {
        Enemy {
            id,
            body: Body::new(x, y, 0.0, 0.0, kind.color(), kind.sprite()),
            kind,
            hp: kind.hit_points(),
        }
    }

    pub fn score_value(&self) -> u32 {
        self.kind.score_value()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

impl ProjectileOwner {
    pub fn color(self) -> Rgb {
        match self {
            ProjectileOwner::Player => C_PLAYER_PROJECTILE,
            ProjectileOwner::Enemy => C_ENEMY_PROJECTILE,
        }
    }

    /// Vertical speed: player shots climb, enemy shots fall.
    pub fn speed(self) -> f32 {
        match self {
            ProjectileOwner::Player => PLAYER_SHOT_SPEED,
            ProjectileOwner::Enemy => ENEMY_SHOT_SPEED,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: EntityId,
    pub body: Body,
    pub damage: i32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn new(id: EntityId, owner: ProjectileOwner, x: f32, y: f32) -> Self {
        Projectile {
            id,
            body: Body::new(x, y, 0.0, owner.speed(), owner.color(), SPRITE_PROJECTILE),
            damage: PROJECTILE_DAMAGE,
            owner,
        }
    }
}

// ── Cosmetic effects ──────────────────────────────────────────────────────────

/// Short-lived square; never collides with anything.
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Frames left before removal.
    pub life: u32,
    pub color: Rgb,
    pub size: f32,
}

/// Parallax background star. Wraps to the top instead of being destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub brightness: f32,
}

// ── Mission briefing ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionData {
    pub title: &'static str,
    pub description: &'static str,
    pub target: &'static str,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Keys held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

// ── Frame output ──────────────────────────────────────────────────────────────

/// Something noteworthy that happened during a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    EnemySpawned { kind: EnemyKind },
    EnemyDestroyed { kind: EnemyKind, score: u32 },
    EnemyEscaped { kind: EnemyKind },
    PlayerHit { damage: i32, hp: i32 },
    PlayerCrashed { kind: EnemyKind, hp: i32 },
    DifficultyRaised { difficulty: u32 },
    PlayerDestroyed,
}

/// Everything a single `advance` reports back to its caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameEffects {
    pub score_delta: u32,
    /// Set on the frame the player's hp first drops to zero or below.
    pub game_over: bool,
    pub events: Vec<FrameEvent>,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The complete simulation state, owned by one `Session`.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    /// Frames advanced since the last reset; the first frame is 1.
    pub frame: u64,
    /// Starts at 1 and only ever grows.
    pub difficulty: u32,
    /// Sum of every `dt` passed to `advance` since the last reset.
    pub clock: Duration,
    pub last_shot: Option<Duration>,
    /// Latched once the game-over signal has been raised.
    pub terminated: bool,
    pub ids: IdAllocator,
}
