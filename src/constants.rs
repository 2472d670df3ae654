//! Static tables: surface geometry, palette, sprite grids and gameplay tuning.
//! Pure data, no behaviour.

use std::time::Duration;

// ── Surface ───────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;
pub const FPS: u32 = 60;

/// Size of one sprite "pixel" in surface units.
pub const PIXEL_SCALE: f32 = 4.0;

// ── Palette ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// White scaled by `brightness` (0.0 ..= 1.0), used for background stars.
    pub fn grey(brightness: f32) -> Self {
        let v = (brightness.clamp(0.0, 1.0) * 255.0) as u8;
        Rgb { r: v, g: v, b: v }
    }
}

pub const C_BACKGROUND: Rgb = Rgb::new(0x05, 0x05, 0x05);
pub const C_PLAYER: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
pub const C_PLAYER_PROJECTILE: Rgb = Rgb::new(0x60, 0xa5, 0xfa);
pub const C_ENEMY_SCOUT: Rgb = Rgb::new(0xef, 0x44, 0x44);
pub const C_ENEMY_FIGHTER: Rgb = Rgb::new(0xf9, 0x73, 0x16);
pub const C_ENEMY_TANK: Rgb = Rgb::new(0xa8, 0x55, 0xf7);
pub const C_ENEMY_PROJECTILE: Rgb = Rgb::new(0xfb, 0xbf, 0x24);
pub const C_TEXT: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const C_UI_ACCENT: Rgb = Rgb::new(0x22, 0xc5, 0x5e);
pub const C_UI_DIM: Rgb = Rgb::new(0x6b, 0x72, 0x80);
pub const C_UI_ALERT: Rgb = Rgb::new(0xf8, 0x71, 0x71);

// ── Sprites (1 = drawn, 0 = transparent) ─────────────────────────────────────

pub type Sprite = &'static [&'static [u8]];

pub const SPRITE_PLAYER: Sprite = &[
    &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    &[0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    &[0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    &[0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0],
    &[0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1],
    &[1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1],
    &[1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1],
];

pub const SPRITE_SCOUT: Sprite = &[
    &[0, 0, 1, 1, 1, 0, 0],
    &[0, 1, 1, 1, 1, 1, 0],
    &[1, 1, 0, 1, 0, 1, 1],
    &[1, 0, 1, 1, 1, 0, 1],
    &[0, 1, 0, 1, 0, 1, 0],
];

pub const SPRITE_FIGHTER: Sprite = &[
    &[0, 0, 1, 1, 1, 0, 0],
    &[0, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 1, 0, 1, 0, 1],
    &[0, 1, 1, 1, 1, 1, 0],
    &[0, 1, 0, 0, 0, 1, 0],
];

pub const SPRITE_TANK: Sprite = &[
    &[0, 0, 1, 1, 1, 1, 1, 1, 0, 0],
    &[0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 0, 0, 1, 1, 1, 1],
    &[1, 1, 0, 1, 1, 1, 1, 0, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[0, 1, 1, 0, 1, 1, 0, 1, 1, 0],
    &[0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
];

pub const SPRITE_PROJECTILE: Sprite = &[&[1, 1], &[1, 1]];

// ── Player tuning ─────────────────────────────────────────────────────────────

pub const PLAYER_MAX_HP: i32 = 100;
/// Displacement per held direction per frame.
pub const PLAYER_SPEED: f32 = 5.0;
/// Distance of the start position above the bottom edge.
pub const PLAYER_START_OFFSET_Y: f32 = 100.0;
pub const FIRE_COOLDOWN: Duration = Duration::from_millis(150);
pub const INVULN_ON_HIT: u32 = 60;
/// Grace window granted when a session (re)starts.
pub const INVULN_ON_RESET: u32 = 120;
/// Frames per flicker half-cycle while invulnerable.
pub const FLICKER_PERIOD: u64 = 4;
pub const SHOT_DAMAGE_TO_PLAYER: i32 = 10;
pub const CRASH_DAMAGE: i32 = 20;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PROJECTILE_DAMAGE: i32 = 1;
pub const PLAYER_SHOT_SPEED: f32 = -12.0;
pub const ENEMY_SHOT_SPEED: f32 = 6.0;
/// Projectiles are culled once this far past the top or bottom edge.
pub const PROJECTILE_MARGIN: f32 = 20.0;

// ── Enemies & difficulty ──────────────────────────────────────────────────────

pub const BASE_SPAWN_INTERVAL: u64 = 60;
pub const MIN_SPAWN_INTERVAL: u64 = 20;
pub const DIFFICULTY_PERIOD: u64 = 600;
pub const SPAWN_MARGIN: f32 = 10.0;
pub const ENEMY_FIRE_BASE: f32 = 0.01;
pub const ENEMY_FIRE_PER_LEVEL: f32 = 0.001;
pub const ENEMY_FALL_PER_LEVEL: f32 = 0.1;

// ── Effects ───────────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 100;
pub const THRUSTER_PERIOD: u64 = 3;
pub const THRUSTER_LIFE: u32 = 15;
pub const HIT_SPARK_PARTICLES: usize = 3;
pub const KILL_PARTICLES: usize = 15;
pub const PLAYER_HIT_PARTICLES: usize = 10;
pub const CRASH_PARTICLES: usize = 20;

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const HUD_X: f32 = 20.0;
pub const HUD_HP_Y: f32 = 30.0;
pub const HUD_SCORE_Y: f32 = 55.0;
