//! Simulation core.
//!
//! `advance` moves the `World` forward by exactly one frame. Each phase is a
//! public function of its own so it can be driven in isolation. All randomness
//! comes through the injected RNG, so a seeded RNG gives a deterministic run.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::constants::{
    Rgb, BASE_SPAWN_INTERVAL, CANVAS_HEIGHT, CANVAS_WIDTH, CRASH_DAMAGE, CRASH_PARTICLES,
    C_ENEMY_FIGHTER, C_PLAYER, C_UI_ACCENT, DIFFICULTY_PERIOD, ENEMY_FALL_PER_LEVEL,
    ENEMY_FIRE_BASE, ENEMY_FIRE_PER_LEVEL, FIRE_COOLDOWN, FLICKER_PERIOD, HIT_SPARK_PARTICLES,
    INVULN_ON_HIT, INVULN_ON_RESET, KILL_PARTICLES, MIN_SPAWN_INTERVAL, PIXEL_SCALE,
    PLAYER_HIT_PARTICLES, PLAYER_MAX_HP, PLAYER_SPEED, PLAYER_START_OFFSET_Y, PROJECTILE_MARGIN,
    SHOT_DAMAGE_TO_PLAYER, SPAWN_MARGIN, SPRITE_PLAYER, STAR_COUNT, THRUSTER_LIFE,
    THRUSTER_PERIOD,
};
use crate::entities::{
    sprite_height, sprite_width, Body, Enemy, EnemyKind, FrameEffects, FrameEvent, IdAllocator,
    InputState, Particle, Player, Projectile, ProjectileOwner, Star, World,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Top-left corner the player starts every session from.
pub fn player_start() -> (f32, f32) {
    (
        CANVAS_WIDTH / 2.0 - sprite_width(SPRITE_PLAYER) / 2.0,
        CANVAS_HEIGHT - PLAYER_START_OFFSET_Y,
    )
}

/// Build a fresh world: starfield scattered once, everything else as after `reset`.
pub fn init_world(rng: &mut impl Rng) -> World {
    let mut ids = IdAllocator::default();
    let (x, y) = player_start();
    let player = Player {
        id: ids.next_id(),
        body: Body::new(x, y, 0.0, 0.0, C_PLAYER, SPRITE_PLAYER),
        hp: PLAYER_MAX_HP,
        max_hp: PLAYER_MAX_HP,
        invulnerable: 0,
    };

    let stars = (0..STAR_COUNT)
        .map(|_| Star {
            x: rng.gen_range(0.0..CANVAS_WIDTH),
            y: rng.gen_range(0.0..CANVAS_HEIGHT),
            size: if rng.gen::<f32>() > 0.9 { 3.0 } else { 1.0 },
            speed: rng.gen_range(0.5..2.5),
            brightness: rng.gen(),
        })
        .collect();

    let mut world = World {
        player,
        enemies: Vec::new(),
        projectiles: Vec::new(),
        particles: Vec::new(),
        stars,
        frame: 0,
        difficulty: 1,
        clock: Duration::ZERO,
        last_shot: None,
        terminated: false,
        ids,
    };
    reset(&mut world);
    world
}

/// Put the world back to the start of a session. Stars are left where they are.
pub fn reset(world: &mut World) {
    let (x, y) = player_start();
    let player = &mut world.player;
    player.body.x = x;
    player.body.y = y;
    player.body.vx = 0.0;
    player.body.vy = 0.0;
    player.hp = player.max_hp;
    player.invulnerable = INVULN_ON_RESET;

    world.enemies.clear();
    world.projectiles.clear();
    world.particles.clear();
    world.frame = 0;
    world.difficulty = 1;
    world.clock = Duration::ZERO;
    world.last_shot = None;
    world.terminated = false;
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Phases run in a fixed order and later phases see what earlier ones did in
/// the same frame: background, player, thruster, firing, projectiles,
/// spawning, enemies, projectile hits, crashes, particles.
pub fn advance(
    world: &mut World,
    dt: Duration,
    input: &InputState,
    rng: &mut impl Rng,
) -> FrameEffects {
    let mut effects = FrameEffects::default();
    world.frame += 1;
    world.clock += dt;

    advance_stars(&mut world.stars);
    update_player(&mut world.player, input);
    emit_thruster(world, rng);
    fire_control(world, input);
    advance_projectiles(&mut world.projectiles);
    schedule_spawns(world, rng, &mut effects);
    advance_enemies(world, rng, &mut effects);
    resolve_projectile_hits(world, rng, &mut effects);
    resolve_crashes(world, rng, &mut effects);
    advance_particles(&mut world.particles);

    effects
}

// ── 1. Background ────────────────────────────────────────────────────────────

pub fn advance_stars(stars: &mut [Star]) {
    for star in stars.iter_mut() {
        star.y = (star.y + star.speed).rem_euclid(CANVAS_HEIGHT);
    }
}

// ── 2-5. Player ──────────────────────────────────────────────────────────────

/// Apply held directions (diagonals are not normalised), clamp to the surface
/// and tick the invulnerability window down.
pub fn update_player(player: &mut Player, input: &InputState) {
    let body = &mut player.body;
    if input.left {
        body.x -= PLAYER_SPEED;
    }
    if input.right {
        body.x += PLAYER_SPEED;
    }
    if input.up {
        body.y -= PLAYER_SPEED;
    }
    if input.down {
        body.y += PLAYER_SPEED;
    }
    body.x = body.x.clamp(0.0, CANVAS_WIDTH - body.width());
    body.y = body.y.clamp(0.0, CANVAS_HEIGHT - body.height());

    player.invulnerable = player.invulnerable.saturating_sub(1);
}

/// One exhaust particle at the ship's tail every `THRUSTER_PERIOD` frames.
pub fn emit_thruster(world: &mut World, rng: &mut impl Rng) {
    if world.frame % THRUSTER_PERIOD != 0 {
        return;
    }
    let body = &world.player.body;
    let particle = Particle {
        id: world.ids.next_id(),
        x: body.x + body.width() / 2.0 + spread(rng, 3.0),
        y: body.y + body.height() - 4.0,
        vx: spread(rng, 0.5),
        vy: rng.gen_range(2.0..4.0),
        life: THRUSTER_LIFE,
        color: C_PLAYER,
        size: rng.gen_range(2.0..5.0),
    };
    world.particles.push(particle);
}

/// Fire one player shot if the trigger is held and the cooldown has passed.
pub fn fire_control(world: &mut World, input: &InputState) {
    if !input.fire {
        return;
    }
    let clock = world.clock;
    let ready = world
        .last_shot
        .map_or(true, |last| clock.saturating_sub(last) >= FIRE_COOLDOWN);
    if !ready {
        return;
    }

    let body = &world.player.body;
    let x = body.x + body.width() / 2.0 - PIXEL_SCALE;
    let y = body.y;
    let shot = Projectile::new(world.ids.next_id(), ProjectileOwner::Player, x, y);
    world.projectiles.push(shot);
    world.last_shot = Some(clock);
}

/// Whether the player sprite is drawn this frame (flickers while invulnerable).
pub fn player_visible(world: &World) -> bool {
    !world.player.is_invulnerable() || (world.frame / FLICKER_PERIOD) % 2 == 0
}

// ── 6. Projectiles ───────────────────────────────────────────────────────────

pub fn advance_projectiles(projectiles: &mut Vec<Projectile>) {
    projectiles.retain_mut(|shot| {
        shot.body.step();
        shot.body.y >= -PROJECTILE_MARGIN && shot.body.y <= CANVAS_HEIGHT + PROJECTILE_MARGIN
    });
}

// ── 7. Spawning & difficulty ─────────────────────────────────────────────────

/// Frames between two enemy spawns at `difficulty`.
pub fn spawn_interval(difficulty: u32) -> u64 {
    BASE_SPAWN_INTERVAL
        .saturating_sub(2 * u64::from(difficulty))
        .max(MIN_SPAWN_INTERVAL)
}

/// Map one uniform draw in [0, 1) to an enemy kind.
///
/// A tank-band draw below the tank difficulty gate yields a scout, never a
/// fighter.
pub fn choose_enemy_kind(draw: f32, difficulty: u32) -> EnemyKind {
    if draw > 0.9 {
        if difficulty > 5 {
            EnemyKind::Tank
        } else {
            EnemyKind::Scout
        }
    } else if draw > 0.7 && difficulty > 2 {
        EnemyKind::Fighter
    } else {
        EnemyKind::Scout
    }
}

pub fn schedule_spawns(world: &mut World, rng: &mut impl Rng, effects: &mut FrameEffects) {
    if world.frame % spawn_interval(world.difficulty) == 0 {
        let kind = spawn_enemy(world, rng);
        effects.events.push(FrameEvent::EnemySpawned { kind });
    }
    if world.frame % DIFFICULTY_PERIOD == 0 {
        world.difficulty += 1;
        debug!(difficulty = world.difficulty, frame = world.frame, "difficulty raised");
        effects.events.push(FrameEvent::DifficultyRaised {
            difficulty: world.difficulty,
        });
    }
}

/// Drop one enemy just above the top edge and return its kind.
pub fn spawn_enemy(world: &mut World, rng: &mut impl Rng) -> EnemyKind {
    let kind = choose_enemy_kind(rng.gen(), world.difficulty);
    let sprite = kind.sprite();
    let x = rng.gen_range(0.0..CANVAS_WIDTH - sprite_width(sprite));
    let y = -sprite_height(sprite) - SPAWN_MARGIN;

    let mut enemy = Enemy::new(world.ids.next_id(), kind, x, y);
    enemy.body.vx = spread(rng, 1.0);
    enemy.body.vy =
        rng.gen_range(1.0_f32..3.0) + world.difficulty as f32 * ENEMY_FALL_PER_LEVEL;
    world.enemies.push(enemy);
    kind
}

// ── 8. Enemies ───────────────────────────────────────────────────────────────

/// Move every enemy, let each one roll for a shot, and drop the ones that
/// fell past the bottom edge.
pub fn advance_enemies(world: &mut World, rng: &mut impl Rng, effects: &mut FrameEffects) {
    let fire_chance = ENEMY_FIRE_BASE + world.difficulty as f32 * ENEMY_FIRE_PER_LEVEL;
    let World {
        enemies,
        projectiles,
        ids,
        ..
    } = world;

    enemies.retain_mut(|enemy| {
        enemy.body.step();

        if rng.gen::<f32>() < fire_chance {
            let x = enemy.body.x + enemy.body.width() / 2.0 - PIXEL_SCALE;
            let y = enemy.body.y + enemy.body.height();
            projectiles.push(Projectile::new(ids.next_id(), ProjectileOwner::Enemy, x, y));
        }

        if enemy.body.y > CANVAS_HEIGHT {
            debug!(kind = ?enemy.kind, "enemy escaped");
            effects.events.push(FrameEvent::EnemyEscaped { kind: enemy.kind });
            return false;
        }
        true
    });
}

// ── 9-10. Collisions ─────────────────────────────────────────────────────────

/// Player shots hurt the newest overlapping enemy, enemy shots hurt the
/// player. A shot never touches entities on its own side.
pub fn resolve_projectile_hits(
    world: &mut World,
    rng: &mut impl Rng,
    effects: &mut FrameEffects,
) {
    let World {
        player,
        enemies,
        projectiles,
        particles,
        ids,
        terminated,
        ..
    } = world;

    projectiles.retain(|shot| match shot.owner {
        ProjectileOwner::Player => {
            let Some(index) = enemies.iter().rposition(|e| shot.body.overlaps(&e.body)) else {
                return true;
            };
            let enemy = &mut enemies[index];
            enemy.hp -= shot.damage;
            explode(
                particles,
                ids,
                rng,
                (shot.body.x, shot.body.y),
                C_UI_ACCENT,
                HIT_SPARK_PARTICLES,
            );

            if enemy.hp <= 0 {
                let enemy = enemies.remove(index);
                let score = enemy.score_value();
                explode(
                    particles,
                    ids,
                    rng,
                    enemy.body.center(),
                    enemy.body.color,
                    KILL_PARTICLES,
                );
                effects.score_delta += score;
                debug!(kind = ?enemy.kind, score, "enemy destroyed");
                effects.events.push(FrameEvent::EnemyDestroyed {
                    kind: enemy.kind,
                    score,
                });
            }
            false
        }
        ProjectileOwner::Enemy => {
            if player.is_invulnerable() || !shot.body.overlaps(&player.body) {
                return true;
            }
            hurt_player(player, Harm::Shot, terminated, effects);
            explode(
                particles,
                ids,
                rng,
                player.body.center(),
                C_PLAYER,
                PLAYER_HIT_PARTICLES,
            );
            false
        }
    });
}

/// Ramming: the newest enemy touching a vulnerable player is destroyed
/// outright and costs the player `CRASH_DAMAGE`. No score is awarded. The
/// hit makes the player invulnerable, so at most one crash lands per frame.
pub fn resolve_crashes(world: &mut World, rng: &mut impl Rng, effects: &mut FrameEffects) {
    let World {
        player,
        enemies,
        particles,
        ids,
        terminated,
        ..
    } = world;

    if player.is_invulnerable() {
        return;
    }
    let Some(index) = enemies.iter().rposition(|e| player.body.overlaps(&e.body)) else {
        return;
    };
    let enemy = enemies.remove(index);
    hurt_player(player, Harm::Crash(enemy.kind), terminated, effects);
    explode(
        particles,
        ids,
        rng,
        enemy.body.center(),
        C_ENEMY_FIGHTER,
        CRASH_PARTICLES,
    );
}

enum Harm {
    Shot,
    Crash(EnemyKind),
}

fn hurt_player(player: &mut Player, harm: Harm, terminated: &mut bool, effects: &mut FrameEffects) {
    let damage = match harm {
        Harm::Shot => SHOT_DAMAGE_TO_PLAYER,
        Harm::Crash(_) => CRASH_DAMAGE,
    };
    player.hp -= damage;
    player.invulnerable = INVULN_ON_HIT;
    let hp = player.hp;
    debug!(damage, hp, "player damaged");

    effects.events.push(match harm {
        Harm::Shot => FrameEvent::PlayerHit { damage, hp },
        Harm::Crash(kind) => FrameEvent::PlayerCrashed { kind, hp },
    });

    if hp <= 0 && !*terminated {
        *terminated = true;
        effects.game_over = true;
        effects.events.push(FrameEvent::PlayerDestroyed);
        info!(hp, "player destroyed");
    }
}

// ── 11. Particles ────────────────────────────────────────────────────────────

pub fn advance_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.x += p.vx;
        p.y += p.vy;
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });
}

/// Burst of `count` particles flying out from `origin`.
pub fn explode(
    particles: &mut Vec<Particle>,
    ids: &mut IdAllocator,
    rng: &mut impl Rng,
    origin: (f32, f32),
    color: Rgb,
    count: usize,
) {
    let (x, y) = origin;
    particles.reserve(count);
    for _ in 0..count {
        particles.push(Particle {
            id: ids.next_id(),
            x,
            y,
            vx: spread(rng, 5.0),
            vy: spread(rng, 5.0),
            life: rng.gen_range(30..50),
            color,
            size: rng.gen_range(2.0..6.0),
        });
    }
}

/// Uniform draw in [-half, half).
fn spread(rng: &mut impl Rng, half: f32) -> f32 {
    rng.gen_range(-half..half)
}
