//! Rendering layer.
//!
//! Everything is drawn through the `Canvas` trait in surface units (800x600).
//! No game logic is performed here; this module only translates state into
//! rectangles and text. `terminal` holds the crossterm backend.

pub mod terminal;

pub use terminal::TerminalCanvas;

use crate::compute::player_visible;
use crate::constants::{
    Rgb, CANVAS_HEIGHT, CANVAS_WIDTH, C_BACKGROUND, C_ENEMY_SCOUT, C_PLAYER, C_TEXT,
    C_UI_ACCENT, C_UI_ALERT, C_UI_DIM, HUD_HP_Y, HUD_SCORE_Y, HUD_X, PIXEL_SCALE,
};
use crate::entities::{Body, MissionData, Player, World};

/// A drawing surface addressed in surface units.
pub trait Canvas {
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    /// Draw `text` with its first character at (`x`, `y`).
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb);
    /// Horizontal advance of one character, in surface units.
    fn char_width(&self) -> f32;
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Render one complete frame of the simulation plus the HUD.
pub fn render_world<C: Canvas>(canvas: &mut C, world: &World, score: u32) {
    canvas.clear(C_BACKGROUND);

    for star in &world.stars {
        canvas.fill_rect(star.x, star.y, star.size, star.size, Rgb::grey(star.brightness));
    }
    if player_visible(world) {
        draw_sprite(canvas, &world.player.body);
    }
    for shot in &world.projectiles {
        draw_sprite(canvas, &shot.body);
    }
    for enemy in &world.enemies {
        draw_sprite(canvas, &enemy.body);
    }
    for p in &world.particles {
        canvas.fill_rect(p.x, p.y, p.size, p.size, p.color);
    }

    draw_hud(canvas, &world.player, score);
}

/// One `PIXEL_SCALE` square per set cell of the sprite grid.
pub fn draw_sprite<C: Canvas>(canvas: &mut C, body: &Body) {
    for (row, cells) in body.sprite().iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == 1 {
                canvas.fill_rect(
                    body.x + col as f32 * PIXEL_SCALE,
                    body.y + row as f32 * PIXEL_SCALE,
                    PIXEL_SCALE,
                    PIXEL_SCALE,
                    body.color,
                );
            }
        }
    }
}

pub fn hud_lines(player: &Player, score: u32) -> [String; 2] {
    [
        format!("VIDA: {}%", player.display_hp()),
        format!("PONTOS: {}", score),
    ]
}

fn draw_hud<C: Canvas>(canvas: &mut C, player: &Player, score: u32) {
    let [hp, points] = hud_lines(player, score);
    canvas.fill_text(&hp, HUD_X, HUD_HP_Y, C_TEXT);
    canvas.fill_text(&points, HUD_X, HUD_SCORE_Y, C_TEXT);
}

// ── Overlays ──────────────────────────────────────────────────────────────────

pub const TITLE: &str = "ASTROBIT DEFENDER";

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const WRAP_COLUMNS: usize = 56;

pub fn draw_menu<C: Canvas>(canvas: &mut C, ui_frame: u64) {
    draw_panel(canvas);
    text_centered(canvas, TITLE, 150.0, C_UI_ACCENT);
    // Blinking "ready" line.
    if (ui_frame / 30) % 2 == 0 {
        text_centered(canvas, "SISTEMA PRONTO...", 230.0, C_PLAYER);
    }
    text_centered(canvas, "[ENTER] INICIAR MISSÃO", 300.0, C_TEXT);
    text_centered(canvas, "Use SETAS ou WASD para Mover", 400.0, C_UI_DIM);
    text_centered(canvas, "ESPAÇO para Atirar  -  Q para Sair", 430.0, C_UI_DIM);
}

/// Decoding spinner while `mission` is `None`, the briefing text once it arrived.
pub fn draw_briefing<C: Canvas>(canvas: &mut C, mission: Option<&MissionData>, ui_frame: u64) {
    draw_panel(canvas);
    let Some(mission) = mission else {
        let spin = SPINNER[((ui_frame / 8) % SPINNER.len() as u64) as usize];
        text_centered(canvas, spin, 260.0, C_UI_ACCENT);
        text_centered(canvas, "DECODIFICANDO TRANSMISSÃO...", 300.0, C_UI_ACCENT);
        return;
    };

    let left = 80.0;
    canvas.fill_text(mission.title, left, 110.0, C_TEXT);
    canvas.fill_text("CANAL SEGURO // 0X11F", left, 140.0, C_UI_DIM);

    let mut y = 200.0;
    for line in wrap(&format!("COMANDO: {}", mission.description), WRAP_COLUMNS) {
        canvas.fill_text(&line, left, y, C_UI_ACCENT);
        y += 20.0;
    }
    y += 20.0;
    for line in wrap(&format!("OBJETIVO: {}", mission.target), WRAP_COLUMNS) {
        canvas.fill_text(&line, left, y, C_UI_ALERT);
        y += 20.0;
    }

    text_centered(canvas, "[ENTER] LANÇAR NAVE", 480.0, C_UI_ACCENT);
}

pub fn draw_game_over<C: Canvas>(canvas: &mut C, score: u32) {
    draw_panel(canvas);
    text_centered(canvas, "FIM DE JOGO", 220.0, C_ENEMY_SCOUT);
    text_centered(canvas, &format!("PONTUAÇÃO FINAL: {}", score), 290.0, C_TEXT);
    text_centered(canvas, "[ENTER] VOLTAR À BASE", 360.0, C_UI_DIM);
}

/// Greedy word wrap to at most `columns` characters per line.
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn text_centered<C: Canvas>(canvas: &mut C, text: &str, y: f32, color: Rgb) {
    let width = text.chars().count() as f32 * canvas.char_width();
    canvas.fill_text(text, ((CANVAS_WIDTH - width) / 2.0).max(0.0), y, color);
}

fn draw_panel<C: Canvas>(canvas: &mut C) {
    canvas.fill_rect(40.0, 60.0, CANVAS_WIDTH - 80.0, CANVAS_HEIGHT - 120.0, C_BACKGROUND);
}
