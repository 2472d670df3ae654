mod support;

use astrobit_defender::compute::init_world;
use astrobit_defender::constants::*;
use astrobit_defender::display::terminal::{MIN_COLS, MIN_ROWS};
use astrobit_defender::display::*;
use astrobit_defender::entities::{Enemy, EnemyKind, World};
use astrobit_defender::error::GameError;
use astrobit_defender::mission::MISSION_TEMPLATES;

use rand::rngs::StdRng;
use rand::SeedableRng;

use support::{Op, RecordingCanvas};

fn make_world() -> World {
    let mut world = init_world(&mut StdRng::seed_from_u64(42));
    world.player.invulnerable = 0;
    world
}

fn sprite_cells(sprite: Sprite) -> usize {
    sprite.iter().flat_map(|row| row.iter()).filter(|&&c| c == 1).count()
}

// ── World rendering ───────────────────────────────────────────────────────────

#[test]
fn frame_starts_with_clear_and_ends_with_hud() {
    let world = make_world();
    let mut canvas = RecordingCanvas::default();
    render_world(&mut canvas, &world, 1200);

    assert_eq!(canvas.ops[0], Op::Clear(C_BACKGROUND));
    let n = canvas.ops.len();
    assert_eq!(
        canvas.ops[n - 2],
        Op::Text { text: "VIDA: 100%".into(), x: HUD_X, y: HUD_HP_Y, color: C_TEXT }
    );
    assert_eq!(
        canvas.ops[n - 1],
        Op::Text { text: "PONTOS: 1200".into(), x: HUD_X, y: HUD_SCORE_Y, color: C_TEXT }
    );
}

#[test]
fn one_star_square_per_star() {
    let world = make_world();
    let mut canvas = RecordingCanvas::default();
    render_world(&mut canvas, &world, 0);

    for star in &world.stars {
        let expected = Op::Rect {
            x: star.x,
            y: star.y,
            w: star.size,
            h: star.size,
            color: Rgb::grey(star.brightness),
        };
        assert!(canvas.ops.contains(&expected));
    }
}

#[test]
fn player_drawn_one_square_per_sprite_cell() {
    let world = make_world();
    let mut canvas = RecordingCanvas::default();
    render_world(&mut canvas, &world, 0);
    assert_eq!(canvas.rects_with(C_PLAYER), sprite_cells(SPRITE_PLAYER));
}

#[test]
fn flickering_player_is_skipped() {
    let mut world = make_world();
    world.player.invulnerable = 30;
    world.frame = 4;
    let mut canvas = RecordingCanvas::default();
    render_world(&mut canvas, &world, 0);
    assert_eq!(canvas.rects_with(C_PLAYER), 0);
}

#[test]
fn enemies_drawn_over_player() {
    let mut world = make_world();
    let id = world.ids.next_id();
    world.enemies.push(Enemy::new(id, EnemyKind::Tank, 10.0, 10.0));

    let mut canvas = RecordingCanvas::default();
    render_world(&mut canvas, &world, 0);

    assert_eq!(canvas.rects_with(C_ENEMY_TANK), sprite_cells(SPRITE_TANK));
    let last_player = canvas
        .ops
        .iter()
        .rposition(|op| matches!(op, Op::Rect { color, .. } if *color == C_PLAYER));
    let first_enemy = canvas
        .ops
        .iter()
        .position(|op| matches!(op, Op::Rect { color, .. } if *color == C_ENEMY_TANK));
    assert!(last_player < first_enemy);
}

#[test]
fn hud_clamps_negative_hp() {
    let mut world = make_world();
    world.player.hp = -5;
    assert_eq!(hud_lines(&world.player, 42), ["VIDA: 0%".to_string(), "PONTOS: 42".to_string()]);
}

// ── Overlays ──────────────────────────────────────────────────────────────────

#[test]
fn menu_ready_line_blinks() {
    let mut canvas = RecordingCanvas::default();
    draw_menu(&mut canvas, 0);
    assert!(canvas.has_text_containing(TITLE));
    assert!(canvas.has_text_containing("SISTEMA PRONTO..."));
    assert!(canvas.has_text_containing("[ENTER] INICIAR MISSÃO"));

    let mut canvas = RecordingCanvas::default();
    draw_menu(&mut canvas, 30);
    assert!(!canvas.has_text_containing("SISTEMA PRONTO..."));
}

#[test]
fn briefing_while_decoding() {
    let mut canvas = RecordingCanvas::default();
    draw_briefing(&mut canvas, None, 0);
    assert!(canvas.has_text_containing("DECODIFICANDO TRANSMISSÃO..."));
    assert!(!canvas.has_text_containing("[ENTER]"));
}

#[test]
fn briefing_with_mission() {
    let mission = &MISSION_TEMPLATES[0];
    let mut canvas = RecordingCanvas::default();
    draw_briefing(&mut canvas, Some(mission), 0);

    assert!(canvas.has_text_containing(mission.title));
    assert!(canvas.has_text_containing("CANAL SEGURO // 0X11F"));
    assert!(canvas.has_text_containing("COMANDO: "));
    assert!(canvas.has_text_containing("OBJETIVO: "));
    assert!(canvas.has_text_containing("[ENTER] LANÇAR NAVE"));
    assert!(!canvas.has_text_containing("DECODIFICANDO"));
}

#[test]
fn game_over_shows_final_score() {
    let mut canvas = RecordingCanvas::default();
    draw_game_over(&mut canvas, 4200);
    assert!(canvas.has_text_containing("FIM DE JOGO"));
    assert!(canvas.has_text_containing("PONTUAÇÃO FINAL: 4200"));
    assert!(canvas.has_text_containing("[ENTER] VOLTAR À BASE"));
}

#[test]
fn centered_text_is_centered() {
    let mut canvas = RecordingCanvas::default();
    draw_game_over(&mut canvas, 0);
    let x = canvas.ops.iter().find_map(|op| match op {
        Op::Text { text, x, .. } if text == "FIM DE JOGO" => Some(*x),
        _ => None,
    });
    // 11 chars at 8 units each.
    assert_eq!(x, Some((CANVAS_WIDTH - 88.0) / 2.0));
}

// ── Word wrap ─────────────────────────────────────────────────────────────────

#[test]
fn wrap_breaks_on_words() {
    assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
    assert_eq!(wrap("abcdefgh ij", 4), vec!["abcdefgh", "ij"]);
    assert!(wrap("   ", 10).is_empty());
}

#[test]
fn wrapped_briefings_fit_their_columns() {
    for m in &MISSION_TEMPLATES {
        let lines = wrap(m.description, 40);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 40));
        assert_eq!(lines.join(" "), m.description);
    }
}

// ── Terminal backend ──────────────────────────────────────────────────────────

#[test]
fn terminal_rejects_small_sizes() {
    let err = TerminalCanvas::new(Vec::<u8>::new(), MIN_COLS - 1, MIN_ROWS).err();
    assert!(matches!(err, Some(GameError::TerminalTooSmall { .. })));

    let mut canvas = TerminalCanvas::new(Vec::<u8>::new(), MIN_COLS, MIN_ROWS).expect("fits");
    assert!(canvas.resize(100, MIN_ROWS - 1).is_err());
    assert_eq!(canvas.size(), (MIN_COLS, MIN_ROWS));
}

#[test]
fn terminal_maps_surface_to_cells() {
    // 100x40 cells: each is 8x15 surface units.
    let mut canvas = TerminalCanvas::new(Vec::<u8>::new(), 100, 40).expect("fits");
    canvas.clear(C_BACKGROUND);
    canvas.fill_rect(0.0, 0.0, 16.0, 15.0, C_PLAYER);
    canvas.fill_rect(400.0, 300.0, 1.0, 1.0, C_TEXT);

    assert_eq!(canvas.glyph_at(0, 0), Some('█'));
    assert_eq!(canvas.glyph_at(1, 0), Some('█'));
    assert_eq!(canvas.glyph_at(2, 0), Some(' '));
    assert_eq!(canvas.glyph_at(0, 1), Some(' '));
    assert_eq!(canvas.glyph_at(50, 20), Some('·'));
    assert_eq!(canvas.glyph_at(100, 0), None);
}

#[test]
fn terminal_present_writes_hud() {
    let world = make_world();
    let mut canvas = TerminalCanvas::new(Vec::<u8>::new(), 100, 40).expect("fits");
    render_world(&mut canvas, &world, 300);
    canvas.present().expect("write to vec");

    let out = String::from_utf8_lossy(canvas.get_ref());
    assert!(out.contains("VIDA: 100%"));
    assert!(out.contains("PONTOS: 300"));
}

#[test]
fn shrinking_below_minimum_shows_notice_until_enlarged() {
    let world = make_world();
    let mut canvas = TerminalCanvas::new(Vec::<u8>::new(), 100, 40).expect("fits");
    assert!(!canvas.is_undersized());

    let err = canvas.resize(40, 10).err();
    assert!(matches!(err, Some(GameError::TerminalTooSmall { cols: 40, rows: 10, .. })));
    assert!(canvas.is_undersized());
    assert_eq!(canvas.size(), (100, 40));

    // Drawing still works against the old grid; only the notice is written.
    render_world(&mut canvas, &world, 0);
    canvas.present().expect("write to vec");
    let out = String::from_utf8_lossy(canvas.get_ref()).into_owned();
    assert!(out.contains("TERMINAL PEQUENO DEMAIS: 40x10"));
    assert!(!out.contains("VIDA:"));

    canvas.resize(90, 30).expect("fits again");
    assert!(!canvas.is_undersized());
    assert_eq!(canvas.size(), (90, 30));
    render_world(&mut canvas, &world, 0);
    canvas.present().expect("write to vec");
    let out = String::from_utf8_lossy(canvas.get_ref()).into_owned();
    assert!(out.contains("VIDA: 100%"));
}
