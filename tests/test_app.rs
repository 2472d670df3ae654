mod support;

use std::thread;
use std::time::{Duration, Instant};

use astrobit_defender::app::{App, GameState};
use astrobit_defender::entities::{EnemyKind, Enemy, InputState, Projectile, ProjectileOwner};
use astrobit_defender::mission::{BriefingTiming, MISSION_TEMPLATES};

use rand::rngs::StdRng;
use rand::SeedableRng;

use support::RecordingCanvas;

const DT: Duration = Duration::from_millis(16);

fn instant_timing() -> BriefingTiming {
    BriefingTiming {
        service_latency: Duration::ZERO,
        min_display: Duration::ZERO,
    }
}

fn make_app(timing: BriefingTiming) -> App<StdRng> {
    App::new(StdRng::seed_from_u64(42), timing)
}

/// Poll until the briefing worker has answered.
fn wait_for_mission(app: &mut App<StdRng>) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.mission().is_none() {
        assert!(Instant::now() < deadline, "briefing never arrived");
        app.poll_briefing();
        thread::sleep(Duration::from_millis(1));
    }
}

/// An app already in `Playing`, with the spawn grace window cleared.
fn playing_app() -> App<StdRng> {
    let mut app = make_app(instant_timing());
    app.confirm();
    wait_for_mission(&mut app);
    app.confirm();
    assert_eq!(app.state(), GameState::Playing);
    app.session_mut().world_mut().player.invulnerable = 0;
    app
}

#[test]
fn starts_on_menu() {
    let app = make_app(instant_timing());
    assert_eq!(app.state(), GameState::Menu);
    assert_eq!(app.score(), 0);
    assert!(app.mission().is_none());
    assert!(!app.session().is_running());
}

#[test]
fn menu_to_briefing_to_playing() {
    let mut app = make_app(instant_timing());

    app.confirm();
    assert_eq!(app.state(), GameState::Briefing);

    wait_for_mission(&mut app);
    let mission = app.mission().cloned().expect("mission");
    assert!(MISSION_TEMPLATES.contains(&mission));

    app.confirm();
    assert_eq!(app.state(), GameState::Playing);
    assert!(app.session().is_running());
    assert_eq!(app.session().world().frame, 0);

    app.frame(DT, &InputState::default());
    assert_eq!(app.session().world().frame, 1);
}

#[test]
fn launch_waits_for_the_mission() {
    let mut app = make_app(BriefingTiming {
        service_latency: Duration::ZERO,
        min_display: Duration::from_secs(10),
    });
    app.start_briefing();
    for _ in 0..5 {
        app.poll_briefing();
        thread::sleep(Duration::from_millis(2));
    }
    assert!(app.mission().is_none());

    app.launch();
    assert_eq!(app.state(), GameState::Briefing);
    assert!(!app.session().is_running());
}

#[test]
fn frames_only_run_while_playing() {
    let mut app = make_app(instant_timing());
    app.frame(DT, &InputState::default());
    assert_eq!(app.session().world().frame, 0);
}

#[test]
fn kills_add_to_score() {
    let mut app = playing_app();
    {
        let world = app.session_mut().world_mut();
        let id = world.ids.next_id();
        world.enemies.push(Enemy::new(id, EnemyKind::Scout, 100.0, 100.0));
        let id = world.ids.next_id();
        world
            .projectiles
            .push(Projectile::new(id, ProjectileOwner::Player, 104.0, 112.0));
    }

    app.frame(DT, &InputState::default());

    assert_eq!(app.score(), 100);
    assert_eq!(app.state(), GameState::Playing);
}

#[test]
fn lethal_hit_ends_the_game() {
    let mut app = playing_app();
    {
        let world = app.session_mut().world_mut();
        world.player.hp = 5;
        let (px, py) = (world.player.body.x, world.player.body.y);
        let id = world.ids.next_id();
        world
            .projectiles
            .push(Projectile::new(id, ProjectileOwner::Enemy, px + 10.0, py + 10.0));
    }

    app.frame(DT, &InputState::default());

    assert_eq!(app.state(), GameState::GameOver);
    assert!(!app.session().is_running());
    assert_eq!(app.session().pending_frame(), None);

    // No more frames once stopped.
    let frame = app.session().world().frame;
    app.frame(DT, &InputState::default());
    assert_eq!(app.session().world().frame, frame);

    app.confirm();
    assert_eq!(app.state(), GameState::Menu);
    assert_eq!(app.score(), 0);
}

#[test]
fn relaunch_resets_score_and_world() {
    let mut app = playing_app();
    for _ in 0..30 {
        app.frame(DT, &InputState::default());
    }
    app.return_to_menu();

    app.confirm();
    wait_for_mission(&mut app);
    app.confirm();

    assert_eq!(app.state(), GameState::Playing);
    assert_eq!(app.score(), 0);
    assert_eq!(app.session().world().frame, 0);
    assert_eq!(app.session().world().player.hp, 100);
}

#[test]
fn back_returns_to_menu_from_play() {
    let mut app = playing_app();
    app.frame(DT, &InputState::default());

    app.return_to_menu();

    assert_eq!(app.state(), GameState::Menu);
    assert_eq!(app.score(), 0);
    assert!(!app.session().is_running());
}

#[test]
fn confirm_does_nothing_while_playing() {
    let mut app = playing_app();
    app.confirm();
    assert_eq!(app.state(), GameState::Playing);
    assert!(app.session().is_running());
}

#[test]
fn each_screen_draws_its_overlay() {
    let mut app = make_app(BriefingTiming {
        service_latency: Duration::ZERO,
        min_display: Duration::from_secs(10),
    });

    let mut canvas = RecordingCanvas::default();
    app.render(&mut canvas, 0);
    assert!(canvas.has_text_containing("ASTROBIT DEFENDER"));
    assert!(canvas.has_text_containing("[ENTER] INICIAR MISSÃO"));
    assert!(canvas.has_text_containing("VIDA: 100%"));

    app.confirm();
    let mut canvas = RecordingCanvas::default();
    app.render(&mut canvas, 0);
    assert!(canvas.has_text_containing("DECODIFICANDO TRANSMISSÃO..."));
    assert!(!canvas.has_text_containing("ASTROBIT DEFENDER"));
}

#[test]
fn playing_and_game_over_overlays() {
    let mut app = playing_app();

    let mut canvas = RecordingCanvas::default();
    app.render(&mut canvas, 0);
    assert!(canvas.has_text_containing("PONTOS: 0"));
    assert!(!canvas.has_text_containing("FIM DE JOGO"));
    assert!(!canvas.has_text_containing("[ENTER]"));

    {
        let world = app.session_mut().world_mut();
        world.player.hp = 10;
        let (px, py) = (world.player.body.x, world.player.body.y);
        let id = world.ids.next_id();
        world
            .projectiles
            .push(Projectile::new(id, ProjectileOwner::Enemy, px + 10.0, py + 10.0));
    }
    app.frame(DT, &InputState::default());
    assert_eq!(app.state(), GameState::GameOver);

    let mut canvas = RecordingCanvas::default();
    app.render(&mut canvas, 0);
    assert!(canvas.has_text_containing("FIM DE JOGO"));
    assert!(canvas.has_text_containing("PONTUAÇÃO FINAL: 0"));
    assert!(canvas.has_text_containing("VIDA: 0%"));
}

#[test]
fn same_seed_briefs_same_mission() {
    let mut a = make_app(instant_timing());
    let mut b = make_app(instant_timing());
    a.confirm();
    b.confirm();
    wait_for_mission(&mut a);
    wait_for_mission(&mut b);
    assert_eq!(a.mission(), b.mission());
}
