use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use astrobit_defender::app::{App, GameState};
use astrobit_defender::config::Config;
use astrobit_defender::display::TerminalCanvas;
use astrobit_defender::input::{Command, KeyTracker};
use astrobit_defender::mission::BriefingTiming;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode while playing, so logs only go to a file.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .init();

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        default_hook(info);
    }));
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate loop: drain input, advance at most one simulation frame, draw,
/// then sleep off the rest of the frame budget.
fn run<W: Write>(
    out: W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    keyboard_enhanced: bool,
) -> anyhow::Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut app = App::new(rng, BriefingTiming::default());

    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(out, cols, rows)?;
    let mut keys = KeyTracker::for_fps(config.fps);
    if keyboard_enhanced {
        keys.use_release_events();
    }
    let frame_budget = config.frame_interval();
    let mut ui_frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        ui_frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => match keys.handle(key, ui_frame) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Confirm) => app.confirm(),
                    Some(Command::Back) => {
                        app.return_to_menu();
                        keys.clear();
                    }
                    None => {}
                },
                Event::Resize(cols, rows) => {
                    if let Err(e) = canvas.resize(cols, rows) {
                        tracing::warn!(error = %e, "terminal too small, pausing");
                    }
                }
                _ => {}
            }
        }

        app.poll_briefing();

        let now = Instant::now();
        let dt = now - last;
        last = now;
        // The simulation holds still while the terminal is too small to show it.
        if app.state() == GameState::Playing && !canvas.is_undersized() {
            let input = keys.snapshot(ui_frame);
            app.frame(dt, &input);
        }

        app.render(&mut canvas, ui_frame);
        canvas.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    init_tracing(&config)?;
    tracing::info!(fps = config.fps, seed = ?config.seed, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events where the terminal supports them; others fall back
    // to the hold window in `KeyTracker`. Queried before the reader thread
    // starts, since the query itself reads from stdin.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    tracing::info!(keyboard_enhanced, "input mode");

    // Dedicated thread for blocking event reads so the loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting with error");
    }
    tracing::info!("bye");
    result
}
