//! Screen-state controller: menu → briefing → playing → game over → menu.
//!
//! Owns the score and the current mission, starts and stops the session, and
//! picks which overlay goes on top of the world.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::display::{draw_briefing, draw_game_over, draw_menu, render_world, Canvas};
use crate::entities::{FrameEvent, InputState, MissionData};
use crate::mission::{BriefingRequest, BriefingTiming};
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Briefing,
    Playing,
    GameOver,
}

pub struct App<R: Rng> {
    state: GameState,
    score: u32,
    mission: Option<MissionData>,
    briefing: Option<BriefingRequest>,
    timing: BriefingTiming,
    session: Session<R>,
}

impl<R: Rng> App<R> {
    pub fn new(rng: R, timing: BriefingTiming) -> Self {
        App {
            state: GameState::Menu,
            score: 0,
            mission: None,
            briefing: None,
            timing,
            session: Session::new(rng),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn mission(&self) -> Option<&MissionData> {
        self.mission.as_ref()
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<R> {
        &mut self.session
    }

    /// Menu → Briefing: kick off the mission fetch.
    pub fn start_briefing(&mut self) {
        if self.state != GameState::Menu {
            return;
        }
        self.state = GameState::Briefing;
        self.mission = None;
        let seed = self.session.draw_seed();
        self.briefing = Some(BriefingRequest::spawn(self.timing, seed));
    }

    /// Pick up the fetched mission once it is ready to be shown.
    pub fn poll_briefing(&mut self) {
        let Some(request) = self.briefing.as_mut() else {
            return;
        };
        if let Some(mission) = request.poll() {
            info!(title = mission.title, "briefing ready");
            self.mission = Some(mission);
            self.briefing = None;
        }
    }

    /// Briefing → Playing. Ignored until the mission has been decoded.
    pub fn launch(&mut self) {
        if self.state != GameState::Briefing || self.mission.is_none() {
            return;
        }
        self.state = GameState::Playing;
        self.score = 0;
        self.session.reset();
        self.session.start();
    }

    /// Back to the menu from any screen; stops the simulation.
    pub fn return_to_menu(&mut self) {
        self.session.stop();
        self.state = GameState::Menu;
        self.score = 0;
        self.briefing = None;
    }

    /// Enter key: advance whichever screen is showing.
    pub fn confirm(&mut self) {
        match self.state {
            GameState::Menu => self.start_briefing(),
            GameState::Briefing => self.launch(),
            GameState::Playing => {}
            GameState::GameOver => self.return_to_menu(),
        }
    }

    /// One display refresh while playing: run the pending frame, bank the
    /// score and switch to game over on the terminal signal.
    pub fn frame(&mut self, dt: Duration, input: &InputState) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(ticket) = self.session.pending_frame() else {
            return;
        };
        let Some(effects) = self.session.run_frame(ticket, dt, input) else {
            return;
        };

        self.score += effects.score_delta;
        for event in &effects.events {
            log_event(event);
        }
        if effects.game_over {
            info!(score = self.score, frame = self.session.world().frame, "game over");
            self.session.stop();
            self.state = GameState::GameOver;
        }
    }

    /// Draw the world with the overlay for the current screen on top.
    pub fn render<C: Canvas>(&self, canvas: &mut C, ui_frame: u64) {
        render_world(canvas, self.session.world(), self.score);
        match self.state {
            GameState::Menu => draw_menu(canvas, ui_frame),
            GameState::Briefing => draw_briefing(canvas, self.mission.as_ref(), ui_frame),
            GameState::Playing => {}
            GameState::GameOver => draw_game_over(canvas, self.score),
        }
    }
}

fn log_event(event: &FrameEvent) {
    match event {
        FrameEvent::EnemySpawned { kind } => debug!(?kind, "enemy spawned"),
        FrameEvent::DifficultyRaised { difficulty } => info!(difficulty, "difficulty raised"),
        // Logged where they happen.
        FrameEvent::EnemyDestroyed { .. }
        | FrameEvent::EnemyEscaped { .. }
        | FrameEvent::PlayerHit { .. }
        | FrameEvent::PlayerCrashed { .. }
        | FrameEvent::PlayerDestroyed => {}
    }
}
