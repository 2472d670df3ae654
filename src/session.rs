//! Frame scheduling around the simulation core.
//!
//! A `Session` owns the `World` and the RNG and hands out one `FrameTicket` at
//! a time. Running a frame consumes the pending ticket and arms the next one,
//! so a repeated or stale callback cannot advance the world twice. `stop`
//! bumps the generation, which cancels whatever was pending.

use std::time::Duration;

use rand::Rng;
use tracing::{info, trace};

use crate::compute::{advance, init_world, reset};
use crate::entities::{FrameEffects, InputState, World};

/// Permission to run exactly one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
    seq: u64,
}

pub struct Session<R: Rng> {
    world: World,
    rng: R,
    running: bool,
    generation: u64,
    next_seq: u64,
    pending: Option<FrameTicket>,
}

impl<R: Rng> Session<R> {
    pub fn new(mut rng: R) -> Self {
        let world = init_world(&mut rng);
        Session {
            world,
            rng,
            running: false,
            generation: 0,
            next_seq: 0,
            pending: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// A seed for work done off the session thread, drawn from the session
    /// RNG so seeded runs stay reproducible.
    pub fn draw_seed(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Reinitialise the player and clear every per-session collection.
    pub fn reset(&mut self) {
        reset(&mut self.world);
    }

    /// Begin scheduling frames. Returns the first ticket; a no-op returning
    /// the current ticket if already running.
    pub fn start(&mut self) -> Option<FrameTicket> {
        if !self.running {
            self.running = true;
            self.generation += 1;
            info!(generation = self.generation, "session started");
            self.schedule();
        }
        self.pending
    }

    /// Stop scheduling and invalidate any ticket handed out so far.
    pub fn stop(&mut self) {
        if self.running {
            info!(
                generation = self.generation,
                frame = self.world.frame,
                "session stopped"
            );
        }
        self.running = false;
        self.pending = None;
        self.generation += 1;
    }

    /// The ticket the next display refresh should run, if any.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// Run the frame `ticket` grants. Returns `None`, touching nothing, unless
    /// the session is running and `ticket` is the one currently pending.
    pub fn run_frame(
        &mut self,
        ticket: FrameTicket,
        dt: Duration,
        input: &InputState,
    ) -> Option<FrameEffects> {
        if !self.running || self.pending != Some(ticket) {
            trace!(?ticket, "dropping stale frame");
            return None;
        }
        self.pending = None;

        let effects = advance(&mut self.world, dt, input, &mut self.rng);
        self.schedule();
        Some(effects)
    }

    fn schedule(&mut self) {
        self.pending = Some(FrameTicket {
            generation: self.generation,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }
}
