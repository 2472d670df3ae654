//! Mission briefing catalog and the background "fetch" that picks one.
//!
//! The fetch runs on its own thread with an artificial service latency and
//! hands the result back over a channel; the caller additionally holds the
//! decoding screen for a minimum display time.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::entities::MissionData;

pub const SERVICE_LATENCY: Duration = Duration::from_millis(500);
pub const MIN_BRIEFING_DISPLAY: Duration = Duration::from_millis(1500);

pub const MISSION_TEMPLATES: [MissionData; 5] = [
    MissionData {
        title: "OPERAÇÃO: VÁCUO SILENCIOSO",
        description: "Sensores detectaram uma frota não autorizada entrando no Setor 7. A inteligência sugere que são a Vanguarda de Xylarth. Intercepte e destrua.",
        target: "Sobreviva o maior tempo possível.",
    },
    MissionData {
        title: "PROTOCOLO: ESCUDO DE FERRO",
        description: "Uma armada pirata está tentando saquear as rotas comerciais de Orion. O comando central ordenou defesa imediata do perímetro.",
        target: "Elimine todas as ameaças hostis.",
    },
    MissionData {
        title: "MISSÃO: TEMPESTADE NEGRA",
        description: "Sinais de socorro foram recebidos da estação de mineração Alpha. Inimigos desconhecidos estão convergindo para a localização.",
        target: "Proteja o setor a qualquer custo.",
    },
    MissionData {
        title: "CÓDIGO: ESTRELA CAÍDA",
        description: "Restos de uma civilização antiga ativaram defesas automáticas agressivas. Sua nave é a única na área capaz de conter o avanço.",
        target: "Destrua as máquinas autônomas.",
    },
    MissionData {
        title: "OPERAÇÃO: LÂMINA DE FOGO",
        description: "A elite imperial Zorgon rompeu o tratado de paz. Eles enviaram batedores e tanques pesados para testar nossas defesas.",
        target: "Mantenha a linha de frente.",
    },
];

/// Used when the briefing worker goes away without answering.
pub const FALLBACK_MISSION: MissionData = MissionData {
    title: "OPERAÇÃO: SINAL PERDIDO",
    description: "A transmissão do comando foi interrompida. Hostis se aproximam do setor.",
    target: "Sobreviva o maior tempo possível.",
};

/// Pick one template uniformly at random.
pub fn pick_mission(rng: &mut impl Rng) -> MissionData {
    MISSION_TEMPLATES[rng.gen_range(0..MISSION_TEMPLATES.len())].clone()
}

// ── Background request ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BriefingTiming {
    /// How long the worker sleeps before answering.
    pub service_latency: Duration,
    /// Earliest point after the request at which `poll` yields a mission.
    pub min_display: Duration,
}

impl Default for BriefingTiming {
    fn default() -> Self {
        BriefingTiming {
            service_latency: SERVICE_LATENCY,
            min_display: MIN_BRIEFING_DISPLAY,
        }
    }
}

/// An in-flight briefing fetch.
pub struct BriefingRequest {
    rx: Receiver<MissionData>,
    started: Instant,
    min_display: Duration,
    received: Option<MissionData>,
}

impl BriefingRequest {
    /// Start the worker. The mission is picked from an RNG seeded with
    /// `seed`, so the same seed always briefs the same mission.
    pub fn spawn(timing: BriefingTiming, seed: u64) -> Self {
        let (tx, rx) = mpsc::channel::<MissionData>();
        let latency = timing.service_latency;
        let spawned = thread::Builder::new()
            .name("briefing".into())
            .spawn(move || {
                thread::sleep(latency);
                let mission = pick_mission(&mut StdRng::seed_from_u64(seed));
                // Receiver is gone if the player quit mid-briefing.
                let _ = tx.send(mission);
            });
        if let Err(e) = spawned {
            // The sender was dropped with the closure; `poll` falls back.
            warn!(error = %e, "could not start briefing worker");
        }

        BriefingRequest {
            rx,
            started: Instant::now(),
            min_display: timing.min_display,
            received: None,
        }
    }

    /// Non-blocking. Yields the mission once it has arrived and the minimum
    /// display time has elapsed.
    pub fn poll(&mut self) -> Option<MissionData> {
        if self.received.is_none() {
            match self.rx.try_recv() {
                Ok(mission) => {
                    info!(title = mission.title, "mission received");
                    self.received = Some(mission);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    warn!("briefing worker disconnected, using fallback mission");
                    self.received = Some(FALLBACK_MISSION);
                }
            }
        }

        if self.started.elapsed() < self.min_display {
            return None;
        }
        self.received.clone()
    }
}
