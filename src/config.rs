//! Runtime settings read from the environment (a `.env` file is loaded first
//! by the binary). Gameplay tuning lives in `constants`, not here.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::FPS;
use crate::error::GameError;

pub const ENV_FPS: &str = "ASTROBIT_FPS";
pub const ENV_SEED: &str = "ASTROBIT_SEED";
pub const ENV_LOG_FILE: &str = "ASTROBIT_LOG_FILE";

const MAX_FPS: u32 = 240;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Display refreshes per second; one simulation frame per refresh.
    pub fps: u32,
    /// Fixed RNG seed for a reproducible run.
    pub seed: Option<u64>,
    /// Where tracing output goes. No subscriber is installed without it.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fps: FPS,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, GameError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(fps) = parse_var::<u32>(ENV_FPS, lookup(ENV_FPS))? {
            if fps == 0 || fps > MAX_FPS {
                return Err(GameError::InvalidConfig {
                    key: ENV_FPS,
                    value: fps.to_string(),
                });
            }
            config.fps = fps;
        }
        config.seed = parse_var::<u64>(ENV_SEED, lookup(ENV_SEED))?;
        config.log_file = lookup(ENV_LOG_FILE)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Wall-clock length of one frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

fn parse_var<T: FromStr>(key: &'static str, raw: Option<String>) -> Result<Option<T>, GameError> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            match parsed {
                Ok(v) => Ok(Some(v)),
                Err(_) => Err(GameError::InvalidConfig { key, value }),
            }
        }
    }
}
