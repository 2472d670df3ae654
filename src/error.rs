//! Errors from the shell around the simulation (terminal, configuration).
//! The simulation itself has no failure paths.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}
