//! Astrobit Defender: a vertical arcade shooter on a fixed 800x600 surface.
//!
//! `compute` owns the simulation, `session` schedules it one frame at a time,
//! `app` drives the menu / briefing / playing / game-over flow and `display`
//! draws everything through the `Canvas` trait.

pub mod app;
pub mod compute;
pub mod config;
pub mod constants;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod mission;
pub mod session;
