//! Side-scrolling platformer core.
//!
//! All simulation state and draw contracts live in this library; the
//! binary only supplies a terminal host (renderer, input, clock, audio).

pub mod assets;
pub mod camera;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod host;
pub mod hud;
pub mod level;
pub mod player;
pub mod timer;
