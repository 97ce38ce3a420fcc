//! Space Fighter: a pointer-driven arcade shooter.
//!
//! The library holds the whole simulation: pure entity data, the per-frame
//! `tick`, collision resolution, spawning, asset handles and the draw
//! sequence.  The binary is a thin crossterm host around it.

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod logger;
pub mod motion;
pub mod render;
pub mod spawn;
