//! Waste Management: two fish flee a shark through scrolling trash.
//!
//! Core modules:
//! - `entities`: pure game data
//! - `camera`, `pool`, `scene`, `collision`, `movement`: simulation pieces
//! - `compositor`: builds the per-tick frame
//! - `compute`: session set-up and the tick driver
//! - `assets`, `records`, `config`: art, persistence and settings

pub mod assets;
pub mod camera;
pub mod collision;
pub mod compositor;
pub mod compute;
pub mod config;
pub mod entities;
pub mod movement;
pub mod pool;
pub mod records;
pub mod scene;
