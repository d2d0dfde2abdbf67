//! Alien Invasion: a fixed-rules arcade shooter.
//!
//! The library holds the game core (state, transitions, collision and fleet
//! logic) and the collaborator seams; the binary wires it to a terminal.

pub mod button;
pub mod compute;
pub mod entities;
pub mod input;
pub mod keymap;
pub mod render;
pub mod scoreboard;
pub mod settings;
pub mod stats;
pub mod viewport;
