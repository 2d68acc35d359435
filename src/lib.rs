//! Sõnamäng - a tile-placement word game on a premium-square grid.
//!
//! The [`game`] module is the rule engine: board, supply, word extraction,
//! placement validation, scoring and the turn controller. [`app`] and
//! [`tui`] put a terminal front end on top of it.

pub mod app;
pub mod cli;
pub mod config;
pub mod game;
pub mod tui;
