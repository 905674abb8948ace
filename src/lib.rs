//! # AB Connect Four
//!
//! Connect Four against a computer opponent that picks its moves with a
//! depth-limited alpha-beta minimax search. Ships a terminal UI built with
//! Ratatui and a headless `duel` binary for engine matches.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, moves, immutable positions
//! - [`ai`] — Agent trait, alpha-beta search engine, static heuristic
//! - [`ui`] — Terminal UI: play against the engine
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types
//! - [`logging`] — `tracing` subscriber setup for the binaries

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
