//! 2048 of Life: a sliding tile puzzle.
//!
//! The game model lives in [`core`]; moves are queued and drained by a delay
//! timer so consecutive animated moves stay apart. [`console_interface`]
//! draws the game in a terminal.

pub mod appearance;
pub mod config;
pub mod console_interface;
pub mod core;
pub mod error;
pub mod models;
