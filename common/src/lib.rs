//! Tic-tac-toe engine for one human against the computer: board evaluation,
//! minimax move search, and the turn-sequencing state machine.

pub mod config;
pub mod games;
pub mod logger;
