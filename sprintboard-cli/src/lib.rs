//! Library half of the `sprintboard` binary: argument definitions and the
//! command runners, kept separate from `main` so they can be tested.

pub mod cli;
pub mod run;

pub use cli::{Cli, Commands};
