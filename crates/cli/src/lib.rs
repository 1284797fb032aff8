//! `orderflow` command-line runner: configuration and wiring.

pub mod config;
pub mod run;
