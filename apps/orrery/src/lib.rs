//! # Orrery application library
//!
//! CLI structure, command implementations and configuration for the
//! `orrery` binary. Split out as a library so integration tests can
//! drive the commands directly.

pub mod cli;
pub mod config;
