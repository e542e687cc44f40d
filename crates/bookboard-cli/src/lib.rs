//! Booking board CLI library.
//!
//! Command parsing, configuration, seed data and command handlers for the
//! `bookboard` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod seed;
