//! # quire-cli
//!
//! The `quire` command-line tool. The binary in `main.rs` parses arguments
//! and prints; everything it calls lives here so it can be tested.
//!
//! - [`cli`]: clap argument definitions
//! - [`config`]: `QuireConfig` and its TOML sections
//! - [`config_handlers`]: `quire config path|get|set|init|export`
//! - [`commands`]: build, list, tags, search, toc, and profile commands

#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use config::QuireConfig;
