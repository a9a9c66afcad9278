//! Pioforge - library packager and firmware build orchestrator for PlatformIO
//!
//! This library packages C++ library sources into PlatformIO's fixed `lib/`
//! layout, aggregates bundles across a dependency graph and assembles a
//! buildable project tree before driving the external toolchain.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (bundling, resolution, assembly)
//! - [`infra`] - Infrastructure layer (filesystem, archives, processes)
//! - [`config`] - Fixed paths and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
