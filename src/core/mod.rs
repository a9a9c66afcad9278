//! Core business logic module
//!
//! This module contains all business logic for pioforge. I/O is limited to
//! the project's own declared inputs and namespaced output paths; external
//! processes belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`manifest`] - Manifest (pioforge.toml) parsing and validation
//! - [`library`] - Library unit declarations and reference resolution
//! - [`bundle`] - Bundle building (one self-contained archive per unit)
//! - [`resolver`] - Dependency graph, cycle detection, transitive sets
//! - [`platformio`] - Configuration file rendering
//! - [`assemble`] - Project tree assembly
//! - [`init`] - Project initialization logic
//! - [`check`] - Configuration validation logic
//! - [`clean`] - Clean generated artifacts logic
//! - [`doctor`] - System dependency checks
//! - [`tree`] - Dependency tree visualization

pub mod assemble;
pub mod bundle;
pub mod check;
pub mod clean;
pub mod doctor;
pub mod init;
pub mod library;
pub mod manifest;
pub mod platformio;
pub mod resolver;
pub mod tree;
