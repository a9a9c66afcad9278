//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem, archives, and external processes.
//! This module is the only place where side effects occur.

pub mod archive;
pub mod filesystem;
pub mod invoker;
