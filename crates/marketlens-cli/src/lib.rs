//! Shared pieces of the `marketlens` and `marketlens-repl` binaries.

pub mod bootstrap;
pub mod commands;
pub mod logging;
pub mod render;
