//! Wiring for the `holdco` binary.

pub mod demo;
pub mod settings;
