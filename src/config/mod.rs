//! Configuration module
//!
//! Settings loaded from `config.toml` and the key bindings used by the
//! terminal UI.

pub mod config;
pub mod key_bindings;
