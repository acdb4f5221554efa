//! Terminal UI
//!
//! Key dispatch, actions and the ratatui application loop.

pub mod actions;
pub mod key_dispatcher;
pub mod tui_app;
