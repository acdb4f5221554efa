//! UI widgets for the TUI application
//!
//! The bar chart presenter plus the help overlay and log panel.

pub mod bar_chart_widget;
pub mod help_widget;
pub mod log_widget;
