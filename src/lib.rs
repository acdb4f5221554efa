pub mod cli;
pub mod config;
pub mod driver;
pub mod engine;
pub mod headless;
pub mod sequence;
pub mod ui;
pub mod utils;
pub mod widgets;
