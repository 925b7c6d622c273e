pub mod config;
pub mod network;
pub mod tui;
pub mod wallet;
pub mod writing;
