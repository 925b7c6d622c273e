pub mod handler;
pub mod preview;
pub mod view;
