pub mod app;
pub mod constants;
pub mod libs;
pub mod swap;
