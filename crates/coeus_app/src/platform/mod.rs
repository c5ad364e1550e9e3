pub mod app;
pub mod cli;
pub mod effects;
pub mod logging;
pub mod media;
pub mod persistence;
pub mod render;
