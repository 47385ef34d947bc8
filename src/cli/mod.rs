mod commands;
mod render;

pub use commands::*;
