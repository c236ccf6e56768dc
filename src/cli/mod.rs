pub mod commands;
pub mod display;
pub mod loki;

pub use commands::{CliArgs, Commands};
