pub mod commands;
pub mod context;
pub mod interaction;
pub mod output;
pub mod runner;
mod shell;

pub use shell::run_cli;
