pub mod cli;
pub mod commands;
pub mod gate;
pub mod settings;
