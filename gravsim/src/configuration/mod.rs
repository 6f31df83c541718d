pub mod config;
pub mod commands;
