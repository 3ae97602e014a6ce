pub mod cli;
pub mod commands;
pub mod format;
pub mod input;
pub mod logging;
