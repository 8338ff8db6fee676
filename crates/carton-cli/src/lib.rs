//! Carton Segregator command line components.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
pub mod settings;
