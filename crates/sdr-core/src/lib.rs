pub mod config;
pub mod logging;

pub mod intercept;
pub mod rules;
pub mod settings;
