//! Application configuration loaded from the environment.

mod config;

pub use config::Config;
