//! CLI command implementations.

pub mod history;
pub mod ingest;
pub mod login;
pub mod register;
pub mod score;
pub mod seed;
pub mod train;
