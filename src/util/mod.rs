//! Shared utilities

pub mod config;
pub mod symbol;

pub use config::Config;
pub use symbol::Symbol;
