//! Command implementations

pub mod completions;
pub mod family;
pub mod platforms;
pub mod plugins;
pub mod resolve;
