//! Library components of the `cca-tidy` command.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
