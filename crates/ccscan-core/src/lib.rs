//! ccscan Core
//!
//! Core types, errors and configuration shared by the ccscan crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
