//! Data types for the Argon2 matrix explorer.

mod cell;
mod config;

pub use cell::*;
pub use config::*;
