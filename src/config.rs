//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the scanner and logging, and
//! helpers to load them from disk and the environment.

mod load;
mod schema;

pub use schema::*;
