//! Configuration resolution
//!
//! Implements the 3-layer precedence chain:
//! 1. Built-in defaults
//! 2. Environment variables
//! 3. Explicit overrides (CLI flags)

mod defaults;
mod resolve;

pub use defaults::{BuiltinDefaults, DEFAULT_ENDPOINT, DEFAULT_SIGNING_SECRET};
pub use resolve::{ConfigError, ConfigOrigin, FieldProvenance, Overrides, ResolvedConfig};
