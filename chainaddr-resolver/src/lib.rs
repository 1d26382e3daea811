//! Command-line resolver and handler factory for chainaddr.
//!
//! Wires the per-family handler crates into ready-to-use resolution chains
//! and loads the name-service settings they need.
//!
//! # Modules
//!
//! - [`config`] - Resolver configuration with environment variable expansion
//! - [`factory`] - [`HandlerFactory`] and [`ChainScope`]

pub mod config;
pub mod factory;

pub use config::{ConfigError, ResolverConfig};
pub use factory::{ChainScope, HandlerFactory};
