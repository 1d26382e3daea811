#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Universal domain registry support for the chainaddr resolver.
//!
//! A universal registry maps one human-readable domain (e.g., `brad.crypto`)
//! to addresses on many chains, keyed by coin code and, for multi-chain
//! tokens, by chain. [`UdnHandler`] resolves such domains for one blockchain
//! through any [`UdnClient`]; [`HttpUdnClient`] is the REST implementation.
//!
//! # Modules
//!
//! - [`constants`] - Default endpoint, API paths and record keys
//! - [`client`] - The [`UdnClient`] seam and its HTTP implementation
//! - [`handler`] - The multi-strategy domain handler
//!
//! # Feature Flags
//!
//! - `telemetry` - Logs resolution strategies and failures through `tracing`

pub mod client;
pub mod constants;
pub mod handler;

pub use client::{HttpUdnClient, UdnClient, UdnClientError};
pub use handler::UdnHandler;
