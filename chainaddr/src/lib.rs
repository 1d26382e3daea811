#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for classifying free text into chain-specific cryptocurrency addresses.
//!
//! A piece of user-supplied text (typed, pasted, scanned or dictated) is handed to a
//! [`ResolutionChain`], which checks an ordered list of [`AddressHandler`]s and returns
//! the first one that accepts the text. Handlers come in two kinds:
//!
//! - **native** handlers decode the text with a blockchain's own encoding rules
//!   (Base58Check, Bech32, CashAddr, EIP-55, ...) and never touch the network;
//! - **domain** handlers treat the text as a human-readable name and resolve it through
//!   an external name service, caching the result per handler instance.
//!
//! Chain-specific handlers live in separate crates (`chainaddr-utxo`, `chainaddr-evm`,
//! `chainaddr-account`, `chainaddr-http`); this crate is blockchain-agnostic.
//!
//! # Modules
//!
//! - [`address`] - The canonical [`Address`] value and UTXO [`ScriptType`]s
//! - [`blockchain`] - Supported [`Blockchain`] identifiers and their address families
//! - [`networks`] - Static per-blockchain metadata (uids, coin codes, registry hints)
//! - [`handler`] - The [`AddressHandler`] contract and the catch-all [`PureHandler`]
//! - [`resolution`] - The prioritized [`ResolutionChain`] dispatcher
//! - [`cache`] - Thread-safe, single-flight [`ResolutionCache`] for domain handlers
//! - [`error`] - Name-resolution error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod address;
pub mod blockchain;
pub mod cache;
pub mod error;
pub mod handler;
pub mod networks;
pub mod resolution;

pub use address::{Address, ScriptType};
pub use blockchain::{AddressFamily, Blockchain};
pub use cache::ResolutionCache;
pub use error::ResolutionError;
pub use handler::{AddressHandler, DEFAULT_RESOLUTION_TIMEOUT, HandlerKind, PureHandler};
pub use resolution::ResolutionChain;
