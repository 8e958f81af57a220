//! Provider-facing behavior: endpoint labels and error classification strategies.
//!
//! `strategy` defines [`ProviderStrategy`], an HTTP-client-agnostic hook the flows use to
//! map non-2xx responses into the crate's error taxonomy.

pub mod strategy;

pub use strategy::*;
