//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that infrastructure adapters must implement:
//! - `CloudConnector`: authenticated access to the target cloud
//!
//! These traits define the contracts that keep the domain independent of
//! specific network clients.

pub mod cloud;

pub use cloud::{ClientError, ClientResult, CloudConnector, UNKNOWN_SERVICE_NAME};
