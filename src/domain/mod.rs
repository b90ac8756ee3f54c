//! Domain layer for osprobe.
//!
//! This module contains the core data model and the port traits that
//! infrastructure adapters implement.

pub mod models;
pub mod ports;
