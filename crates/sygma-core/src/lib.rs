//! sygma-core: Shared types, errors, and configuration
//!
//! This crate provides the foundational types used across the workspace:
//! bridge domains and resources from the shared config, network families,
//! and per-network address validation.

pub mod address;
pub mod config;
pub mod errors;
pub mod types;

pub use address::{address_to_bytes, is_valid_address_for_network, validate_address};
pub use config::*;
pub use errors::*;
pub use types::*;
