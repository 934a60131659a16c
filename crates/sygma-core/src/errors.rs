//! Error types shared across the workspace

use thiserror::Error;

/// Chain query errors raised by a chain client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Chain RPC returned error: {message}")]
    Rpc { message: String },

    #[error("Storage entry not found: {item}")]
    StorageNotFound { item: String },

    #[error("Invalid call arguments: {reason}")]
    InvalidCall { reason: String },
}

/// Shared config loading and lookup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to fetch shared config from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to parse shared config: {0}")]
    Parse(String),

    #[error("Domain {domain} not found")]
    DomainNotFound { domain: String },

    #[error("Resource {resource_id} not found on domain {domain}")]
    ResourceNotFound { resource_id: String, domain: String },
}

/// Address validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address cannot be empty")]
    Empty,

    #[error("Invalid {network} address: {reason}")]
    InvalidFormat { network: String, reason: String },
}

impl ClientError {
    /// Get a machine-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Rpc { .. } => "rpc_error",
            Self::StorageNotFound { .. } => "storage_not_found",
            Self::InvalidCall { .. } => "invalid_call",
        }
    }
}

impl ConfigError {
    /// Get a machine-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "config_fetch_failed",
            Self::Parse(_) => "config_parse_failed",
            Self::DomainNotFound { .. } => "domain_not_found",
            Self::ResourceNotFound { .. } => "resource_not_found",
        }
    }
}
