//! Core type definitions for Sygma bridge transfers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bridge domain ID (the bridge's own numbering, not the chain ID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(pub u32);

impl DomainId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource ID (32 bytes, 0x-prefixed hex), shared by a resource across domains
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison, ignoring the `0x` prefix
    pub fn matches(&self, other: &str) -> bool {
        strip_hex_prefix(&self.0).eq_ignore_ascii_case(strip_hex_prefix(other))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// XCM multi-asset location identifying a resource on a Substrate chain.
///
/// Kept as raw JSON; it is only ever passed through to the chain.
pub type XcmMultiAssetId = serde_json::Value;

/// Token amount in the smallest denomination
pub type Balance = u128;

/// Network family of a domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Evm,
    Substrate,
    Bitcoin,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Evm => "evm",
            Self::Substrate => "substrate",
            Self::Bitcoin => "bitcoin",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of bridgeable resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "fungible")]
    Fungible,
    #[serde(rename = "nonfungible")]
    NonFungible,
    #[serde(rename = "semifungible")]
    SemiFungible,
    #[serde(rename = "permissionedGeneric")]
    PermissionedGeneric,
    #[serde(rename = "permissionlessGeneric")]
    PermissionlessGeneric,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fungible => "fungible",
            Self::NonFungible => "nonfungible",
            Self::SemiFungible => "semifungible",
            Self::PermissionedGeneric => "permissionedGeneric",
            Self::PermissionlessGeneric => "permissionlessGeneric",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bridge deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Devnet,
    Testnet,
    Mainnet,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }

    /// Parse an environment name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "devnet" => Some(Self::Devnet),
            "testnet" => Some(Self::Testnet),
            "mainnet" => Some(Self::Mainnet),
            _ => None,
        }
    }

    /// Read the environment from `SYGMA_ENV`, defaulting to mainnet.
    pub fn from_env() -> Self {
        match std::env::var(constants::ENVIRONMENT_VAR) {
            Ok(value) => Self::parse(&value).unwrap_or_else(|| {
                tracing::warn!(
                    value = %value,
                    "Unknown {}, falling back to mainnet",
                    constants::ENVIRONMENT_VAR
                );
                Self::Mainnet
            }),
            Err(_) => Self::Mainnet,
        }
    }

    /// Published shared-config URL for this environment
    pub fn config_url(&self) -> &'static str {
        match self {
            Self::Devnet => constants::DEVNET_CONFIG_URL,
            Self::Testnet => constants::TESTNET_CONFIG_URL,
            Self::Mainnet => constants::MAINNET_CONFIG_URL,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::Mainnet
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handler contract registered on an EVM domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handler {
    #[serde(rename = "type")]
    pub handler_type: String,
    pub address: String,
}

/// A bridgeable resource as registered on one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub resource_id: ResourceId,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Token contract address (EVM resources)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    /// Native currency of the chain (Substrate resources)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xcm_multi_asset_id: Option<XcmMultiAssetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caip19: Option<String>,
}

impl Resource {
    pub fn is_fungible(&self) -> bool {
        self.resource_type == ResourceType::Fungible
    }
}

/// A bridge domain from the shared config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: DomainId,
    pub chain_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caip_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub network: Network,
    /// Bridge contract address (EVM) or empty (Substrate pallet)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_token_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_token_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_token_decimals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_confirmations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parachain_id: Option<u32>,
    #[serde(default)]
    pub handlers: Vec<Handler>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Anything that identifies a domain: its bridge ID, chain ID, or name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domainlike {
    Id(DomainId),
    ChainId(u64),
    Name(String),
}

impl From<DomainId> for Domainlike {
    fn from(id: DomainId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for Domainlike {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Domainlike {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for Domainlike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "domain {}", id),
            Self::ChainId(chain_id) => write!(f, "chain {}", chain_id),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A resource given either by ID (looked up on the source domain) or in full
#[derive(Debug, Clone, PartialEq)]
pub enum Resourcelike {
    Id(ResourceId),
    Resource(Box<Resource>),
}

impl From<ResourceId> for Resourcelike {
    fn from(id: ResourceId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for Resourcelike {
    fn from(id: &str) -> Self {
        Self::Id(ResourceId::new(id))
    }
}

impl From<Resource> for Resourcelike {
    fn from(resource: Resource) -> Self {
        Self::Resource(Box::new(resource))
    }
}

/// Constants
pub mod constants {
    /// Environment variable selecting the bridge environment
    pub const ENVIRONMENT_VAR: &str = "SYGMA_ENV";

    pub const DEVNET_CONFIG_URL: &str =
        "https://chainbridge-assets-stage.s3.us-east-2.amazonaws.com/shared-config-dev.json";

    pub const TESTNET_CONFIG_URL: &str =
        "https://chainbridge-assets-stage.s3.us-east-2.amazonaws.com/shared-config-test.json";

    pub const MAINNET_CONFIG_URL: &str =
        "https://sygma-assets-mainnet.s3.us-east-2.amazonaws.com/shared-config-mainnet.json";

    /// Generic SS58 address prefix (Substrate dev chains)
    pub const SS58_GENERIC_PREFIX: u16 = 42;
}
