//! Shared bridge configuration
//!
//! The bridge publishes one JSON document per environment listing every
//! domain, its bridge contract and its registered resources. Everything that
//! needs to resolve a domain or resource goes through [`Config`].

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{Domain, DomainId, Domainlike, Environment, Resource, ResourceType};

/// Raw shared-config document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawConfig {
    domains: Vec<Domain>,
}

/// Loaded shared config for one environment
#[derive(Debug, Clone)]
pub struct Config {
    environment: Option<Environment>,
    domains: Vec<Domain>,
}

impl Config {
    /// Fetch the shared config published for `environment`.
    pub async fn init(environment: Environment) -> Result<Self, ConfigError> {
        let mut config = Self::init_from_url(environment.config_url()).await?;
        config.environment = Some(environment);
        Ok(config)
    }

    /// Fetch a shared config document from an arbitrary URL.
    pub async fn init_from_url(url: &str) -> Result<Self, ConfigError> {
        let fetch_err = |e: reqwest::Error| ConfigError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };

        let client = reqwest::Client::builder()
            .user_agent("sygma-substrate-toolkit")
            .build()
            .map_err(fetch_err)?;

        let body = client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?
            .text()
            .await
            .map_err(fetch_err)?;

        let config = Self::from_json(&body)?;
        tracing::info!(
            url = %url,
            domains = config.domains.len(),
            "Loaded shared bridge config"
        );
        Ok(config)
    }

    /// Parse a shared config JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self::from_domains(raw.domains))
    }

    /// Build a config from already-parsed domains.
    pub fn from_domains(domains: Vec<Domain>) -> Self {
        Self {
            environment: None,
            domains,
        }
    }

    /// Environment this config was fetched for, if fetched by environment
    pub fn environment(&self) -> Option<Environment> {
        self.environment
    }

    /// All configured domains
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Resolve a domain by ID, chain ID, or name (names compare case-insensitively).
    pub fn find_domain(&self, domain: &Domainlike) -> Result<&Domain, ConfigError> {
        let found = match domain {
            Domainlike::Id(id) => self.domains.iter().find(|d| d.id == *id),
            Domainlike::ChainId(chain_id) => self.domains.iter().find(|d| d.chain_id == *chain_id),
            Domainlike::Name(name) => self
                .domains
                .iter()
                .find(|d| d.name.eq_ignore_ascii_case(name)),
        };

        found.ok_or_else(|| ConfigError::DomainNotFound {
            domain: domain.to_string(),
        })
    }

    /// Look up the domain registered for an EVM/Substrate chain ID.
    pub fn get_domain_by_chain_id(&self, chain_id: u64) -> Result<&Domain, ConfigError> {
        self.find_domain(&Domainlike::ChainId(chain_id))
    }

    /// Look up a domain by its bridge domain ID.
    pub fn get_domain_config(&self, id: DomainId) -> Result<&Domain, ConfigError> {
        self.find_domain(&Domainlike::Id(id))
    }

    /// Find a resource on a domain by resource ID.
    pub fn find_resource<'a>(
        &self,
        domain: &'a Domain,
        resource_id: &str,
    ) -> Result<&'a Resource, ConfigError> {
        domain
            .resources
            .iter()
            .find(|r| r.resource_id.matches(resource_id))
            .ok_or_else(|| ConfigError::ResourceNotFound {
                resource_id: resource_id.to_string(),
                domain: domain.name.clone(),
            })
    }
}

/// First fungible resource registered on a domain.
pub fn fungible_resource(domain: &Domain) -> Result<&Resource, ConfigError> {
    domain
        .resources
        .iter()
        .find(|r| r.resource_type == ResourceType::Fungible)
        .ok_or_else(|| ConfigError::ResourceNotFound {
            resource_id: "fungible".to_string(),
            domain: domain.name.clone(),
        })
}
