//! Network registry
//!
//! Maps a network name to the owned, immutable parameters of that network.
//! The registry is built once at startup and handed to every consumer by
//! reference; nothing in the workspace keeps a global pointer to the
//! selected network.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::params::ConsensusParams;
use crate::errors::ConfigError;
use crate::network::NetworkType;
use crate::Hash;

/// Network settings that are not consensus rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseParams {
    pub rpc_port: u16,
    /// Sub-directory of the data directory used by the network
    pub data_dir: String,
}

/// Everything the node knows about one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    pub name: String,
    pub network: NetworkType,
    pub base: BaseParams,
    pub consensus: Arc<ConsensusParams>,
}

/// Registry key of a povnet. An empty name selects the unnamed povnet.
pub fn povnet_name(name: &str) -> String {
    if name.is_empty() {
        NetworkType::Povnet.base_name().to_string()
    } else {
        format!("{}-{}", NetworkType::Povnet.base_name(), name)
    }
}

#[derive(Debug, Default)]
pub struct NetworkRegistry {
    networks: HashMap<String, ChainParams>,
}

impl NetworkRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding main, test and regtest.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ChainParams {
            name: NetworkType::Mainnet.base_name().to_string(),
            network: NetworkType::Mainnet,
            base: BaseParams { rpc_port: 18889, data_dir: String::new() },
            consensus: Arc::new(ConsensusParams::mainnet()),
        });
        registry.register(ChainParams {
            name: NetworkType::Testnet.base_name().to_string(),
            network: NetworkType::Testnet,
            base: BaseParams { rpc_port: 17778, data_dir: "testnetv4".to_string() },
            consensus: Arc::new(ConsensusParams::testnet()),
        });
        registry.register(ChainParams {
            name: NetworkType::Regtest.base_name().to_string(),
            network: NetworkType::Regtest,
            base: BaseParams { rpc_port: 16667, data_dir: "regtest".to_string() },
            consensus: Arc::new(ConsensusParams::regtest()),
        });
        registry
    }

    /// Adds or replaces a network under its own name.
    pub fn register(&mut self, params: ChainParams) {
        debug!(network = %params.name, "registering network parameters");
        self.networks.insert(params.name.clone(), params);
    }

    /// Registers the povnet called `name` and returns its registry key.
    pub fn register_povnet(&mut self, name: &str, genesis: Hash) -> String {
        let key = povnet_name(name);
        self.register(ChainParams {
            name: key.clone(),
            network: NetworkType::Povnet,
            base: BaseParams { rpc_port: 18890, data_dir: key.clone() },
            consensus: Arc::new(ConsensusParams::povnet(genesis)),
        });
        key
    }

    /// Parameters of the network called `name`.
    pub fn select(&self, name: &str) -> Result<&ChainParams, ConfigError> {
        let params = self
            .networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownChain(name.to_string()))?;
        info!(network = %params.name, "selected network");
        Ok(params)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.networks.contains_key(name)
    }
}

/// Which network the operator asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSelection {
    pub testnet: bool,
    pub regtest: bool,
    /// Povnet name; `Some("")` selects the unnamed povnet
    pub povnet: Option<String>,
}

impl ChainSelection {
    /// Registry key of the selected network.
    pub fn chain_name(&self) -> Result<String, ConfigError> {
        let selected = [self.regtest, self.povnet.is_some(), self.testnet]
            .iter()
            .filter(|flag| **flag)
            .count();
        if selected > 1 {
            return Err(ConfigError::ConflictingChainSelection);
        }

        if let Some(name) = &self.povnet {
            return Ok(povnet_name(name));
        }
        if self.regtest {
            return Ok(NetworkType::Regtest.base_name().to_string());
        }
        if self.testnet {
            return Ok(NetworkType::Testnet.base_name().to_string());
        }
        Ok(NetworkType::Mainnet.base_name().to_string())
    }
}
