use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::registry::{ChainParams, ChainSelection, NetworkRegistry};
use crate::errors::ConfigError;

/// Runtime capabilities of the node, consulted by the tip-update fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCapabilities {
    /// Lite mode skips every non-consensus subsystem
    pub lite_mode: bool,
    /// A local wallet is running and wants privacy-mixing updates
    pub wallet: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    pub lite_mode: bool,
    pub wallet_enabled: bool,
}

/// Node configuration file.
///
/// ```toml
/// [chain]
/// povnet = "alice"
///
/// [node]
/// lite_mode = false
/// wallet_enabled = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub chain: ChainSelection,
    pub node: NodeSettings,
}

impl NodeConfig {
    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn capabilities(&self) -> NodeCapabilities {
        NodeCapabilities { lite_mode: self.node.lite_mode, wallet: self.node.wallet_enabled }
    }

    /// Resolves the configured network against `registry`.
    pub fn select_chain<'a>(
        &self,
        registry: &'a NetworkRegistry,
    ) -> Result<&'a ChainParams, ConfigError> {
        let name = self.chain.chain_name()?;
        registry.select(&name)
    }
}
