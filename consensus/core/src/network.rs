use serde::{Deserialize, Serialize};
use std::fmt;

/// Network type identifies the network a node is operating on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Main network
    Mainnet,
    /// Public test network
    Testnet,
    /// Named, permissive development networks
    Povnet,
    /// Local regression test network
    Regtest,
}

impl NetworkType {
    /// Registry key of the network. Povnets are keyed by their runtime
    /// name instead, see [`crate::config::registry::povnet_name`].
    pub const fn base_name(&self) -> &'static str {
        match self {
            NetworkType::Mainnet => "main",
            NetworkType::Testnet => "test",
            NetworkType::Povnet => "povnet",
            NetworkType::Regtest => "regtest",
        }
    }

    /// Returns an iterator over all NetworkType variants
    pub fn iter() -> impl Iterator<Item = NetworkType> {
        [
            NetworkType::Mainnet,
            NetworkType::Testnet,
            NetworkType::Povnet,
            NetworkType::Regtest,
        ]
        .into_iter()
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}
