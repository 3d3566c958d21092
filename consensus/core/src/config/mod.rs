pub mod node;
pub mod params;
pub mod registry;

pub use node::{NodeCapabilities, NodeConfig, NodeSettings};
pub use params::ConsensusParams;
pub use registry::{BaseParams, ChainParams, ChainSelection, NetworkRegistry};
