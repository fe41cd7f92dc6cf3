//! Chain presets and connection parameters.

use std::env;

use crate::error::{ClientError, ClientResult};

/// Environment variable overriding the factory contract address.
pub const FACTORY_ENV: &str = "BLUECHIP_FACTORY";
/// Environment variable holding the signing mnemonic.
pub const MNEMONIC_ENV: &str = "BLUECHIP_MNEMONIC";

/// Everything needed to reach one bluechip network and denominate fees on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_url: String,
    pub bech32_prefix: String,
    pub native_denom: String,
    pub coin_decimals: u8,
    pub coin_type: u32,
    /// Average gas price in `native_denom` per gas unit.
    pub gas_price: f64,
}

impl ChainConfig {
    pub fn mainnet() -> Self {
        ChainConfig {
            chain_id: "bluechip-1".to_owned(),
            chain_name: "Bluechip Mainnet".to_owned(),
            rpc_url: "https://bluechip.rpc.bluechip.link".to_owned(),
            bech32_prefix: "bluechip".to_owned(),
            native_denom: "ubluechip".to_owned(),
            coin_decimals: 6,
            coin_type: 118,
            gas_price: 0.025,
        }
    }

    /// A single-node devnet started with the default cosmos prefix.
    pub fn local() -> Self {
        ChainConfig {
            chain_id: "bluechipChain".to_owned(),
            chain_name: "Bluechip Local".to_owned(),
            rpc_url: "http://localhost:26657".to_owned(),
            bech32_prefix: "cosmos".to_owned(),
            native_denom: "ubluechip".to_owned(),
            coin_decimals: 6,
            coin_type: 118,
            gas_price: 0.025,
        }
    }

    pub fn parse_network(name: &str) -> ClientResult<Self> {
        match name {
            "mainnet" => Ok(Self::mainnet()),
            "local" => Ok(Self::local()),
            other => Err(ClientError::UnknownNetwork(other.to_owned())),
        }
    }
}

/// Resolve the factory address from an explicit flag or [`FACTORY_ENV`].
pub fn factory_address(explicit: Option<String>) -> ClientResult<String> {
    explicit
        .or_else(|| env::var(FACTORY_ENV).ok())
        .filter(|addr| !addr.is_empty())
        .ok_or(ClientError::MissingFactory)
}

#[cfg(test)]
mod test {
    use super::*;
    use speculoos::prelude::*;

    #[test]
    fn network_presets_resolve_by_name() {
        assert_that!(ChainConfig::parse_network("mainnet"))
            .is_ok_containing(ChainConfig::mainnet());
        assert_that!(ChainConfig::parse_network("local")).is_ok_containing(ChainConfig::local());
        assert_that!(ChainConfig::parse_network("testnet")).is_err();
    }

    #[test]
    fn explicit_factory_wins_over_env() {
        let addr = factory_address(Some("bluechip1factory".to_owned())).unwrap();
        assert_eq!(addr, "bluechip1factory");
    }
}
