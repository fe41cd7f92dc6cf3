use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

/// One side of a creator pool: either the cw20 token minted for the creator
/// or the chain's native bluechip denom.
#[cw_serde]
pub enum TokenType {
    /// A cw20 creator token instantiated by the factory.
    CreatorToken { contract_addr: Addr },
    /// The native staking/payment denom.
    Bluechip { denom: String },
}

impl TokenType {
    pub fn is_native(&self) -> bool {
        matches!(self, TokenType::Bluechip { .. })
    }

    /// Returns the cw20 contract address if this side is a creator token.
    pub fn creator_token(&self) -> Option<&Addr> {
        match self {
            TokenType::CreatorToken { contract_addr } => Some(contract_addr),
            TokenType::Bluechip { .. } => None,
        }
    }
}

/// Finds the creator-token contract address among a pool's two assets.
pub fn creator_token_addr(asset_infos: &[TokenType; 2]) -> Option<&Addr> {
    asset_infos.iter().find_map(TokenType::creator_token)
}

/// An amount of a specific pool asset.
#[cw_serde]
pub struct Asset {
    pub info: TokenType,
    pub amount: Uint128,
}

impl Asset {
    pub fn native(denom: impl Into<String>, amount: impl Into<Uint128>) -> Self {
        Asset {
            info: TokenType::Bluechip {
                denom: denom.into(),
            },
            amount: amount.into(),
        }
    }

    pub fn cw20(contract_addr: Addr, amount: impl Into<Uint128>) -> Self {
        Asset {
            info: TokenType::CreatorToken { contract_addr },
            amount: amount.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use speculoos::prelude::*;

    #[test]
    fn token_type_wire_format() {
        let native = TokenType::Bluechip {
            denom: "ubluechip".to_string(),
        };
        let json = serde_json::to_value(&native).unwrap();
        assert_eq!(json, serde_json::json!({ "bluechip": { "denom": "ubluechip" } }));

        let token = TokenType::CreatorToken {
            contract_addr: Addr::unchecked("bluechip1token"),
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "creator_token": { "contract_addr": "bluechip1token" } })
        );
    }

    #[test]
    fn finds_creator_token_in_pair() {
        let infos = [
            TokenType::Bluechip {
                denom: "ubluechip".to_string(),
            },
            TokenType::CreatorToken {
                contract_addr: Addr::unchecked("bluechip1token"),
            },
        ];
        assert_that!(creator_token_addr(&infos))
            .is_some()
            .is_equal_to(&Addr::unchecked("bluechip1token"));

        let native_only = [
            TokenType::Bluechip {
                denom: "ubluechip".to_string(),
            },
            TokenType::Bluechip {
                denom: "uatom".to_string(),
            },
        ];
        assert_that!(creator_token_addr(&native_only)).is_none();
    }
}
