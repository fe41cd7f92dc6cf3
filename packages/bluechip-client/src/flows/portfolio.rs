//! Pool discovery and wallet holdings, aggregated client-side.

use bluechip_std::factory::{AllPoolsResponse, PoolSummary, QueryMsg as FactoryQueryMsg};
use bluechip_std::pool::{CommitStatus, PairInfo, QueryMsg as PoolQueryMsg};
use bluechip_std::objects::creator_token_addr;
use cosmwasm_std::Uint128;
use cw20::{BalanceResponse, Cw20QueryMsg, TokenInfoResponse};

use crate::error::{ClientError, ClientResult};
use crate::rpc::{smart_query, WasmQuery};

/// What is known about a listed creator token regardless of who is asking.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingInfo {
    pub pool_id: String,
    pub pool_address: String,
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub commit_status: CommitStatus,
}

/// A listing is either anonymous (discover page) or tied to a wallet that
/// holds a balance in it. The tag says which; nothing is inferred from
/// which fields happen to be present.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenListing {
    Discover { info: ListingInfo },
    Portfolio { info: ListingInfo, balance: Uint128 },
}

impl TokenListing {
    pub fn info(&self) -> &ListingInfo {
        match self {
            TokenListing::Discover { info } | TokenListing::Portfolio { info, .. } => info,
        }
    }

    pub fn balance(&self) -> Option<Uint128> {
        match self {
            TokenListing::Discover { .. } => None,
            TokenListing::Portfolio { balance, .. } => Some(*balance),
        }
    }
}

/// Every pool the factory has created.
pub async fn fetch_all_pools(
    transport: &(impl WasmQuery + ?Sized),
    factory: &str,
) -> ClientResult<Vec<(String, PoolSummary)>> {
    let response: AllPoolsResponse =
        smart_query(transport, factory, &FactoryQueryMsg::GetAllPools {}).await?;
    Ok(response.pools)
}

/// Resolves one pool into a listing. `owner` switches between the discover
/// shape and the portfolio shape; a zero balance yields `None`.
async fn resolve_listing(
    transport: &(impl WasmQuery + ?Sized),
    pool_id: &str,
    pool_address: &str,
    owner: Option<&str>,
) -> ClientResult<Option<TokenListing>> {
    let pair: PairInfo = smart_query(transport, pool_address, &PoolQueryMsg::PairInfo {}).await?;
    let token_address = creator_token_addr(&pair.asset_infos)
        .map(|addr| addr.to_string())
        .ok_or_else(|| ClientError::CreatorTokenMissing(pool_address.to_string()))?;

    let balance = match owner {
        Some(owner) => {
            let held: BalanceResponse = smart_query(
                transport,
                &token_address,
                &Cw20QueryMsg::Balance {
                    address: owner.to_string(),
                },
            )
            .await?;
            if held.balance.is_zero() {
                return Ok(None);
            }
            Some(held.balance)
        }
        None => None,
    };

    let token: TokenInfoResponse =
        smart_query(transport, &token_address, &Cw20QueryMsg::TokenInfo {}).await?;
    let commit_status: CommitStatus = smart_query(
        transport,
        pool_address,
        &PoolQueryMsg::CheckThresholdLimit {},
    )
    .await?;

    let info = ListingInfo {
        pool_id: pool_id.to_string(),
        pool_address: pool_address.to_string(),
        token_address,
        name: token.name,
        symbol: token.symbol,
        decimals: token.decimals,
        commit_status,
    };
    Ok(Some(match balance {
        Some(balance) => TokenListing::Portfolio { info, balance },
        None => TokenListing::Discover { info },
    }))
}

async fn collect_listings(
    transport: &(impl WasmQuery + ?Sized),
    factory: &str,
    owner: Option<&str>,
) -> ClientResult<Vec<TokenListing>> {
    let pools = fetch_all_pools(transport, factory).await?;
    let mut listings = Vec::with_capacity(pools.len());
    for (pool_id, summary) in pools {
        let pool_address = summary.pool_contract_address.as_str();
        // One broken pool must not take the whole refresh down.
        match resolve_listing(transport, &pool_id, pool_address, owner).await {
            Ok(Some(listing)) => listings.push(listing),
            Ok(None) => {}
            Err(err) => {
                log::warn!("skipping pool {pool_id} at {pool_address}: {err}");
            }
        }
    }
    Ok(listings)
}

/// All listed tokens, without balances.
pub async fn fetch_listings(
    transport: &(impl WasmQuery + ?Sized),
    factory: &str,
) -> ClientResult<Vec<TokenListing>> {
    collect_listings(transport, factory, None).await
}

/// The tokens `owner` actually holds, balances attached; zero balances are
/// dropped and failing pools skipped.
pub async fn fetch_portfolio(
    transport: &(impl WasmQuery + ?Sized),
    factory: &str,
    owner: &str,
) -> ClientResult<Vec<TokenListing>> {
    collect_listings(transport, factory, Some(owner)).await
}
