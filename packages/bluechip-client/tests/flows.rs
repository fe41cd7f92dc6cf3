//! Query-flow tests against a canned transport.

use std::collections::HashMap;

use async_trait::async_trait;
use bluechip_client::error::{ClientError, ClientResult};
use bluechip_client::flows::commit::{build_commit, fetch_commit_status};
use bluechip_client::flows::portfolio::{fetch_listings, fetch_portfolio, TokenListing};
use bluechip_client::flows::progress::fetch_progress;
use bluechip_client::rpc::WasmQuery;
use bluechip_std::pool::{CommitStatus, ExecuteMsg};
use cosmwasm_std::Uint128;
use serde_json::{json, Value};
use speculoos::prelude::*;

const FACTORY: &str = "bluechip1factory";

/// Serves canned JSON keyed by contract address and the query's variant
/// name. Anything not staged fails like a broken contract.
#[derive(Default)]
struct StubChain {
    responses: HashMap<(String, String), Value>,
}

impl StubChain {
    fn stage(&mut self, contract: &str, variant: &str, response: Value) {
        self.responses
            .insert((contract.to_string(), variant.to_string()), response);
    }
}

#[async_trait]
impl WasmQuery for StubChain {
    async fn raw_smart_query(&self, contract: &str, payload: Vec<u8>) -> ClientResult<Vec<u8>> {
        let msg: Value = serde_json::from_slice(&payload)?;
        let variant = msg
            .as_object()
            .and_then(|obj| obj.keys().next().cloned())
            .unwrap_or_default();
        match self.responses.get(&(contract.to_string(), variant.clone())) {
            Some(response) => Ok(serde_json::to_vec(response)?),
            None => Err(ClientError::Query {
                contract: contract.to_string(),
                log: format!("no handler for {variant}"),
            }),
        }
    }
}

fn pool_summary(address: &str) -> Value {
    json!({
        "pool_contract_address": address,
        "nft_ownership_accepted": true,
        "reserve0": "1000000",
        "reserve1": "2000000",
        "total_liquidity": "1400000",
        "block_time_last": 1700000000,
        "price0_cumulative_last": "0",
        "price1_cumulative_last": "0",
        "assets": ["ubluechip", "token"]
    })
}

/// Stages the full read side of one healthy pool.
fn stage_pool(chain: &mut StubChain, pool: &str, token: &str, symbol: &str, balance: &str) {
    chain.stage(
        pool,
        "pair_info",
        json!({
            "asset_infos": [
                { "bluechip": { "denom": "ubluechip" } },
                { "creator_token": { "contract_addr": token } }
            ],
            "contract_addr": pool,
            "liquidity_token": format!("{pool}lp"),
            "pair_type": { "xyk": {} }
        }),
    );
    chain.stage(pool, "check_threshold_limit", json!("fully_committed"));
    chain.stage(
        token,
        "token_info",
        json!({
            "name": format!("{symbol} Coin"),
            "symbol": symbol,
            "decimals": 6,
            "total_supply": "1200000000000"
        }),
    );
    chain.stage(token, "balance", json!({ "balance": balance }));
}

#[tokio::test]
async fn commit_status_decodes_both_wire_shapes() {
    let mut chain = StubChain::default();
    chain.stage("pool_done", "check_threshold_limit", json!("fully_committed"));
    chain.stage(
        "pool_open",
        "check_threshold_limit",
        json!({ "in_progress": { "raised": "12000000000", "target": "25000000000" } }),
    );

    let done = fetch_commit_status(&chain, "pool_done").await.unwrap();
    assert!(done.threshold_reached());

    let open = fetch_commit_status(&chain, "pool_open").await.unwrap();
    assert_eq!(
        open,
        CommitStatus::InProgress {
            raised: Uint128::new(12_000_000_000),
            target: Uint128::new(25_000_000_000),
        }
    );
}

#[tokio::test]
async fn fetched_status_drives_the_spread_gate() {
    let mut chain = StubChain::default();
    chain.stage("pool_open", "check_threshold_limit",
        json!({ "in_progress": { "raised": "0", "target": "25000000000" } }));
    chain.stage("pool_done", "check_threshold_limit", json!("fully_committed"));

    for (pool, expect_spread) in [("pool_open", false), ("pool_done", true)] {
        let status = fetch_commit_status(&chain, pool).await.unwrap();
        let msg = build_commit("ubluechip", Uint128::new(25_500_000), &status, Some(50), None);
        let ExecuteMsg::Commit { max_spread, .. } = msg else {
            panic!("expected commit message");
        };
        assert_eq!(max_spread.is_some(), expect_spread, "pool {pool}");
    }
}

#[tokio::test]
async fn one_broken_pool_does_not_sink_the_portfolio() {
    let mut chain = StubChain::default();
    chain.stage(
        FACTORY,
        "get_all_pools",
        json!({
            "pools": [
                ["1", pool_summary("pool_a")],
                ["2", pool_summary("pool_b")],
                ["3", pool_summary("pool_c")]
            ]
        }),
    );
    stage_pool(&mut chain, "pool_a", "token_a", "AAA", "5000000");
    // pool_b gets no pair_info handler and fails on first contact
    stage_pool(&mut chain, "pool_c", "token_c", "CCC", "7000000");

    let holdings = fetch_portfolio(&chain, FACTORY, "bluechip1owner")
        .await
        .unwrap();
    let symbols: Vec<&str> = holdings
        .iter()
        .map(|listing| listing.info().symbol.as_str())
        .collect();
    assert_eq!(symbols, vec!["AAA", "CCC"]);
    assert_eq!(holdings[0].balance(), Some(Uint128::new(5_000_000)));
}

#[tokio::test]
async fn zero_balances_are_filtered_out_of_the_portfolio() {
    let mut chain = StubChain::default();
    chain.stage(
        FACTORY,
        "get_all_pools",
        json!({
            "pools": [
                ["1", pool_summary("pool_a")],
                ["2", pool_summary("pool_b")]
            ]
        }),
    );
    stage_pool(&mut chain, "pool_a", "token_a", "AAA", "0");
    stage_pool(&mut chain, "pool_b", "token_b", "BBB", "9000000");

    let holdings = fetch_portfolio(&chain, FACTORY, "bluechip1owner")
        .await
        .unwrap();
    assert_that!(holdings).has_length(1);
    assert_eq!(holdings[0].info().symbol, "BBB");
    assert!(matches!(holdings[0], TokenListing::Portfolio { .. }));
}

#[tokio::test]
async fn discover_listings_carry_no_balances() {
    let mut chain = StubChain::default();
    chain.stage(
        FACTORY,
        "get_all_pools",
        json!({ "pools": [["1", pool_summary("pool_a")]] }),
    );
    stage_pool(&mut chain, "pool_a", "token_a", "AAA", "5000000");

    let listings = fetch_listings(&chain, FACTORY).await.unwrap();
    assert_that!(listings).has_length(1);
    assert!(matches!(listings[0], TokenListing::Discover { .. }));
    assert_eq!(listings[0].balance(), None);
    assert!(listings[0].info().commit_status.threshold_reached());
}

#[tokio::test]
async fn progress_rolls_up_the_commit_history() {
    let mut chain = StubChain::default();
    chain.stage(
        "pool_a",
        "pool_commits",
        json!({
            "total_count": 2,
            "commiters": [
                {
                    "wallet": "bluechip1second",
                    "last_payment_bluechip": "100",
                    "last_payment_usd": "15000000000",
                    "last_commited": "2000",
                    "total_paid_usd": "15000000000",
                    "total_paid_bluechip": "100"
                },
                {
                    "wallet": "bluechip1first",
                    "last_payment_bluechip": "50",
                    "last_payment_usd": "10000000000",
                    "last_commited": "1000",
                    "total_paid_usd": "10000000000",
                    "total_paid_bluechip": "50"
                }
            ]
        }),
    );

    let progress = fetch_progress(&chain, "pool_a", Uint128::new(25_000_000_000))
        .await
        .unwrap();
    assert_eq!(progress.participants, 2);
    assert_eq!(progress.total_paid_usd, Uint128::new(25_000_000_000));
    assert_eq!(progress.timeline[0].wallet, "bluechip1first");
    assert_eq!(
        progress.percent_complete,
        cosmwasm_std::Decimal::from_ratio(100u128, 1u128)
    );
}
