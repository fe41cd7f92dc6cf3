//! High-level entry point tying the session, builders and query flows
//! together.

use bluechip_std::factory::DEFAULT_COMMIT_LIMIT_USD;
use cosmwasm_std::Uint128;

use crate::chain::ChainConfig;
use crate::error::ClientResult;
use crate::flows::{commit, create_pool, liquidity, portfolio, progress, swap};
use crate::session::Session;
use crate::tx::TxReceipt;

/// One wallet, one network, one factory.
pub struct BluechipClient {
    session: Session,
    factory: String,
}

impl BluechipClient {
    pub async fn connect(
        config: ChainConfig,
        mnemonic: &str,
        factory: String,
    ) -> ClientResult<Self> {
        let session = Session::connect(config, mnemonic).await?;
        Ok(BluechipClient { session, factory })
    }

    pub fn from_session(session: Session, factory: String) -> Self {
        BluechipClient { session, factory }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn address(&self) -> &str {
        self.session.address()
    }

    pub async fn balance(&self) -> ClientResult<Uint128> {
        self.session.native_balance().await
    }

    pub async fn commit(
        &self,
        pool: &str,
        amount: &str,
        slippage_percent: Option<&str>,
        deadline_minutes: u64,
    ) -> ClientResult<TxReceipt> {
        commit::commit(&self.session, pool, amount, slippage_percent, deadline_minutes).await
    }

    pub async fn buy(
        &self,
        pool: &str,
        amount: &str,
        slippage_percent: Option<&str>,
        deadline_minutes: u64,
    ) -> ClientResult<TxReceipt> {
        swap::buy(&self.session, pool, amount, slippage_percent, deadline_minutes).await
    }

    /// Sells creator tokens; the token contract is resolved from the pool.
    pub async fn sell(
        &self,
        pool: &str,
        amount: &str,
        slippage_percent: Option<&str>,
        deadline_minutes: u64,
    ) -> ClientResult<TxReceipt> {
        let token = liquidity::fetch_creator_token(&self.session, pool).await?;
        swap::sell(
            &self.session,
            pool,
            &token,
            amount,
            slippage_percent,
            deadline_minutes,
        )
        .await
    }

    pub async fn deposit_liquidity(
        &self,
        pool: &str,
        amount0: &str,
        amount1: &str,
        slippage_percent: Option<&str>,
        deadline_minutes: u64,
    ) -> ClientResult<TxReceipt> {
        liquidity::deposit(
            &self.session,
            pool,
            amount0,
            amount1,
            slippage_percent,
            deadline_minutes,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_to_position(
        &self,
        pool: &str,
        position_id: &str,
        amount0: &str,
        amount1: &str,
        slippage_percent: Option<&str>,
        deadline_minutes: u64,
    ) -> ClientResult<TxReceipt> {
        liquidity::add_to_position(
            &self.session,
            pool,
            position_id,
            amount0,
            amount1,
            slippage_percent,
            deadline_minutes,
        )
        .await
    }

    pub async fn remove_liquidity(
        &self,
        pool: &str,
        position_id: &str,
        amount: liquidity::RemoveAmount,
        slippage_percent: Option<&str>,
        deadline_minutes: u64,
    ) -> ClientResult<TxReceipt> {
        liquidity::remove(
            &self.session,
            pool,
            position_id,
            amount,
            slippage_percent,
            deadline_minutes,
        )
        .await
    }

    pub async fn positions(
        &self,
        pool: &str,
    ) -> ClientResult<Vec<bluechip_std::pool::PositionResponse>> {
        liquidity::fetch_positions(&self.session, pool, self.session.address()).await
    }

    pub async fn close_position(&self, pool: &str, position_id: &str) -> ClientResult<TxReceipt> {
        liquidity::close(&self.session, pool, position_id).await
    }

    pub async fn collect_fees(&self, pool: &str, position_id: &str) -> ClientResult<TxReceipt> {
        liquidity::collect_fees(&self.session, pool, position_id).await
    }

    pub async fn create_pool(
        &self,
        token_name: &str,
        token_symbol: &str,
    ) -> ClientResult<TxReceipt> {
        create_pool::create_pool(&self.session, &self.factory, token_name, token_symbol).await
    }

    pub async fn listings(&self) -> ClientResult<Vec<portfolio::TokenListing>> {
        portfolio::fetch_listings(&self.session, &self.factory).await
    }

    pub async fn portfolio(&self) -> ClientResult<Vec<portfolio::TokenListing>> {
        portfolio::fetch_portfolio(&self.session, &self.factory, self.session.address()).await
    }

    pub async fn progress(&self, pool: &str) -> ClientResult<progress::CommitProgress> {
        progress::fetch_progress(
            &self.session,
            pool,
            Uint128::new(DEFAULT_COMMIT_LIMIT_USD),
        )
        .await
    }
}
