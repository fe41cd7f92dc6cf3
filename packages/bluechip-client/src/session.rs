//! A connected signing session: wallet + transport + chain parameters.

use async_trait::async_trait;
use cosmrs::{
    cosmwasm::MsgExecuteContract,
    tendermint::chain::Id,
    tx::{BodyBuilder, Fee, Msg, SignDoc, SignerInfo},
};
use cosmwasm_std::{Coin, Uint128};
use serde::Serialize;

use crate::chain::ChainConfig;
use crate::error::{ClientError, ClientResult};
use crate::rpc::{RpcClient, WasmQuery};
use crate::tx::{TxOptions, TxReceipt};
use crate::wallet::Wallet;

/// One wallet connected to one network. Construction is all-or-nothing: a
/// bad mnemonic, unreachable RPC or unknown account leaves nothing behind.
pub struct Session {
    config: ChainConfig,
    wallet: Wallet,
    rpc: RpcClient,
    address: String,
    balance_at_connect: Uint128,
}

impl Session {
    pub async fn connect(config: ChainConfig, mnemonic: &str) -> ClientResult<Self> {
        let rpc = RpcClient::new(&config.rpc_url)?;
        Self::connect_with(config, mnemonic, rpc).await
    }

    /// Like [`Session::connect`] with a caller-supplied transport.
    pub async fn connect_with(
        config: ChainConfig,
        mnemonic: &str,
        rpc: RpcClient,
    ) -> ClientResult<Self> {
        let wallet = Wallet::from_mnemonic(mnemonic, config.coin_type, &config.bech32_prefix)?;
        let address = wallet.account_id().to_string();

        // The account must exist on chain before we hand out a session;
        // mirrors the connect-time account + balance fetch.
        rpc.base_account(&address).await?;
        let balance_at_connect = rpc.native_balance(&address, &config.native_denom).await?;

        log::info!(
            "connected {address} to {} ({} {})",
            config.chain_name,
            balance_at_connect,
            config.native_denom
        );

        Ok(Session {
            config,
            wallet,
            rpc,
            address,
            balance_at_connect,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Native balance observed when the session was opened.
    pub fn balance_at_connect(&self) -> Uint128 {
        self.balance_at_connect
    }

    pub async fn native_balance(&self) -> ClientResult<Uint128> {
        self.rpc
            .native_balance(&self.address, &self.config.native_denom)
            .await
    }

    /// Signs and broadcasts a wasm execute with an explicit gas limit. Gas is
    /// never simulated; the fee is `ceil(gas × gas_price)` in the native denom.
    pub async fn execute<M: Serialize>(
        &self,
        contract: &str,
        msg: &M,
        funds: Vec<Coin>,
        options: TxOptions,
    ) -> ClientResult<TxReceipt> {
        let funds = funds
            .into_iter()
            .map(|coin| {
                Ok(cosmrs::Coin {
                    denom: coin.denom.parse()?,
                    amount: coin.amount.u128(),
                })
            })
            .collect::<ClientResult<Vec<_>>>()?;

        let execute = MsgExecuteContract {
            sender: self.wallet.account_id().clone(),
            contract: contract
                .parse()
                .map_err(|_| ClientError::Query {
                    contract: contract.to_string(),
                    log: "invalid contract address".to_string(),
                })?,
            msg: serde_json::to_vec(msg)?,
            funds,
        };

        let account = self.rpc.base_account(&self.address).await?;
        let chain_id = Id::try_from(self.config.chain_id.clone())?;

        let fee_amount = (options.gas_limit as f64 * self.config.gas_price).ceil() as u128;
        let fee = Fee::from_amount_and_gas(
            cosmrs::Coin {
                denom: self.config.native_denom.parse()?,
                amount: fee_amount,
            },
            options.gas_limit,
        );

        let mut body = BodyBuilder::new();
        body.msg(execute.to_any()?);
        if !options.memo.is_empty() {
            body.memo(&options.memo);
        }
        let body = body.finish();

        let auth_info =
            SignerInfo::single_direct(Some(self.wallet.public_key()), account.sequence)
                .auth_info(fee);
        let sign_doc = SignDoc::new(&body, &auth_info, &chain_id, account.account_number)?;
        let raw = self.wallet.sign(sign_doc)?;

        log::debug!(
            "executing on {contract} with gas {} (sequence {})",
            options.gas_limit,
            account.sequence
        );
        self.rpc.broadcast(raw).await
    }
}

#[async_trait]
impl WasmQuery for Session {
    async fn raw_smart_query(&self, contract: &str, payload: Vec<u8>) -> ClientResult<Vec<u8>> {
        self.rpc.raw_smart_query(contract, payload).await
    }
}
