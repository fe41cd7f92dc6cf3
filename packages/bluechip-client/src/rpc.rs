//! Tendermint RPC transport: smart queries, account lookups and broadcast.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use cosmrs::{
    proto::{
        cosmos::auth::v1beta1::{BaseAccount, QueryAccountRequest, QueryAccountResponse},
        cosmos::bank::v1beta1::{QueryBalanceRequest, QueryBalanceResponse},
        cosmwasm::wasm::v1::{QuerySmartContractStateRequest, QuerySmartContractStateResponse},
        prost::Message,
    },
    rpc::{Client, HttpClient},
    tx::Raw,
};
use cosmwasm_std::Uint128;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::tx::TxReceipt;

const SMART_QUERY_PATH: &str = "/cosmwasm.wasm.v1.Query/SmartContractState";
const ACCOUNT_QUERY_PATH: &str = "/cosmos.auth.v1beta1.Query/Account";
const BALANCE_QUERY_PATH: &str = "/cosmos.bank.v1beta1.Query/Balance";

const DEFAULT_CONFIRM_ATTEMPTS: u32 = 30;
const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_millis(1_000);

/// Read path of the transport. Query flows depend on this trait so they can
/// run against a stub in tests.
#[async_trait]
pub trait WasmQuery: Send + Sync {
    /// Raw `SmartContractState` query; `payload` and the result are the
    /// contract-level JSON bytes.
    async fn raw_smart_query(&self, contract: &str, payload: Vec<u8>) -> ClientResult<Vec<u8>>;
}

/// Typed smart query over any [`WasmQuery`] transport.
pub async fn smart_query<R, M>(
    transport: &(impl WasmQuery + ?Sized),
    contract: &str,
    msg: &M,
) -> ClientResult<R>
where
    R: DeserializeOwned,
    M: Serialize + ?Sized,
{
    let raw = transport
        .raw_smart_query(contract, serde_json::to_vec(msg)?)
        .await?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Account number and sequence, fetched at signing time.
#[derive(Debug, Clone, Copy)]
pub struct AccountInfo {
    pub account_number: u64,
    pub sequence: u64,
}

pub struct RpcClient {
    http: HttpClient,
    confirm_attempts: u32,
    confirm_delay: Duration,
}

impl RpcClient {
    pub fn new(rpc_url: &str) -> ClientResult<Self> {
        let http = HttpClient::new(rpc_url)?;
        Ok(RpcClient {
            http,
            confirm_attempts: DEFAULT_CONFIRM_ATTEMPTS,
            confirm_delay: DEFAULT_CONFIRM_DELAY,
        })
    }

    async fn abci_query(&self, path: &str, data: Vec<u8>, contract: &str) -> ClientResult<Vec<u8>> {
        let response = self
            .http
            .abci_query(Some(path.to_string()), data, None, false)
            .await?;
        if !response.code.is_ok() {
            return Err(ClientError::Query {
                contract: contract.to_string(),
                log: response.log,
            });
        }
        Ok(response.value)
    }

    /// Account number and sequence of `address`, or
    /// [`ClientError::AccountNotFound`] if the chain has never seen it.
    pub async fn base_account(&self, address: &str) -> ClientResult<AccountInfo> {
        let request = QueryAccountRequest {
            address: address.to_string(),
        };
        let value = self
            .abci_query(ACCOUNT_QUERY_PATH, request.encode_to_vec(), address)
            .await
            .map_err(|_| ClientError::AccountNotFound(address.to_string()))?;
        let response = QueryAccountResponse::decode(value.as_slice())?;
        let any = response
            .account
            .ok_or_else(|| ClientError::AccountNotFound(address.to_string()))?;
        let account = BaseAccount::decode(any.value.as_slice())?;
        Ok(AccountInfo {
            account_number: account.account_number,
            sequence: account.sequence,
        })
    }

    pub async fn native_balance(&self, address: &str, denom: &str) -> ClientResult<Uint128> {
        let request = QueryBalanceRequest {
            address: address.to_string(),
            denom: denom.to_string(),
        };
        let value = self
            .abci_query(BALANCE_QUERY_PATH, request.encode_to_vec(), address)
            .await?;
        let response = QueryBalanceResponse::decode(value.as_slice())?;
        let amount = match response.balance {
            Some(coin) => Uint128::from_str(&coin.amount)?,
            None => Uint128::zero(),
        };
        Ok(amount)
    }

    /// Sync-broadcasts a signed transaction, then polls until it lands in a
    /// block. The chain's raw log is passed through verbatim on failure.
    pub async fn broadcast(&self, tx: Raw) -> ClientResult<TxReceipt> {
        let response = self.http.broadcast_tx_sync(tx.to_bytes()?).await?;
        if response.code.is_err() {
            return Err(ClientError::Broadcast {
                log: response.log.clone(),
            });
        }
        let hash = response.hash;
        let tx_hash = hash.to_string();
        log::debug!("broadcast accepted, awaiting inclusion of {tx_hash}");

        for attempt in 1..=self.confirm_attempts {
            tokio::time::sleep(self.confirm_delay).await;
            match self.http.tx(hash, false).await {
                Ok(found) => {
                    if found.tx_result.code.is_err() {
                        return Err(ClientError::TxFailed {
                            tx_hash,
                            log: found.tx_result.log,
                        });
                    }
                    return Ok(TxReceipt {
                        tx_hash,
                        height: found.height.value(),
                        gas_used: found.tx_result.gas_used as u64,
                    });
                }
                Err(err) => {
                    log::debug!("tx {tx_hash} not found yet (attempt {attempt}): {err}");
                }
            }
        }
        Err(ClientError::NotConfirmed {
            tx_hash,
            attempts: self.confirm_attempts,
        })
    }
}

#[async_trait]
impl WasmQuery for RpcClient {
    async fn raw_smart_query(&self, contract: &str, payload: Vec<u8>) -> ClientResult<Vec<u8>> {
        let request = QuerySmartContractStateRequest {
            address: contract.to_string(),
            query_data: payload,
        };
        let value = self
            .abci_query(SMART_QUERY_PATH, request.encode_to_vec(), contract)
            .await?;
        let response = QuerySmartContractStateResponse::decode(value.as_slice())?;
        Ok(response.data)
    }
}
