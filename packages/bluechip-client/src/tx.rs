//! Transaction lifecycle reporting.

/// Gas ceiling for a cw20 allowance increase.
pub const GAS_APPROVE: u64 = 200_000;
/// Gas ceiling for swaps and liquidity operations.
pub const GAS_SWAP: u64 = 500_000;
pub const GAS_LIQUIDITY: u64 = 500_000;
/// Gas ceiling for commits; pre-threshold commits can trigger the payout.
pub const GAS_COMMIT: u64 = 600_000;
/// Gas ceiling for pool creation (factory instantiates three contracts).
pub const GAS_CREATE_POOL: u64 = 2_000_000;

/// Per-transaction knobs. Gas is always explicit; nothing is simulated.
#[derive(Debug, Clone)]
pub struct TxOptions {
    pub gas_limit: u64,
    pub memo: String,
}

impl TxOptions {
    pub fn with_gas(gas_limit: u64) -> Self {
        TxOptions {
            gas_limit,
            memo: String::new(),
        }
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}

/// A confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub height: u64,
    pub gas_used: u64,
}

/// Lifecycle of one user-facing action. The variant tag alone determines how
/// the status is presented; the message never does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TxStatus {
    #[default]
    Idle,
    Pending,
    Success {
        tx_hash: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl TxStatus {
    pub fn severity(&self) -> Severity {
        match self {
            TxStatus::Idle | TxStatus::Pending => Severity::Info,
            TxStatus::Success { .. } => Severity::Success,
            TxStatus::Failed { .. } => Severity::Error,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, TxStatus::Success { .. } | TxStatus::Failed { .. })
    }
}

impl From<&TxReceipt> for TxStatus {
    fn from(receipt: &TxReceipt) -> Self {
        TxStatus::Success {
            tx_hash: receipt.tx_hash.clone(),
        }
    }
}
