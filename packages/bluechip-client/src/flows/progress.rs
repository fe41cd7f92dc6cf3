//! Commit history of a pool, rolled up into threshold progress.

use bluechip_std::pool::{CommiterInfo, PoolCommitsResponse, QueryMsg};
use cosmwasm_std::{Decimal, Uint128};

use crate::error::ClientResult;
use crate::rpc::{smart_query, WasmQuery};

/// Page size for the commit history query.
const COMMITS_PAGE_LIMIT: u32 = 100;

/// One step of the cumulative commit timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub wallet: String,
    /// Nanoseconds, from the commit record.
    pub timestamp_ns: u64,
    pub cumulative_usd: Uint128,
    pub cumulative_bluechip: Uint128,
}

/// Aggregated commit progress of one pool against its USD threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitProgress {
    pub participants: u32,
    pub total_paid_usd: Uint128,
    pub total_paid_bluechip: Uint128,
    pub threshold_usd: Uint128,
    /// 0-100, capped at 100 once the threshold is passed.
    pub percent_complete: Decimal,
    /// Chronological running totals, one point per commit record.
    pub timeline: Vec<ProgressPoint>,
}

impl CommitProgress {
    /// Rolls commit records up into running totals. Records arrive in
    /// whatever order the contract iterates its storage, so they are sorted
    /// by commit time first.
    pub fn from_records(mut records: Vec<CommiterInfo>, threshold_usd: Uint128) -> Self {
        records.sort_by_key(|record| record.last_commited.nanos());

        let mut cumulative_usd = Uint128::zero();
        let mut cumulative_bluechip = Uint128::zero();
        let mut timeline = Vec::with_capacity(records.len());
        for record in &records {
            cumulative_usd += record.total_paid_usd;
            cumulative_bluechip += record.total_paid_bluechip;
            timeline.push(ProgressPoint {
                wallet: record.wallet.clone(),
                timestamp_ns: record.last_commited.nanos(),
                cumulative_usd,
                cumulative_bluechip,
            });
        }

        let percent_complete = if threshold_usd.is_zero() {
            Decimal::zero()
        } else {
            Decimal::from_ratio(cumulative_usd.min(threshold_usd), threshold_usd)
                * Decimal::from_ratio(100u128, 1u128)
        };

        CommitProgress {
            participants: records.len() as u32,
            total_paid_usd: cumulative_usd,
            total_paid_bluechip: cumulative_bluechip,
            threshold_usd,
            percent_complete,
            timeline,
        }
    }
}

/// Fetches the commit history of `pool` and rolls it up.
pub async fn fetch_progress(
    transport: &(impl WasmQuery + ?Sized),
    pool: &str,
    threshold_usd: Uint128,
) -> ClientResult<CommitProgress> {
    let response: PoolCommitsResponse = smart_query(
        transport,
        pool,
        &QueryMsg::PoolCommits {
            pool_contract_address: pool.to_string(),
            min_payment_usd: None,
            after_timestamp: None,
            start_after: None,
            limit: Some(COMMITS_PAGE_LIMIT),
        },
    )
    .await?;
    log::debug!(
        "pool {pool}: {} commit records ({} total)",
        response.commiters.len(),
        response.total_count
    );
    Ok(CommitProgress::from_records(
        response.commiters,
        threshold_usd,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use cosmwasm_std::Timestamp;

    fn record(wallet: &str, at_ns: u64, usd: u128, bluechip: u128) -> CommiterInfo {
        CommiterInfo {
            wallet: wallet.to_string(),
            last_payment_bluechip: Uint128::new(bluechip),
            last_payment_usd: Uint128::new(usd),
            last_commited: Timestamp::from_nanos(at_ns),
            total_paid_usd: Uint128::new(usd),
            total_paid_bluechip: Uint128::new(bluechip),
        }
    }

    #[test]
    fn out_of_order_records_are_sorted_before_accumulating() {
        let records = vec![
            record("bluechip1late", 3_000, 5_000_000_000, 200),
            record("bluechip1first", 1_000, 10_000_000_000, 400),
            record("bluechip1mid", 2_000, 5_000_000_000, 200),
        ];
        let progress =
            CommitProgress::from_records(records, Uint128::new(25_000_000_000));

        assert_eq!(progress.participants, 3);
        assert_eq!(progress.total_paid_usd, Uint128::new(20_000_000_000));
        assert_eq!(progress.total_paid_bluechip, Uint128::new(800));

        let wallets: Vec<&str> = progress
            .timeline
            .iter()
            .map(|p| p.wallet.as_str())
            .collect();
        assert_eq!(
            wallets,
            vec!["bluechip1first", "bluechip1mid", "bluechip1late"]
        );
        // running totals climb monotonically
        assert_eq!(
            progress.timeline[0].cumulative_usd,
            Uint128::new(10_000_000_000)
        );
        assert_eq!(
            progress.timeline[2].cumulative_usd,
            Uint128::new(20_000_000_000)
        );
        assert_eq!(progress.percent_complete, Decimal::from_ratio(80u128, 1u128));
    }

    #[test]
    fn percent_complete_caps_at_one_hundred() {
        let records = vec![record("bluechip1whale", 1_000, 30_000_000_000, 1_000)];
        let progress =
            CommitProgress::from_records(records, Uint128::new(25_000_000_000));
        assert_eq!(progress.percent_complete, Decimal::from_ratio(100u128, 1u128));
    }

    #[test]
    fn empty_history_is_zero_progress() {
        let progress = CommitProgress::from_records(vec![], Uint128::new(25_000_000_000));
        assert_eq!(progress.participants, 0);
        assert_eq!(progress.percent_complete, Decimal::zero());
        assert!(progress.timeline.is_empty());
    }
}
