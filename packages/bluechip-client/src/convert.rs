//! Decimal-string to micro-unit conversions and deadline arithmetic.
//!
//! All validation happens here, before anything touches the network: a bad
//! amount never produces a signed transaction.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use cosmwasm_std::{Decimal, Uint128, Uint64};

use crate::error::{ClientError, ClientResult};

const BPS_DENOMINATOR: u128 = 10_000;
/// Matches the pool contract's maximum allowed slippage (50%).
const MAX_SLIPPAGE_BPS: u128 = 5_000;

/// Converts a human decimal string into micro-units, flooring excess
/// precision. `"25.5"` at 6 decimals becomes `25_500_000`.
///
/// Zero, negative and non-numeric input are rejected.
pub fn to_micro_units(amount: &str, decimals: u8) -> ClientResult<Uint128> {
    let parsed = Decimal::from_str(amount.trim()).map_err(|e| ClientError::InvalidAmount {
        input: amount.to_owned(),
        reason: e.to_string(),
    })?;
    if parsed.is_zero() {
        return Err(ClientError::InvalidAmount {
            input: amount.to_owned(),
            reason: "amount must be greater than zero".to_owned(),
        });
    }
    // Decimal carries 18 fractional digits; dividing the atomics down to the
    // token's precision floors anything finer.
    if decimals > 18 {
        return Err(ClientError::InvalidAmount {
            input: amount.to_owned(),
            reason: format!("unsupported token precision of {decimals} decimals"),
        });
    }
    let scale = Uint128::from(10u128.pow(u32::from(18 - decimals)));
    let micro = parsed.atomics() / scale;
    if micro.is_zero() {
        return Err(ClientError::InvalidAmount {
            input: amount.to_owned(),
            reason: format!("amount is below one micro-unit at {decimals} decimals"),
        });
    }
    Ok(micro)
}

/// Renders micro-units back into a human decimal string, trimming trailing
/// zeros. The inverse of [`to_micro_units`] up to flooring.
pub fn from_micro_units(amount: Uint128, decimals: u8) -> String {
    let scale = 10u128.pow(u32::from(decimals));
    let whole = amount.u128() / scale;
    let frac = amount.u128() % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0width$}", width = decimals as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Wall-clock milliseconds since the unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Absolute transaction deadline in nanoseconds, `minutes` from `now_ms`.
/// Zero minutes means no deadline; a deadline past the u64 nanosecond range
/// is rejected.
pub fn deadline_ns(now_ms: u64, minutes: u64) -> ClientResult<Option<Uint64>> {
    if minutes == 0 {
        return Ok(None);
    }
    let deadline_ms = minutes
        .checked_mul(60_000)
        .and_then(|offset| offset.checked_add(now_ms))
        .ok_or(ClientError::InvalidDeadline(minutes))?;
    let deadline_ns = deadline_ms
        .checked_mul(1_000_000)
        .ok_or(ClientError::InvalidDeadline(minutes))?;
    Ok(Some(Uint64::new(deadline_ns)))
}

/// Parses a percent string (`"0.5"` = 0.5%) into basis points, flooring.
/// Anything outside (0, 50]% is rejected.
pub fn slippage_bps(percent: &str) -> ClientResult<u16> {
    let parsed = Decimal::from_str(percent.trim())
        .map_err(|_| ClientError::InvalidSlippage(percent.to_owned()))?;
    // percent -> bps is a factor of 100
    let bps = (parsed.atomics() / Uint128::from(10u128.pow(16))).u128();
    if bps == 0 || bps > MAX_SLIPPAGE_BPS {
        return Err(ClientError::InvalidSlippage(percent.to_owned()));
    }
    Ok(bps as u16)
}

/// The smallest acceptable amount after applying a slippage bound, floored.
pub fn min_after_slippage(amount: Uint128, bps: u16) -> Uint128 {
    amount.multiply_ratio(BPS_DENOMINATOR - u128::from(bps), BPS_DENOMINATOR)
}

/// Basis points as a `Decimal` fraction, for `max_spread` fields.
pub fn bps_to_decimal(bps: u16) -> Decimal {
    Decimal::from_ratio(u128::from(bps), BPS_DENOMINATOR)
}
