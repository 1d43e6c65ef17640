//! Token budget and end-of-sale split between burn and pool.

use crate::types::{Sale, SaleParams};
use crate::LaunchError;

/// Sale tokens a seller must escrow at creation: hardcap-priced sale tokens,
/// hardcap-priced listing tokens and the referral pool.
pub fn token_budget(params: &SaleParams) -> Result<i128, LaunchError> {
    let sold = params
        .hardcap
        .checked_mul(params.tokens_per_unit)
        .ok_or(LaunchError::ArithmeticOverflow)?;
    let listed = params
        .hardcap
        .checked_mul(params.tokens_per_unit_listing)
        .ok_or(LaunchError::ArithmeticOverflow)?;
    sold.checked_add(listed)
        .and_then(|v| v.checked_add(params.reward_pool))
        .ok_or(LaunchError::ArithmeticOverflow)
}

/// Amounts moved when a sale lists.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ListingPlan {
    /// Pairing asset committed to the pool.
    pub liquidity: i128,
    /// Pairing asset returned to the seller (collection beyond hardcap).
    pub excess: i128,
    /// Sale tokens committed to the pool.
    pub pool_tokens: i128,
    /// Unsold sale tokens plus the undistributed referral pool.
    pub burn: i128,
}

pub fn plan_listing(sale: &Sale) -> Result<ListingPlan, LaunchError> {
    let liquidity = sale.collected.min(sale.hardcap);
    let excess = sale.collected - liquidity;
    let shortfall = sale.hardcap - liquidity;

    let per_unit = sale
        .tokens_per_unit
        .checked_add(sale.tokens_per_unit_listing)
        .ok_or(LaunchError::ArithmeticOverflow)?;
    let burn = shortfall
        .checked_mul(per_unit)
        .and_then(|v| v.checked_add(sale.reward_pool))
        .ok_or(LaunchError::ArithmeticOverflow)?;
    let pool_tokens = liquidity
        .checked_mul(sale.tokens_per_unit_listing)
        .ok_or(LaunchError::ArithmeticOverflow)?;

    Ok(ListingPlan {
        liquidity,
        excess,
        pool_tokens,
        burn,
    })
}
