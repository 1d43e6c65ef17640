//! Contribution clipping and referral math. Pure functions over a [`Sale`]
//! snapshot; the contract applies the result.

use crate::types::Sale;
use crate::LaunchError;

/// Split of one incoming payment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Allocation {
    /// Part of the payment accepted into `collected`.
    pub usable: i128,
    /// Part of the payment returned to the payer in the same call.
    pub excess: i128,
    /// Sale tokens credited for `usable`.
    pub tokens: i128,
}

/// Clip `amount` against the per-account limit (only while below softcap)
/// and then against the hardcap. `contributed` is what the payer already has
/// in the sale.
pub fn allocate(sale: &Sale, contributed: i128, amount: i128) -> Result<Allocation, LaunchError> {
    if amount <= 0 {
        return Err(LaunchError::InvalidAmount);
    }
    let mut usable = amount;

    if sale.limit_per_account_enabled && sale.collected < sale.softcap {
        let room = sale.limit_per_account.saturating_sub(contributed).max(0);
        usable = usable.min(room);
    }

    let hard_room = sale.hardcap.saturating_sub(sale.collected).max(0);
    usable = usable.min(hard_room);

    let tokens = usable
        .checked_mul(sale.tokens_per_unit)
        .ok_or(LaunchError::ArithmeticOverflow)?;
    if tokens == 0 {
        return Err(LaunchError::InsufficientAmount);
    }

    Ok(Allocation {
        usable,
        excess: amount - usable,
        tokens,
    })
}

/// Reward owed to a referrer for `tokens` earned, bounded by what is left in
/// the pool.
pub fn referral_reward(tokens: i128, percentage: u32, pool: i128) -> Result<i128, LaunchError> {
    if pool <= 0 {
        return Ok(0);
    }
    let reward = tokens
        .checked_mul(percentage as i128)
        .ok_or(LaunchError::ArithmeticOverflow)?
        / 100;
    Ok(reward.min(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PairingAsset;
    use soroban_sdk::{testutils::Address as _, Address, Env, String};

    fn sale(env: &Env, softcap: i128, hardcap: i128, tokens_per_unit: i128) -> Sale {
        Sale {
            id: 0,
            seller: Address::generate(env),
            token: Address::generate(env),
            pairing_asset: PairingAsset::Native,
            softcap,
            hardcap,
            start_time: 0,
            end_time: 100,
            tokens_per_unit,
            tokens_per_unit_listing: 1,
            collected: 0,
            limit_per_account_enabled: false,
            limit_per_account: 0,
            referral_reward_percentage: 0,
            reward_pool: 0,
            token_inventory: 0,
            is_listed: false,
            is_canceled: false,
            cancel_reason: String::from_str(env, ""),
            created_at: 0,
        }
    }

    #[test]
    fn overshoot_is_clipped_to_hardcap() {
        let env = Env::default();
        let s = sale(&env, 10, 100, 5);
        let a = allocate(&s, 0, 150).unwrap();
        assert_eq!(
            a,
            Allocation {
                usable: 100,
                excess: 50,
                tokens: 500
            }
        );
    }

    #[test]
    fn account_limit_applies_below_softcap() {
        let env = Env::default();
        let mut s = sale(&env, 50, 100, 1);
        s.limit_per_account_enabled = true;
        s.limit_per_account = 20;
        s.collected = 15;
        let a = allocate(&s, 15, 10).unwrap();
        assert_eq!(a.usable, 5);
        assert_eq!(a.excess, 5);
    }

    #[test]
    fn account_limit_lifts_once_softcap_is_reached() {
        let env = Env::default();
        let mut s = sale(&env, 50, 100, 1);
        s.limit_per_account_enabled = true;
        s.limit_per_account = 20;
        s.collected = 50;
        let a = allocate(&s, 20, 30).unwrap();
        assert_eq!(a.usable, 30);
        assert_eq!(a.excess, 0);
    }

    #[test]
    fn both_clips_accumulate_excess() {
        let env = Env::default();
        let mut s = sale(&env, 50, 100, 1);
        s.limit_per_account_enabled = true;
        s.limit_per_account = 40;
        s.collected = 45;
        // limit leaves 40, hardcap leaves 55: the limit wins.
        assert_eq!(allocate(&s, 0, 70).unwrap().excess, 30);
        s.collected = 49;
        s.hardcap = 60;
        // limit leaves 40, hardcap leaves 11.
        let a = allocate(&s, 0, 70).unwrap();
        assert_eq!(a.usable, 11);
        assert_eq!(a.excess, 59);
    }

    #[test]
    fn exhausted_room_is_rejected_as_dust() {
        let env = Env::default();
        let mut s = sale(&env, 10, 100, 5);
        s.collected = 100;
        assert_eq!(allocate(&s, 0, 1), Err(LaunchError::InsufficientAmount));

        s.collected = 0;
        s.limit_per_account_enabled = true;
        s.limit_per_account = 5;
        assert_eq!(allocate(&s, 5, 3), Err(LaunchError::InsufficientAmount));
    }

    #[test]
    fn non_positive_amounts_are_invalid() {
        let env = Env::default();
        let s = sale(&env, 10, 100, 5);
        assert_eq!(allocate(&s, 0, 0), Err(LaunchError::InvalidAmount));
        assert_eq!(allocate(&s, 0, -4), Err(LaunchError::InvalidAmount));
    }

    #[test]
    fn token_overflow_is_reported() {
        let env = Env::default();
        let s = sale(&env, 10, i128::MAX, i128::MAX);
        assert_eq!(allocate(&s, 0, 2), Err(LaunchError::ArithmeticOverflow));
    }

    #[test]
    fn referral_reward_is_bounded_by_pool() {
        assert_eq!(referral_reward(1_000, 10, 1_000), Ok(100));
        assert_eq!(referral_reward(1_000, 10, 30), Ok(30));
        assert_eq!(referral_reward(1_000, 10, 0), Ok(0));
        assert_eq!(referral_reward(9, 10, 100), Ok(0));
    }
}
