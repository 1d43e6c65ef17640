#![no_std]
#![deny(unsafe_code)]
#![deny(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, Env, String, Symbol, Vec,
};

pub mod allocation;
pub mod listing;
mod lock;
mod storage;
mod types;
mod venue;

pub use crate::types::{
    ClaimPayout, Config, FinalizeOutcome, PairingAsset, Participant, Sale, SaleParams, SaleStatus,
};
pub use crate::venue::{LiquidityReceipt, LiquidityVenue, LiquidityVenueClient};

use crate::lock::SaleLock;
use crate::storage::DataKey;

/// Contract error codes. Missing signatures are signaled by host panic (require_auth).
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(u32)]
pub enum LaunchError {
    /// softcap must be positive and strictly below hardcap.
    InvalidCaps = 1,
    /// start_time must precede end_time and end_time must be in the future.
    InvalidWindow = 2,
    /// Exchange rates must be positive.
    InvalidRate = 3,
    /// referral_reward_percentage exceeded 10.
    InvalidReferralPercentage = 4,
    /// Per-account limit enabled with a non-positive value.
    InvalidLimit = 5,
    /// Amount is negative or zero where a positive value is required.
    InvalidAmount = 6,
    /// Pairing asset is the sale token itself.
    SameAsset = 7,
    /// Non-native pairing asset is not on the admin whitelist.
    PairingAssetNotWhitelisted = 8,
    /// A value * rate product or a budget sum does not fit in i128.
    ArithmeticOverflow = 9,
    /// Referrer is the payer.
    InvalidReferrer = 10,
    /// Caller is not the contract admin.
    NotAuthorized = 11,
    /// Caller is not the seller of this sale.
    NotSeller = 12,
    /// Payer is a known intermediary contract.
    IntermediaryCaller = 13,
    /// Contract is not initialized.
    NotInitialized = 14,
    AlreadyInitialized = 15,
    /// Contributions and sale creation are paused.
    ContractPaused = 16,
    SaleNotFound = 17,
    /// Sale window is not open.
    SaleNotActive = 18,
    SaleListed = 19,
    SaleCanceled = 20,
    /// Window still open and hardcap not reached.
    FinalizeNotAvailable = 21,
    /// Window is open; cancel only before start or after the window.
    CancelNotAvailable = 22,
    /// Sale has no settled outcome yet.
    ClaimNotAvailable = 23,
    /// Nested call into a sale that is already executing.
    Reentrancy = 24,
    /// Payment accepts zero tokens (dust, or no room left under a cap).
    InsufficientAmount = 25,
    NothingToClaim = 26,
    /// An asset transfer or burn did not succeed.
    TransferFailed = 27,
    /// The liquidity venue rejected a query or the pool funding.
    ListingFailed = 28,
    /// Cancel reason exceeds MAX_REASON_LENGTH.
    ReasonTooLong = 29,
}

// ── Event symbols ────────────────────────────────────────────
const EVENT_INIT: Symbol = symbol_short!("init");
const EVENT_SALE_NEW: Symbol = symbol_short!("sale_new");
const EVENT_CONTRIB: Symbol = symbol_short!("contrib");
const EVENT_EXCESS: Symbol = symbol_short!("excess");
const EVENT_REFERRAL: Symbol = symbol_short!("referral");
const EVENT_LISTED: Symbol = symbol_short!("listed");
const EVENT_CANCELED: Symbol = symbol_short!("canceled");
const EVENT_SOFT_FAIL: Symbol = symbol_short!("softfail");
const EVENT_CLAIM: Symbol = symbol_short!("claim");
const EVENT_REFUND: Symbol = symbol_short!("refund");
const EVENT_PAUSED: Symbol = symbol_short!("paused");
const EVENT_UNPAUSED: Symbol = symbol_short!("unpaused");
const EVENT_WHITELIST_SET: Symbol = symbol_short!("wl_set");
const EVENT_INTERMEDIARY_SET: Symbol = symbol_short!("inter_set");
const EVENT_FEE_SET: Symbol = symbol_short!("fee_set");

/// Contract version identifier. Bumped when storage or semantics change.
pub const CONTRACT_VERSION: u32 = 1;

/// Upper bound on `referral_reward_percentage`.
pub const MAX_REFERRAL_PERCENTAGE: u32 = 10;

/// Maximum number of sale ids returned in a single page.
const MAX_PAGE_LIMIT: u32 = 20;

/// Maximum cancel reason length in bytes.
const MAX_REASON_LENGTH: u32 = 256;

/// Recorded when finalize finds someone else already funded the pair.
const REASON_POOL_EXISTS: &str = "liquidity pool already exists";

// ── Contract ─────────────────────────────────────────────────
#[contract]
pub struct Launchpad;

impl Launchpad {
    fn require_admin(env: &Env, caller: &Address) -> Result<Config, LaunchError> {
        caller.require_auth();
        let config = storage::get_config(env)?;
        if *caller != config.admin {
            return Err(LaunchError::NotAuthorized);
        }
        Ok(config)
    }

    fn require_not_paused(env: &Env) -> Result<(), LaunchError> {
        if storage::is_paused(env) {
            return Err(LaunchError::ContractPaused);
        }
        Ok(())
    }

    fn pairing_address(config: &Config, asset: &PairingAsset) -> Address {
        match asset {
            PairingAsset::Native => config.native_asset.clone(),
            PairingAsset::Token(addr) => addr.clone(),
        }
    }

    fn validate_params(
        env: &Env,
        config: &Config,
        params: &SaleParams,
        now: u64,
    ) -> Result<(), LaunchError> {
        if params.softcap <= 0 || params.softcap >= params.hardcap {
            return Err(LaunchError::InvalidCaps);
        }
        if params.start_time >= params.end_time || params.end_time <= now {
            return Err(LaunchError::InvalidWindow);
        }
        if params.tokens_per_unit <= 0 || params.tokens_per_unit_listing <= 0 {
            return Err(LaunchError::InvalidRate);
        }
        if params.referral_reward_percentage > MAX_REFERRAL_PERCENTAGE {
            return Err(LaunchError::InvalidReferralPercentage);
        }
        if params.reward_pool < 0 {
            return Err(LaunchError::InvalidAmount);
        }
        if params.limit_per_account_enabled && params.limit_per_account <= 0 {
            return Err(LaunchError::InvalidLimit);
        }
        let pairing = Self::pairing_address(config, &params.pairing_asset);
        if pairing == params.token {
            return Err(LaunchError::SameAsset);
        }
        if let PairingAsset::Token(asset) = &params.pairing_asset {
            if !storage::get_flag(env, &DataKey::PairingWhitelist(asset.clone())) {
                return Err(LaunchError::PairingAssetNotWhitelisted);
            }
        }
        Ok(())
    }

    /// Transfer `amount` of `asset`; zero is a no-op.
    fn pay(
        env: &Env,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), LaunchError> {
        if amount == 0 {
            return Ok(());
        }
        match token::Client::new(env, asset).try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(LaunchError::TransferFailed),
        }
    }

    fn burn(env: &Env, asset: &Address, amount: i128) -> Result<(), LaunchError> {
        if amount == 0 {
            return Ok(());
        }
        let holder = env.current_contract_address();
        match token::Client::new(env, asset).try_burn(&holder, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(LaunchError::TransferFailed),
        }
    }

    fn add(a: i128, b: i128) -> Result<i128, LaunchError> {
        a.checked_add(b).ok_or(LaunchError::ArithmeticOverflow)
    }

    /// True when the venue already holds liquidity for the pair.
    fn pool_is_funded(
        venue: &LiquidityVenueClient,
        token_a: &Address,
        token_b: &Address,
    ) -> Result<bool, LaunchError> {
        let pair = match venue.try_get_pair(token_a, token_b) {
            Ok(Ok(pair)) => pair,
            _ => return Err(LaunchError::ListingFailed),
        };
        if pair.is_none() {
            return Ok(false);
        }
        match venue.try_get_reserves(token_a, token_b) {
            Ok(Ok((reserve_a, reserve_b))) => Ok(reserve_a > 0 || reserve_b > 0),
            _ => Err(LaunchError::ListingFailed),
        }
    }
}

#[contractimpl]
impl Launchpad {
    // ── Configuration ─────────────────────────────────────────

    /// Initialize admin, native asset, liquidity venue and the creation fee.
    /// Can only be called once.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_asset: Address,
        venue: Address,
        fee_recipient: Address,
        creation_fee: i128,
    ) -> Result<(), LaunchError> {
        admin.require_auth();
        if env.storage().instance().has(&DataKey::Config) {
            return Err(LaunchError::AlreadyInitialized);
        }
        if creation_fee < 0 {
            return Err(LaunchError::InvalidAmount);
        }
        let config = Config {
            admin: admin.clone(),
            native_asset,
            venue,
            fee_recipient,
            creation_fee,
        };
        storage::set_config(&env, &config);
        storage::set_paused(&env, false);
        storage::bump_instance(&env);
        env.events().publish((EVENT_INIT, admin), creation_fee);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<Config, LaunchError> {
        storage::get_config(&env)
    }

    /// Change the flat creation fee (admin only). 0 disables it.
    pub fn set_creation_fee(env: Env, caller: Address, fee: i128) -> Result<(), LaunchError> {
        let mut config = Self::require_admin(&env, &caller)?;
        if fee < 0 {
            return Err(LaunchError::InvalidAmount);
        }
        let previous = config.creation_fee;
        config.creation_fee = fee;
        storage::set_config(&env, &config);
        env.events().publish((EVENT_FEE_SET, caller), (previous, fee));
        Ok(())
    }

    /// Pause sale creation and contributions (admin only). Idempotent.
    /// Finalize, cancel and claim stay available.
    pub fn pause(env: Env, caller: Address) -> Result<(), LaunchError> {
        Self::require_admin(&env, &caller)?;
        storage::set_paused(&env, true);
        env.events().publish((EVENT_PAUSED, caller), ());
        Ok(())
    }

    /// Unpause (admin only). Idempotent.
    pub fn unpause(env: Env, caller: Address) -> Result<(), LaunchError> {
        Self::require_admin(&env, &caller)?;
        storage::set_paused(&env, false);
        env.events().publish((EVENT_UNPAUSED, caller), ());
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    /// Allow or disallow a token as pairing asset for new sales (admin only).
    pub fn set_pairing_whitelisted(
        env: Env,
        caller: Address,
        asset: Address,
        allowed: bool,
    ) -> Result<(), LaunchError> {
        Self::require_admin(&env, &caller)?;
        storage::set_flag(&env, &DataKey::PairingWhitelist(asset.clone()), allowed);
        env.events().publish((EVENT_WHITELIST_SET, caller), (asset, allowed));
        Ok(())
    }

    pub fn is_pairing_whitelisted(env: Env, asset: Address) -> bool {
        storage::get_flag(&env, &DataKey::PairingWhitelist(asset))
    }

    /// Flag a contract as an intermediary that may not contribute (admin only).
    pub fn set_intermediary(
        env: Env,
        caller: Address,
        who: Address,
        flagged: bool,
    ) -> Result<(), LaunchError> {
        Self::require_admin(&env, &caller)?;
        storage::set_flag(&env, &DataKey::Intermediary(who.clone()), flagged);
        env.events().publish((EVENT_INTERMEDIARY_SET, caller), (who, flagged));
        Ok(())
    }

    pub fn is_intermediary(env: Env, who: Address) -> bool {
        storage::get_flag(&env, &DataKey::Intermediary(who))
    }

    // ── Sale creation and registry ────────────────────────────

    /// Create a sale and escrow its full token budget from the seller.
    ///
    /// The budget is `hardcap * tokens_per_unit + hardcap * tokens_per_unit_listing
    /// + reward_pool`. The creation fee, when set, is paid in the native asset
    /// to the fee recipient. Returns the new sale id.
    pub fn create_sale(env: Env, seller: Address, params: SaleParams) -> Result<u64, LaunchError> {
        storage::bump_instance(&env);
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&env)?;
        seller.require_auth();

        let now = env.ledger().timestamp();
        Self::validate_params(&env, &config, &params, now)?;
        let budget = listing::token_budget(&params)?;

        let id = storage::register_sale(&env, &seller);
        let sale = Sale {
            id,
            seller: seller.clone(),
            token: params.token.clone(),
            pairing_asset: params.pairing_asset.clone(),
            softcap: params.softcap,
            hardcap: params.hardcap,
            start_time: params.start_time,
            end_time: params.end_time,
            tokens_per_unit: params.tokens_per_unit,
            tokens_per_unit_listing: params.tokens_per_unit_listing,
            collected: 0,
            limit_per_account_enabled: params.limit_per_account_enabled,
            limit_per_account: params.limit_per_account,
            referral_reward_percentage: params.referral_reward_percentage,
            reward_pool: params.reward_pool,
            token_inventory: budget,
            is_listed: false,
            is_canceled: false,
            cancel_reason: String::from_str(&env, ""),
            created_at: now,
        };
        storage::set_sale(&env, &sale);

        let contract = env.current_contract_address();
        Self::pay(
            &env,
            &config.native_asset,
            &seller,
            &config.fee_recipient,
            config.creation_fee,
        )?;
        Self::pay(&env, &params.token, &seller, &contract, budget)?;

        env.events().publish(
            (EVENT_SALE_NEW, seller, id),
            (
                params.token,
                params.pairing_asset,
                params.softcap,
                params.hardcap,
                params.start_time,
                params.end_time,
                budget,
            ),
        );
        Ok(id)
    }

    pub fn get_sale(env: Env, sale_id: u64) -> Option<Sale> {
        storage::get_sale(&env, sale_id).ok()
    }

    pub fn get_status(env: Env, sale_id: u64) -> Result<SaleStatus, LaunchError> {
        let sale = storage::get_sale(&env, sale_id)?;
        Ok(sale.status(env.ledger().timestamp()))
    }

    pub fn get_participant(env: Env, sale_id: u64, who: Address) -> Participant {
        storage::get_participant(&env, sale_id, &who)
    }

    pub fn get_liquidity_receipt(env: Env, sale_id: u64) -> Option<LiquidityReceipt> {
        storage::get_receipt(&env, sale_id)
    }

    /// Total number of sales ever created.
    pub fn get_sale_count(env: Env) -> u64 {
        storage::sale_count(&env)
    }

    /// Return a page of sale ids in creation order. Limit capped at MAX_PAGE_LIMIT (20).
    pub fn get_sales_page(env: Env, start: u64, limit: u32) -> (Vec<u64>, Option<u64>) {
        let count = storage::sale_count(&env);
        let effective_limit = if limit == 0 || limit > MAX_PAGE_LIMIT {
            MAX_PAGE_LIMIT
        } else {
            limit
        };

        if start >= count {
            return (Vec::new(&env), None);
        }

        let end = core::cmp::min(start + effective_limit as u64, count);
        let mut ids = Vec::new(&env);
        for id in start..end {
            ids.push_back(id);
        }
        let next_cursor = if end < count { Some(end) } else { None };
        (ids, next_cursor)
    }

    /// Sale ids created by `seller`, in creation order.
    pub fn get_seller_sales(env: Env, seller: Address) -> Vec<u64> {
        storage::seller_sales(&env, &seller)
    }

    // ── Contribution ──────────────────────────────────────────

    /// Contribute `amount` of the sale's pairing asset. The full amount is
    /// pulled, clipped against the per-account limit (below softcap only) and
    /// the hardcap, and the clipped-off excess is refunded in the same call.
    /// Returns the accepted amount.
    pub fn contribute(
        env: Env,
        sale_id: u64,
        payer: Address,
        amount: i128,
        referrer: Option<Address>,
    ) -> Result<i128, LaunchError> {
        storage::bump_instance(&env);
        let config = storage::get_config(&env)?;
        Self::require_not_paused(&env)?;
        payer.require_auth();
        if storage::get_flag(&env, &DataKey::Intermediary(payer.clone())) {
            return Err(LaunchError::IntermediaryCaller);
        }
        let _lock = SaleLock::acquire(&env, sale_id)?;

        let mut sale = storage::get_sale(&env, sale_id)?;
        match sale.status(env.ledger().timestamp()) {
            SaleStatus::Active => {}
            SaleStatus::Listed => return Err(LaunchError::SaleListed),
            SaleStatus::Canceled => return Err(LaunchError::SaleCanceled),
            _ => return Err(LaunchError::SaleNotActive),
        }
        if referrer.as_ref() == Some(&payer) {
            return Err(LaunchError::InvalidReferrer);
        }

        let mut participant = storage::get_participant(&env, sale_id, &payer);
        let alloc = allocation::allocate(&sale, participant.contributed, amount)?;

        participant.token_credit = Self::add(participant.token_credit, alloc.tokens)?;
        participant.contributed = Self::add(participant.contributed, alloc.usable)?;
        sale.collected = Self::add(sale.collected, alloc.usable)?;

        let mut reward = 0;
        if let Some(referrer) = &referrer {
            reward = allocation::referral_reward(
                alloc.tokens,
                sale.referral_reward_percentage,
                sale.reward_pool,
            )?;
            if reward > 0 {
                sale.reward_pool -= reward;
                let mut referred = storage::get_participant(&env, sale_id, referrer);
                referred.referral_credit = Self::add(referred.referral_credit, reward)?;
                storage::set_participant(&env, sale_id, referrer, &referred);
            }
        }
        storage::set_participant(&env, sale_id, &payer, &participant);
        storage::set_sale(&env, &sale);

        // Interactions only after every balance above is committed.
        let asset = Self::pairing_address(&config, &sale.pairing_asset);
        let contract = env.current_contract_address();
        Self::pay(&env, &asset, &payer, &contract, amount)?;
        Self::pay(&env, &asset, &contract, &payer, alloc.excess)?;

        env.events().publish(
            (EVENT_CONTRIB, sale_id, payer.clone()),
            (alloc.usable, alloc.tokens, sale.collected),
        );
        if alloc.excess > 0 {
            env.events().publish((EVENT_EXCESS, sale_id, payer), alloc.excess);
        }
        if let Some(referrer) = referrer {
            if reward > 0 {
                env.events().publish(
                    (EVENT_REFERRAL, sale_id, referrer),
                    (reward, sale.reward_pool),
                );
            }
        }
        Ok(alloc.usable)
    }

    // ── Finalization ──────────────────────────────────────────

    /// Close out a sale once its window has elapsed or its hardcap is reached.
    ///
    /// - Below softcap: nothing changes; participants claim refunds.
    /// - A funded pool for the pair already exists: the sale is canceled.
    /// - Otherwise: unsold inventory and the leftover reward pool are burned
    ///   and the raise is committed to the venue together with
    ///   `liquidity * tokens_per_unit_listing` sale tokens.
    ///
    /// Any failed transfer or venue call aborts the whole call.
    pub fn finalize(
        env: Env,
        sale_id: u64,
        caller: Address,
    ) -> Result<FinalizeOutcome, LaunchError> {
        storage::bump_instance(&env);
        let config = storage::get_config(&env)?;
        caller.require_auth();
        let _lock = SaleLock::acquire(&env, sale_id)?;

        let mut sale = storage::get_sale(&env, sale_id)?;
        if sale.is_listed {
            return Err(LaunchError::SaleListed);
        }
        if sale.is_canceled {
            return Err(LaunchError::SaleCanceled);
        }
        let now = env.ledger().timestamp();
        if now <= sale.end_time && sale.collected < sale.hardcap {
            return Err(LaunchError::FinalizeNotAvailable);
        }

        if sale.collected < sale.softcap {
            env.events().publish(
                (EVENT_SOFT_FAIL, sale_id, caller),
                (sale.collected, sale.softcap),
            );
            return Ok(FinalizeOutcome::BelowSoftcap);
        }

        let asset = Self::pairing_address(&config, &sale.pairing_asset);
        let venue = LiquidityVenueClient::new(&env, &config.venue);
        if Self::pool_is_funded(&venue, &sale.token, &asset)? {
            sale.is_canceled = true;
            sale.end_time = now;
            sale.cancel_reason = String::from_str(&env, REASON_POOL_EXISTS);
            storage::set_sale(&env, &sale);
            env.events().publish(
                (EVENT_CANCELED, sale_id, caller),
                sale.cancel_reason.clone(),
            );
            return Ok(FinalizeOutcome::Canceled);
        }

        let plan = listing::plan_listing(&sale)?;
        sale.is_listed = true;
        sale.end_time = now;
        sale.reward_pool = 0;
        sale.token_inventory = sale
            .token_inventory
            .checked_sub(plan.burn)
            .and_then(|v| v.checked_sub(plan.pool_tokens))
            .ok_or(LaunchError::ArithmeticOverflow)?;
        storage::set_sale(&env, &sale);

        let contract = env.current_contract_address();
        Self::pay(&env, &asset, &contract, &sale.seller, plan.excess)?;
        Self::burn(&env, &sale.token, plan.burn)?;
        Self::pay(&env, &sale.token, &contract, &config.venue, plan.pool_tokens)?;
        Self::pay(&env, &asset, &contract, &config.venue, plan.liquidity)?;
        let receipt = match venue.try_create_pair_and_fund(
            &sale.token,
            &asset,
            &plan.pool_tokens,
            &plan.liquidity,
            &sale.seller,
        ) {
            Ok(Ok(receipt)) => receipt,
            _ => return Err(LaunchError::ListingFailed),
        };
        storage::set_receipt(&env, sale_id, &receipt);

        env.events().publish(
            (EVENT_LISTED, sale_id, caller),
            (plan.liquidity, plan.pool_tokens, plan.burn, receipt.pair),
        );
        Ok(FinalizeOutcome::Listed)
    }

    /// Cancel a sale (seller only) before it starts or after its window.
    pub fn cancel(
        env: Env,
        sale_id: u64,
        caller: Address,
        reason: String,
    ) -> Result<(), LaunchError> {
        storage::bump_instance(&env);
        caller.require_auth();
        let _lock = SaleLock::acquire(&env, sale_id)?;

        let mut sale = storage::get_sale(&env, sale_id)?;
        if caller != sale.seller {
            return Err(LaunchError::NotSeller);
        }
        if sale.is_listed {
            return Err(LaunchError::SaleListed);
        }
        if sale.is_canceled {
            return Err(LaunchError::SaleCanceled);
        }
        // Closed for the whole window, even once the hardcap is reached.
        let now = env.ledger().timestamp();
        if now >= sale.start_time && now <= sale.end_time {
            return Err(LaunchError::CancelNotAvailable);
        }
        if reason.len() > MAX_REASON_LENGTH {
            return Err(LaunchError::ReasonTooLong);
        }

        sale.is_canceled = true;
        sale.end_time = now;
        sale.cancel_reason = reason.clone();
        storage::set_sale(&env, &sale);

        env.events().publish((EVENT_CANCELED, sale_id, caller), reason);
        Ok(())
    }

    // ── Settlement ────────────────────────────────────────────

    /// Settle `claimant`'s position, once.
    ///
    /// Listed sales pay token and referral credits in the sale token.
    /// Canceled sales, and sales whose window closed below softcap, refund the
    /// contribution in the pairing asset; the seller also receives the sale's
    /// remaining token inventory. Balances are zeroed before any transfer.
    pub fn claim(env: Env, sale_id: u64, claimant: Address) -> Result<ClaimPayout, LaunchError> {
        storage::bump_instance(&env);
        let config = storage::get_config(&env)?;
        claimant.require_auth();
        let _lock = SaleLock::acquire(&env, sale_id)?;

        let mut sale = storage::get_sale(&env, sale_id)?;
        let mut participant = storage::get_participant(&env, sale_id, &claimant);
        let contract = env.current_contract_address();

        match sale.status(env.ledger().timestamp()) {
            SaleStatus::Listed => {
                let owed = Self::add(participant.token_credit, participant.referral_credit)?;
                if owed == 0 {
                    return Err(LaunchError::NothingToClaim);
                }
                participant.token_credit = 0;
                participant.referral_credit = 0;
                participant.claimed = true;
                storage::set_participant(&env, sale_id, &claimant, &participant);
                sale.token_inventory = sale
                    .token_inventory
                    .checked_sub(owed)
                    .ok_or(LaunchError::ArithmeticOverflow)?;
                storage::set_sale(&env, &sale);

                Self::pay(&env, &sale.token, &contract, &claimant, owed)?;

                env.events().publish((EVENT_CLAIM, sale_id, claimant), owed);
                Ok(ClaimPayout {
                    refund: 0,
                    tokens: owed,
                })
            }
            SaleStatus::Canceled | SaleStatus::ClosedBelowSoftcap => {
                let refund = participant.contributed;
                let tokens = if claimant == sale.seller {
                    sale.token_inventory
                } else {
                    0
                };
                if refund == 0 && tokens == 0 {
                    return Err(LaunchError::NothingToClaim);
                }
                participant.contributed = 0;
                participant.token_credit = 0;
                participant.referral_credit = 0;
                participant.claimed = true;
                storage::set_participant(&env, sale_id, &claimant, &participant);
                if tokens > 0 {
                    sale.token_inventory = 0;
                    storage::set_sale(&env, &sale);
                }

                let asset = Self::pairing_address(&config, &sale.pairing_asset);
                Self::pay(&env, &asset, &contract, &claimant, refund)?;
                Self::pay(&env, &sale.token, &contract, &claimant, tokens)?;

                env.events().publish((EVENT_REFUND, sale_id, claimant), (refund, tokens));
                Ok(ClaimPayout { refund, tokens })
            }
            _ => Err(LaunchError::ClaimNotAvailable),
        }
    }

    /// Return the current contract version.
    pub fn get_version(env: Env) -> u32 {
        let _ = env;
        CONTRACT_VERSION
    }
}

mod test_auth;
mod test_props;
mod test_venue;
