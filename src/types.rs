use soroban_sdk::{contracttype, Address, String};

/// Asset accepted as payment for a sale.
/// `Native` resolves to the native asset contract held in [`Config`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PairingAsset {
    Native,
    Token(Address),
}

/// Contract-wide configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Stellar Asset Contract of the native currency.
    pub native_asset: Address,
    /// Liquidity venue used for listing.
    pub venue: Address,
    pub fee_recipient: Address,
    /// Flat fee in the native asset charged on `create_sale` (0 = free).
    pub creation_fee: i128,
}

/// Terms supplied by the seller on `create_sale`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleParams {
    pub token: Address,
    pub pairing_asset: PairingAsset,
    pub softcap: i128,
    pub hardcap: i128,
    pub start_time: u64,
    pub end_time: u64,
    /// Sale tokens credited per accepted unit of the pairing asset.
    pub tokens_per_unit: i128,
    /// Sale tokens committed to the pool per listed unit of the pairing asset.
    pub tokens_per_unit_listing: i128,
    pub limit_per_account_enabled: bool,
    pub limit_per_account: i128,
    /// Referral reward in percent of the tokens earned (0..=10).
    pub referral_reward_percentage: u32,
    pub reward_pool: i128,
}

/// Per-sale ledger record. Never removed; terminal once listed or canceled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sale {
    pub id: u64,
    pub seller: Address,
    pub token: Address,
    pub pairing_asset: PairingAsset,
    pub softcap: i128,
    pub hardcap: i128,
    pub start_time: u64,
    /// Rewritten to the current time on cancel and finalize.
    pub end_time: u64,
    pub tokens_per_unit: i128,
    pub tokens_per_unit_listing: i128,
    /// Accepted pairing-asset amount, always `<= hardcap`.
    pub collected: i128,
    pub limit_per_account_enabled: bool,
    pub limit_per_account: i128,
    pub referral_reward_percentage: u32,
    /// Remaining referral budget; only ever decreases.
    pub reward_pool: i128,
    /// Sale tokens held in custody for this sale.
    pub token_inventory: i128,
    pub is_listed: bool,
    pub is_canceled: bool,
    pub cancel_reason: String,
    pub created_at: u64,
}

/// Balances owed to one identity within one sale. Zeroed, not removed, on claim.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Participant {
    pub contributed: i128,
    pub token_credit: i128,
    pub referral_credit: i128,
    pub claimed: bool,
}

/// Lifecycle phase derived from the sale record and the ledger clock.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaleStatus {
    Pending = 0,
    Active = 1,
    /// Window closed (or hardcap hit) with softcap met; finalize not yet run.
    AwaitingFinalization = 2,
    ClosedBelowSoftcap = 3,
    Listed = 4,
    Canceled = 5,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FinalizeOutcome {
    BelowSoftcap = 0,
    Canceled = 1,
    Listed = 2,
}

impl Sale {
    /// Phase at ledger time `now`.
    pub fn status(&self, now: u64) -> SaleStatus {
        if self.is_listed {
            SaleStatus::Listed
        } else if self.is_canceled {
            SaleStatus::Canceled
        } else if now < self.start_time {
            SaleStatus::Pending
        } else if now <= self.end_time && self.collected < self.hardcap {
            SaleStatus::Active
        } else if now <= self.end_time || self.collected >= self.softcap {
            SaleStatus::AwaitingFinalization
        } else {
            SaleStatus::ClosedBelowSoftcap
        }
    }
}

/// What a claim paid out, per asset.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClaimPayout {
    /// Pairing asset refunded.
    pub refund: i128,
    /// Sale tokens transferred (credits on listing, inventory to the seller on refund).
    pub tokens: i128,
}
