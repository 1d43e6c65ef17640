use soroban_sdk::{contractclient, contracttype, Address, Env};

/// What the venue hands back after a pool has been funded.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityReceipt {
    pub pair: Address,
    pub amount_token: i128,
    pub amount_pairing: i128,
    /// Pool shares minted to `lp_to`.
    pub liquidity: i128,
}

/// Pool registry the launchpad lists into.
///
/// `create_pair_and_fund` expects both legs to have been transferred to the
/// venue address by the caller beforehand; it creates the pair when absent,
/// books the deposit and mints pool shares to `lp_to`.
#[contractclient(name = "LiquidityVenueClient")]
pub trait LiquidityVenue {
    fn get_pair(env: Env, token_a: Address, token_b: Address) -> Option<Address>;

    fn get_reserves(env: Env, token_a: Address, token_b: Address) -> (i128, i128);

    fn create_pair_and_fund(
        env: Env,
        token_a: Address,
        token_b: Address,
        amount_a: i128,
        amount_b: i128,
        lp_to: Address,
    ) -> LiquidityReceipt;
}
