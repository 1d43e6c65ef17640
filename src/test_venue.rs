#![cfg(test)]
//! In-test liquidity venues.

pub use broken::BrokenVenue;
pub use mock::{MockVenue, MockVenueClient};

mod mock {
    use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};

    use crate::LiquidityReceipt;

    #[contracttype]
    #[derive(Clone)]
    enum VenueKey {
        Reserves(Address, Address),
        Shares(Address),
    }

    /// Constant-product-shaped registry that only books deposits.
    #[contract]
    pub struct MockVenue;

    #[contractimpl]
    impl MockVenue {
        pub fn get_pair(env: Env, token_a: Address, token_b: Address) -> Option<Address> {
            let key = VenueKey::Reserves(token_a, token_b);
            if env.storage().persistent().has(&key) {
                Some(env.current_contract_address())
            } else {
                None
            }
        }

        pub fn get_reserves(env: Env, token_a: Address, token_b: Address) -> (i128, i128) {
            env.storage()
                .persistent()
                .get(&VenueKey::Reserves(token_a, token_b))
                .unwrap_or((0, 0))
        }

        pub fn create_pair_and_fund(
            env: Env,
            token_a: Address,
            token_b: Address,
            amount_a: i128,
            amount_b: i128,
            lp_to: Address,
        ) -> LiquidityReceipt {
            let me = env.current_contract_address();
            let key = VenueKey::Reserves(token_a.clone(), token_b.clone());
            let (reserve_a, reserve_b): (i128, i128) =
                env.storage().persistent().get(&key).unwrap_or((0, 0));
            let (reserve_a, reserve_b) = (reserve_a + amount_a, reserve_b + amount_b);

            // Both legs must already sit in the venue.
            assert!(token::Client::new(&env, &token_a).balance(&me) >= reserve_a);
            assert!(token::Client::new(&env, &token_b).balance(&me) >= reserve_b);
            env.storage()
                .persistent()
                .set(&key, &(reserve_a, reserve_b));

            let liquidity = core::cmp::min(amount_a, amount_b);
            let shares_key = VenueKey::Shares(lp_to);
            let shares: i128 = env.storage().persistent().get(&shares_key).unwrap_or(0);
            env.storage()
                .persistent()
                .set(&shares_key, &(shares + liquidity));

            LiquidityReceipt {
                pair: me,
                amount_token: amount_a,
                amount_pairing: amount_b,
                liquidity,
            }
        }

        /// Open the pair out of band, as a front-runner would.
        pub fn open_pair(
            env: Env,
            token_a: Address,
            token_b: Address,
            amount_a: i128,
            amount_b: i128,
        ) {
            env.storage()
                .persistent()
                .set(&VenueKey::Reserves(token_a, token_b), &(amount_a, amount_b));
        }

        pub fn shares(env: Env, who: Address) -> i128 {
            env.storage()
                .persistent()
                .get(&VenueKey::Shares(who))
                .unwrap_or(0)
        }
    }
}

mod broken {
    use soroban_sdk::{contract, contracterror, contractimpl, Address, Env};

    use crate::LiquidityReceipt;

    #[contracterror]
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    #[repr(u32)]
    pub enum VenueError {
        Rejected = 1,
    }

    /// Venue whose pool funding always fails.
    #[contract]
    pub struct BrokenVenue;

    #[contractimpl]
    impl BrokenVenue {
        pub fn get_pair(_env: Env, _token_a: Address, _token_b: Address) -> Option<Address> {
            None
        }

        pub fn get_reserves(_env: Env, _token_a: Address, _token_b: Address) -> (i128, i128) {
            (0, 0)
        }

        pub fn create_pair_and_fund(
            _env: Env,
            _token_a: Address,
            _token_b: Address,
            _amount_a: i128,
            _amount_b: i128,
            _lp_to: Address,
        ) -> Result<LiquidityReceipt, VenueError> {
            Err(VenueError::Rejected)
        }
    }
}
