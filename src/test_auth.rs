#![cfg(test)]
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token, Address, Env, String,
};

use crate::test_venue::MockVenue;
use crate::{LaunchError, Launchpad, LaunchpadClient, PairingAsset, SaleParams};

fn make_client(env: &Env) -> LaunchpadClient<'_> {
    let id = env.register_contract(None, Launchpad);
    LaunchpadClient::new(env, &id)
}

fn create_asset(env: &Env) -> Address {
    let admin = Address::generate(env);
    env.register_stellar_asset_contract_v2(admin).address().clone()
}

/// Initialize with mocked auths; returns (admin, native asset, sale token).
fn init(env: &Env, client: &LaunchpadClient) -> (Address, Address, Address) {
    env.mock_all_auths();
    let admin = Address::generate(env);
    let native = create_asset(env);
    let token = create_asset(env);
    let venue = env.register_contract(None, MockVenue);
    client.initialize(&admin, &native, &venue, &Address::generate(env), &0);
    (admin, native, token)
}

fn sale_params(token: &Address) -> SaleParams {
    SaleParams {
        token: token.clone(),
        pairing_asset: PairingAsset::Native,
        softcap: 10,
        hardcap: 100,
        start_time: 100,
        end_time: 200,
        tokens_per_unit: 1,
        tokens_per_unit_listing: 1,
        limit_per_account_enabled: false,
        limit_per_account: 0,
        referral_reward_percentage: 0,
        reward_pool: 0,
    }
}

/// Initialized contract with one sale by a fresh seller.
fn with_sale(env: &Env, client: &LaunchpadClient) -> (Address, Address, Address, u64) {
    let (admin, native, token) = init(env, client);
    let seller = Address::generate(env);
    token::StellarAssetClient::new(env, &token).mint(&seller, &1_000);
    let id = client.create_sale(&seller, &sale_params(&token));
    (admin, native, seller, id)
}

#[test]
fn initialize_missing_auth() {
    let env = Env::default();
    let client = make_client(&env);
    let admin = Address::generate(&env);
    let asset = Address::generate(&env);
    assert!(client
        .try_initialize(&admin, &asset, &asset, &admin, &0)
        .is_err());
    assert_eq!(client.try_get_config(), Err(Ok(LaunchError::NotInitialized)));
}

#[test]
fn initialize_twice_is_rejected() {
    let env = Env::default();
    let client = make_client(&env);
    let (admin, native, _token) = init(&env, &client);
    assert_eq!(
        client.try_initialize(&admin, &native, &native, &admin, &0),
        Err(Ok(LaunchError::AlreadyInitialized))
    );
}

#[test]
fn create_sale_before_initialize() {
    let env = Env::default();
    env.mock_all_auths();
    let client = make_client(&env);
    let seller = Address::generate(&env);
    let token = Address::generate(&env);
    assert_eq!(
        client.try_create_sale(&seller, &sale_params(&token)),
        Err(Ok(LaunchError::NotInitialized))
    );
}

#[test]
fn create_sale_missing_auth_no_mutation() {
    let env = Env::default();
    let client = make_client(&env);
    let (_admin, _native, token) = init(&env, &client);
    let seller = Address::generate(&env);
    token::StellarAssetClient::new(&env, &token).mint(&seller, &1_000);
    env.set_auths(&[]);
    assert!(client
        .try_create_sale(&seller, &sale_params(&token))
        .is_err());
    assert_eq!(client.get_sale_count(), 0);
}

#[test]
fn contribute_missing_auth_no_mutation() {
    let env = Env::default();
    let client = make_client(&env);
    let (_admin, native, _seller, id) = with_sale(&env, &client);
    let payer = Address::generate(&env);
    token::StellarAssetClient::new(&env, &native).mint(&payer, &50);
    env.ledger().with_mut(|li| li.timestamp = 150);
    env.set_auths(&[]);
    assert!(client.try_contribute(&id, &payer, &50, &None).is_err());
    assert_eq!(client.get_sale(&id).unwrap().collected, 0);
}

#[test]
fn claim_missing_auth_no_mutation() {
    let env = Env::default();
    let client = make_client(&env);
    let (_admin, _native, seller, id) = with_sale(&env, &client);
    env.ledger().with_mut(|li| li.timestamp = 300);
    env.set_auths(&[]);
    assert!(client.try_claim(&id, &seller).is_err());
    assert_eq!(client.get_sale(&id).unwrap().token_inventory, 200);
}

#[test]
fn cancel_by_non_seller_no_mutation() {
    let env = Env::default();
    let client = make_client(&env);
    let (admin, _native, _seller, id) = with_sale(&env, &client);
    let reason = String::from_str(&env, "x");
    let attacker = Address::generate(&env);
    assert_eq!(
        client.try_cancel(&id, &attacker, &reason),
        Err(Ok(LaunchError::NotSeller))
    );
    // Admin has no seller capability either.
    assert_eq!(
        client.try_cancel(&id, &admin, &reason),
        Err(Ok(LaunchError::NotSeller))
    );
    assert!(!client.get_sale(&id).unwrap().is_canceled);
}

#[test]
fn pause_by_non_admin_no_mutation() {
    let env = Env::default();
    let client = make_client(&env);
    let (admin, _native, _token) = init(&env, &client);
    let attacker = Address::generate(&env);
    assert_eq!(
        client.try_pause(&attacker),
        Err(Ok(LaunchError::NotAuthorized))
    );
    assert!(!client.is_paused());
    client.pause(&admin);
    assert_eq!(
        client.try_unpause(&attacker),
        Err(Ok(LaunchError::NotAuthorized))
    );
    assert!(client.is_paused());
}

#[test]
fn whitelist_by_non_admin_no_mutation() {
    let env = Env::default();
    let client = make_client(&env);
    let (admin, _native, _token) = init(&env, &client);
    let attacker = Address::generate(&env);
    let usdc = create_asset(&env);
    assert_eq!(
        client.try_set_pairing_whitelisted(&attacker, &usdc, &true),
        Err(Ok(LaunchError::NotAuthorized))
    );
    assert!(!client.is_pairing_whitelisted(&usdc));

    client.set_pairing_whitelisted(&admin, &usdc, &true);
    assert!(client.is_pairing_whitelisted(&usdc));
    client.set_pairing_whitelisted(&admin, &usdc, &false);
    assert!(!client.is_pairing_whitelisted(&usdc));
}

#[test]
fn intermediary_flag_by_non_admin_no_mutation() {
    let env = Env::default();
    let client = make_client(&env);
    let (_admin, _native, _token) = init(&env, &client);
    let attacker = Address::generate(&env);
    let router = Address::generate(&env);
    assert_eq!(
        client.try_set_intermediary(&attacker, &router, &true),
        Err(Ok(LaunchError::NotAuthorized))
    );
    assert!(!client.is_intermediary(&router));
}

#[test]
fn creation_fee_guarded_and_non_negative() {
    let env = Env::default();
    let client = make_client(&env);
    let (admin, _native, _token) = init(&env, &client);
    let attacker = Address::generate(&env);
    assert_eq!(
        client.try_set_creation_fee(&attacker, &10),
        Err(Ok(LaunchError::NotAuthorized))
    );
    assert_eq!(
        client.try_set_creation_fee(&admin, &-1),
        Err(Ok(LaunchError::InvalidAmount))
    );
    assert_eq!(client.get_config().creation_fee, 0);
}
