use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Config, Participant, Sale};
use crate::venue::LiquidityReceipt;
use crate::LaunchError;

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 86_400;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
const PERSISTENT_BUMP_AMOUNT: u32 = 1_051_200;

/// Storage keys. Config and Paused live in instance storage, the lock in
/// temporary storage, everything else in persistent storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Paused,
    /// Allowed non-native pairing assets.
    PairingWhitelist(Address),
    /// Known intermediary contracts that may not contribute.
    Intermediary(Address),
    SaleCount,
    Sale(u64),
    /// Sale ids created by a seller, in creation order.
    SellerSales(Address),
    Participant(u64, Address),
    Receipt(u64),
    /// Re-entrancy lock per sale.
    Lock(u64),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_config(env: &Env) -> Result<Config, LaunchError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(LaunchError::NotInitialized)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn get_flag(env: &Env, key: &DataKey) -> bool {
    env.storage()
        .persistent()
        .get::<DataKey, bool>(key)
        .unwrap_or(false)
}

pub fn set_flag(env: &Env, key: &DataKey, value: bool) {
    if value {
        env.storage().persistent().set(key, &true);
        bump_persistent(env, key);
    } else {
        env.storage().persistent().remove(key);
    }
}

pub fn sale_count(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::SaleCount)
        .unwrap_or(0)
}

/// Reserve the next sale id and record it in the seller's index.
pub fn register_sale(env: &Env, seller: &Address) -> u64 {
    let id = sale_count(env);
    env.storage().persistent().set(&DataKey::SaleCount, &(id + 1));
    bump_persistent(env, &DataKey::SaleCount);

    let seller_key = DataKey::SellerSales(seller.clone());
    let mut ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&seller_key)
        .unwrap_or_else(|| Vec::new(env));
    ids.push_back(id);
    env.storage().persistent().set(&seller_key, &ids);
    bump_persistent(env, &seller_key);
    id
}

pub fn seller_sales(env: &Env, seller: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::SellerSales(seller.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn get_sale(env: &Env, sale_id: u64) -> Result<Sale, LaunchError> {
    env.storage()
        .persistent()
        .get(&DataKey::Sale(sale_id))
        .ok_or(LaunchError::SaleNotFound)
}

pub fn set_sale(env: &Env, sale: &Sale) {
    let key = DataKey::Sale(sale.id);
    env.storage().persistent().set(&key, sale);
    bump_persistent(env, &key);
}

pub fn get_participant(env: &Env, sale_id: u64, who: &Address) -> Participant {
    env.storage()
        .persistent()
        .get(&DataKey::Participant(sale_id, who.clone()))
        .unwrap_or_default()
}

pub fn set_participant(env: &Env, sale_id: u64, who: &Address, participant: &Participant) {
    let key = DataKey::Participant(sale_id, who.clone());
    env.storage().persistent().set(&key, participant);
    bump_persistent(env, &key);
}

pub fn get_receipt(env: &Env, sale_id: u64) -> Option<LiquidityReceipt> {
    env.storage().persistent().get(&DataKey::Receipt(sale_id))
}

pub fn set_receipt(env: &Env, sale_id: u64, receipt: &LiquidityReceipt) {
    let key = DataKey::Receipt(sale_id);
    env.storage().persistent().set(&key, receipt);
    bump_persistent(env, &key);
}
