use soroban_sdk::Env;

use crate::storage::DataKey;
use crate::LaunchError;

/// Exclusive per-sale lock held for the body of every state-mutating entry
/// point. A nested call into the same sale fails with `Reentrancy`.
/// Released on drop, so every exit path clears it.
pub struct SaleLock {
    env: Env,
    key: DataKey,
}

impl SaleLock {
    pub fn acquire(env: &Env, sale_id: u64) -> Result<Self, LaunchError> {
        let key = DataKey::Lock(sale_id);
        if env.storage().temporary().has(&key) {
            return Err(LaunchError::Reentrancy);
        }
        env.storage().temporary().set(&key, &true);
        Ok(Self {
            env: env.clone(),
            key,
        })
    }
}

impl Drop for SaleLock {
    fn drop(&mut self) {
        self.env.storage().temporary().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::SaleLock;
    use crate::{LaunchError, Launchpad};
    use soroban_sdk::Env;

    #[test]
    fn second_acquire_on_same_sale_is_rejected() {
        let env = Env::default();
        let id = env.register_contract(None, Launchpad);
        env.as_contract(&id, || {
            let _held = SaleLock::acquire(&env, 7).unwrap();
            assert!(matches!(
                SaleLock::acquire(&env, 7),
                Err(LaunchError::Reentrancy)
            ));
            // Other sales are independent.
            assert!(SaleLock::acquire(&env, 8).is_ok());
        });
    }

    #[test]
    fn lock_is_released_on_drop() {
        let env = Env::default();
        let id = env.register_contract(None, Launchpad);
        env.as_contract(&id, || {
            {
                let _held = SaleLock::acquire(&env, 1).unwrap();
            }
            assert!(SaleLock::acquire(&env, 1).is_ok());
        });
    }
}
