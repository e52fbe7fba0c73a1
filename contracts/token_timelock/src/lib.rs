#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, token, Address, Env,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AlreadyLocked = 3,
    NotLocked = 4,
    TooEarly = 5,
    NothingToRelease = 6,
}

#[contracttype]
pub enum DataKey {
    Owner,
    Token,
    Lock,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct TimeLock {
    pub beneficiary: Address,
    pub release_time: u64,
}

/// True once `now` has reached the lock's release time.
pub fn is_releasable(lock: &TimeLock, now: u64) -> bool {
    now >= lock.release_time
}

#[contract]
pub struct TokenTimelock;

#[contractimpl]
impl TokenTimelock {
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), Error> {
        if env.storage().persistent().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        env.storage().persistent().set(&DataKey::Owner, &owner);
        env.storage().persistent().set(&DataKey::Token, &token);
        Ok(())
    }

    /// Arms the lock. Tokens sent to this contract afterwards belong to
    /// `beneficiary` from `release_time` on.
    pub fn lock(env: Env, beneficiary: Address, release_time: u64) -> Result<(), Error> {
        let owner: Address = env
            .storage()
            .persistent()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)?;
        owner.require_auth();

        if env.storage().persistent().has(&DataKey::Lock) {
            return Err(Error::AlreadyLocked);
        }

        let lock = TimeLock {
            beneficiary: beneficiary.clone(),
            release_time,
        };
        env.storage().persistent().set(&DataKey::Lock, &lock);

        env.events()
            .publish((symbol_short!("locked"), beneficiary), release_time);
        Ok(())
    }

    pub fn release(env: Env) -> Result<i128, Error> {
        let lock: TimeLock = env
            .storage()
            .persistent()
            .get(&DataKey::Lock)
            .ok_or(Error::NotLocked)?;

        if !is_releasable(&lock, env.ledger().timestamp()) {
            return Err(Error::TooEarly);
        }

        let token_address: Address = env
            .storage()
            .persistent()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        let client = token::Client::new(&env, &token_address);
        let this = env.current_contract_address();

        let amount = client.balance(&this);
        if amount <= 0 {
            return Err(Error::NothingToRelease);
        }
        client.transfer(&this, &lock.beneficiary, &amount);

        env.events()
            .publish((symbol_short!("released"), lock.beneficiary), amount);
        Ok(amount)
    }

    pub fn get_lock(env: Env) -> Option<TimeLock> {
        env.storage().persistent().get(&DataKey::Lock)
    }

    pub fn beneficiary(env: Env) -> Result<Address, Error> {
        Self::get_lock(env)
            .map(|l| l.beneficiary)
            .ok_or(Error::NotLocked)
    }

    pub fn release_time(env: Env) -> Result<u64, Error> {
        Self::get_lock(env)
            .map(|l| l.release_time)
            .ok_or(Error::NotLocked)
    }

    pub fn locked_amount(env: Env) -> Result<i128, Error> {
        let token_address: Address = env
            .storage()
            .persistent()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        Ok(token::Client::new(&env, &token_address).balance(&env.current_contract_address()))
    }
}
