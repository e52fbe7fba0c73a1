#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address,
    Env, String,
};

contractmeta!(
    key = "Description",
    val = "Capped mintable token, transferable once minting is finished"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    CapExceeded = 4,
    MintingFinished = 5,
    TransfersLocked = 6,
    InsufficientBalance = 7,
    NoOwner = 8,
    InvalidCap = 9,
    Overflow = 10,
}

#[derive(Clone)]
#[contracttype]
pub struct TokenMetadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[contracttype]
pub enum DataKey {
    Metadata,
    Owner,
    Cap,
    TotalSupply,
    MintingFinished,
    Balance(Address),
}

#[contract]
pub struct CappedToken;

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(id.clone()), &amount);
}

fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn is_minting_finished(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::MintingFinished)
        .unwrap_or(false)
}

/// Loads the current owner and requires its authorization.
///
/// Once ownership has been renounced there is nobody left to authorize, so
/// every owner-gated call fails with `NoOwner`.
fn require_owner(env: &Env) -> Result<Address, Error> {
    if !env.storage().instance().has(&DataKey::Cap) {
        return Err(Error::NotInitialized);
    }
    let owner: Address = env
        .storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NoOwner)?;
    owner.require_auth();
    Ok(owner)
}

#[contractimpl]
impl CappedToken {
    pub fn initialize(
        env: Env,
        owner: Address,
        decimal: u32,
        name: String,
        symbol: String,
        cap: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Cap) {
            return Err(Error::AlreadyInitialized);
        }
        if cap <= 0 {
            return Err(Error::InvalidCap);
        }

        let metadata = TokenMetadata {
            decimal,
            name,
            symbol,
        };
        env.storage().instance().set(&DataKey::Metadata, &metadata);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Cap, &cap);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        env.storage()
            .instance()
            .set(&DataKey::MintingFinished, &false);
        Ok(())
    }

    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        require_owner(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if is_minting_finished(&env) {
            return Err(Error::MintingFinished);
        }

        let cap: i128 = env
            .storage()
            .instance()
            .get(&DataKey::Cap)
            .ok_or(Error::NotInitialized)?;
        let supply = read_total_supply(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if supply > cap {
            return Err(Error::CapExceeded);
        }

        let balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        write_balance(&env, &to, balance);
        env.storage().instance().set(&DataKey::TotalSupply, &supply);

        env.events()
            .publish((symbol_short!("mint"), to), amount);
        Ok(())
    }

    /// Closes minting for good and unlocks transfers.
    pub fn finish_minting(env: Env) -> Result<(), Error> {
        require_owner(&env)?;
        if is_minting_finished(&env) {
            return Err(Error::MintingFinished);
        }
        env.storage()
            .instance()
            .set(&DataKey::MintingFinished, &true);
        env.events().publish((symbol_short!("mint_fin"),), ());
        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if !is_minting_finished(&env) {
            return Err(Error::TransfersLocked);
        }

        let from_balance = read_balance(&env, &from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }
        write_balance(&env, &from, from_balance - amount);
        let to_balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        write_balance(&env, &to, to_balance);

        env.events()
            .publish((symbol_short!("transfer"), from, to), amount);
        Ok(())
    }

    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), Error> {
        let previous = require_owner(&env)?;
        env.storage().instance().set(&DataKey::Owner, &new_owner);
        env.events()
            .publish((symbol_short!("own_xfer"),), (previous, Some(new_owner)));
        Ok(())
    }

    /// Hands the owner role to the burn sentinel: afterwards nobody can mint.
    pub fn renounce_ownership(env: Env) -> Result<(), Error> {
        let previous = require_owner(&env)?;
        env.storage().instance().remove(&DataKey::Owner);
        env.events()
            .publish((symbol_short!("own_xfer"),), (previous, None::<Address>));
        Ok(())
    }

    pub fn owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Owner)
    }

    pub fn minting_finished(env: Env) -> bool {
        is_minting_finished(&env)
    }

    pub fn cap(env: Env) -> i128 {
        env.storage().instance().get(&DataKey::Cap).unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        Self::metadata(&env).map(|m| m.decimal)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Self::metadata(&env).map(|m| m.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Self::metadata(&env).map(|m| m.symbol)
    }
}

impl CappedToken {
    fn metadata(env: &Env) -> Result<TokenMetadata, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(Error::NotInitialized)
    }
}
