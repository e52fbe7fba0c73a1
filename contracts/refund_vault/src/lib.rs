#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, token, Address, Env,
    Symbol,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    EscrowClosed = 4,
    NotActive = 5,
    NotRefunding = 6,
    NothingToRefund = 7,
    Overflow = 8,
}

/// Lifecycle of the vault. `Refunding` and `Closed` are both terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VaultState {
    Active = 0,
    Refunding = 1,
    Closed = 2,
}

#[derive(Clone)]
#[contracttype]
pub struct VaultConfig {
    pub owner: Address,
    pub payment_token: Address,
    pub wallet: Address,
}

#[contracttype]
pub enum DataKey {
    Deposit(Address),
}

const CONFIG: Symbol = symbol_short!("config");
const STATE: Symbol = symbol_short!("state");
const TOTAL_HELD: Symbol = symbol_short!("held");

#[contract]
pub struct RefundVault;

fn read_config(env: &Env) -> Result<VaultConfig, Error> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(Error::NotInitialized)
}

fn read_state(env: &Env) -> VaultState {
    env.storage()
        .instance()
        .get(&STATE)
        .unwrap_or(VaultState::Active)
}

fn read_total_held(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_HELD).unwrap_or(0)
}

fn read_deposit(env: &Env, depositor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Deposit(depositor.clone()))
        .unwrap_or(0)
}

fn require_owner(env: &Env) -> Result<VaultConfig, Error> {
    let config = read_config(env)?;
    config.owner.require_auth();
    Ok(config)
}

#[contractimpl]
impl RefundVault {
    pub fn initialize(
        env: Env,
        owner: Address,
        payment_token: Address,
        wallet: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&CONFIG) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        let config = VaultConfig {
            owner,
            payment_token,
            wallet,
        };
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&STATE, &VaultState::Active);
        env.storage().instance().set(&TOTAL_HELD, &0i128);
        Ok(())
    }

    /// Records `amount` of payment token already moved into the vault on
    /// behalf of `depositor`.
    pub fn deposit(env: Env, depositor: Address, amount: i128) -> Result<(), Error> {
        require_owner(&env)?;
        if read_state(&env) != VaultState::Active {
            return Err(Error::EscrowClosed);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = read_deposit(&env, &depositor)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let held = read_total_held(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        env.storage()
            .persistent()
            .set(&DataKey::Deposit(depositor.clone()), &balance);
        env.storage().instance().set(&TOTAL_HELD, &held);

        env.events()
            .publish((symbol_short!("deposit"), depositor), amount);
        Ok(())
    }

    /// Forwards everything held to the wallet. Terminal.
    pub fn close(env: Env) -> Result<i128, Error> {
        let config = require_owner(&env)?;
        if read_state(&env) != VaultState::Active {
            return Err(Error::NotActive);
        }

        let held = read_total_held(&env);
        env.storage().instance().set(&STATE, &VaultState::Closed);
        env.storage().instance().set(&TOTAL_HELD, &0i128);

        if held > 0 {
            token::Client::new(&env, &config.payment_token).transfer(
                &env.current_contract_address(),
                &config.wallet,
                &held,
            );
        }

        env.events()
            .publish((symbol_short!("closed"), config.wallet), held);
        Ok(held)
    }

    pub fn enable_refunds(env: Env) -> Result<(), Error> {
        require_owner(&env)?;
        if read_state(&env) != VaultState::Active {
            return Err(Error::NotActive);
        }
        env.storage().instance().set(&STATE, &VaultState::Refunding);
        env.events().publish((symbol_short!("refunds"),), ());
        Ok(())
    }

    /// Pays `depositor` back their recorded balance. Anyone may trigger it;
    /// the funds only ever go to the depositor.
    pub fn refund(env: Env, depositor: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        if read_state(&env) != VaultState::Refunding {
            return Err(Error::NotRefunding);
        }

        let amount = read_deposit(&env, &depositor);
        if amount <= 0 {
            return Err(Error::NothingToRefund);
        }

        env.storage()
            .persistent()
            .set(&DataKey::Deposit(depositor.clone()), &0i128);
        env.storage()
            .instance()
            .set(&TOTAL_HELD, &(read_total_held(&env) - amount));

        token::Client::new(&env, &config.payment_token).transfer(
            &env.current_contract_address(),
            &depositor,
            &amount,
        );

        env.events()
            .publish((symbol_short!("refunded"), depositor), amount);
        Ok(amount)
    }

    pub fn state(env: Env) -> VaultState {
        read_state(&env)
    }

    pub fn deposited_of(env: Env, depositor: Address) -> i128 {
        read_deposit(&env, &depositor)
    }

    pub fn total_held(env: Env) -> i128 {
        read_total_held(&env)
    }

    pub fn wallet(env: Env) -> Result<Address, Error> {
        read_config(&env).map(|c| c.wallet)
    }
}
