//! The collaborators the sale drives. Only the calls the sale makes are listed.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "TokenLedgerClient")]
pub trait TokenLedger {
    fn mint(env: Env, to: Address, amount: i128);
    fn finish_minting(env: Env);
    fn renounce_ownership(env: Env);
    fn owner(env: Env) -> Option<Address>;
    fn cap(env: Env) -> i128;
    fn total_supply(env: Env) -> i128;
    fn minting_finished(env: Env) -> bool;
}

#[contractclient(name = "EscrowVaultClient")]
pub trait EscrowVault {
    fn initialize(env: Env, owner: Address, payment_token: Address, wallet: Address);
    fn deposit(env: Env, depositor: Address, amount: i128);
    fn close(env: Env) -> i128;
    fn enable_refunds(env: Env);
    fn refund(env: Env, depositor: Address) -> i128;
    fn deposited_of(env: Env, depositor: Address) -> i128;
}

#[contractclient(name = "TimeLockClient")]
pub trait TimeLockHolder {
    fn initialize(env: Env, owner: Address, token: Address);
    fn lock(env: Env, beneficiary: Address, release_time: u64);
}
