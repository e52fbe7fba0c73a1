use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, Env, Vec};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SaleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_minter(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Minter)
}

pub fn set_minter(env: &Env, minter: &Address) {
    env.storage().instance().set(&DataKey::Minter, minter);
}

pub fn get_stages(env: &Env) -> Result<Vec<StageThreshold>, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Stages)
        .ok_or(Error::NotInitialized)
}

pub fn set_stages(env: &Env, stages: &Vec<StageThreshold>) {
    env.storage().instance().set(&DataKey::Stages, stages);
}

pub fn get_tokens_minted(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TokensMinted)
        .unwrap_or(0)
}

pub fn set_tokens_minted(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TokensMinted, &amount);
}

pub fn get_total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn get_current_stage(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::CurrentStage)
        .unwrap_or(0)
}

pub fn set_current_stage(env: &Env, stage: u32) {
    env.storage().instance().set(&DataKey::CurrentStage, &stage);
}

pub fn get_outcome(env: &Env) -> Option<SaleOutcome> {
    env.storage().instance().get(&DataKey::Outcome)
}

pub fn set_outcome(env: &Env, outcome: SaleOutcome) {
    env.storage().instance().set(&DataKey::Outcome, &outcome);
}

pub fn is_finalized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Outcome)
}
