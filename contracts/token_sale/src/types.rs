use soroban_sdk::{contracttype, Address, Env};

/// One row of the discount table. A stage is entered as soon as either its
/// time or its token trigger fires.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct StageThreshold {
    pub trigger_time: u64,
    pub trigger_tokens: Option<i128>, // ICO tokens minted so far
    pub discount_percent: u32,        // price discount, < 100
    pub bonus_percent: u32,           // extra tokens on top of the discounted amount
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleConfig {
    pub token: Address,         // capped token ledger, owned by the sale
    pub payment_token: Address, // asset contributors pay with
    pub vault: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub base_rate: i128, // token units per payment unit
    pub ico_token_cap: i128,
    pub team_tokens: i128,
    pub bounty_tokens: i128,
    pub company_tokens: i128,
    pub team_wallet: Address,
    pub bounty_wallet: Address,
    pub company_wallet: Address,
    pub team_lock_period: u64,
    pub company_lock_period: u64,
    pub team_timelock: Address,
    pub company_timelock: Address,
    pub beneficiary_wallet: Address,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum SaleOutcome {
    Succeeded,
    Failed,
}

/// What a contribution actually bought. `capped` is set when the ICO cap cut
/// the purchase short; `refunded` is the part of the offered amount that was
/// never taken from the contributor.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ContributionReceipt {
    pub tokens: i128,
    pub consumed: i128,
    pub refunded: i128,
    pub stage: u32,
    pub capped: bool,
}

#[contracttype]
pub enum DataKey {
    Config,
    Owner,
    Minter,
    Stages,
    TokensMinted,
    TotalRaised,
    CurrentStage,
    Outcome,
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
