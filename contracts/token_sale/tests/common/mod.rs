#![allow(dead_code)]

use capped_token::{CappedToken, CappedTokenClient};
use refund_vault::{RefundVault, RefundVaultClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{vec, Address, Env, String, Vec};
use token_sale::{SaleConfig, StageThreshold, TokenSaleContract, TokenSaleContractClient};
use token_timelock::{TokenTimelock, TokenTimelockClient};

// 7 decimals on both the sale token and the payment asset
pub const ONE: i128 = 10_000_000;

pub const START: u64 = 1_519_862_400;
pub const END: u64 = 1_529_587_200;
pub const STAGE_1: u64 = 1_519_876_800;
pub const STAGE_2: u64 = 1_522_555_200;
pub const STAGE_3: u64 = 1_523_851_200;
pub const STAGE_4: u64 = 1_525_219_200;

pub const RATE: i128 = 1_000;
pub const ICO_CAP: i128 = 50_000_000 * ONE;
pub const TEAM_TOKENS: i128 = 10_000_000 * ONE;
pub const COMPANY_TOKENS: i128 = 15_000_000 * ONE;
pub const BOUNTY_TOKENS: i128 = 2_000_000 * ONE;
pub const TOTAL_SUPPLY_CAP: i128 = ICO_CAP + TEAM_TOKENS + COMPANY_TOKENS + BOUNTY_TOKENS;

pub const TEAM_LOCK: u64 = 31_536_000;
pub const COMPANY_LOCK: u64 = 15_552_000;

pub struct SaleFixture<'a> {
    pub env: &'a Env,
    pub sale: TokenSaleContractClient<'a>,
    pub sale_id: Address,
    pub token: CappedTokenClient<'a>,
    pub vault: RefundVaultClient<'a>,
    pub team_lock: TokenTimelockClient<'a>,
    pub company_lock: TokenTimelockClient<'a>,
    pub payment: TokenClient<'a>,
    pub payment_admin: StellarAssetClient<'a>,
    pub owner: Address,
    pub config: SaleConfig,
}

pub fn stage_table(env: &Env) -> Vec<StageThreshold> {
    vec![
        env,
        StageThreshold {
            trigger_time: START,
            trigger_tokens: None,
            discount_percent: 47,
            bonus_percent: 0,
        },
        StageThreshold {
            trigger_time: STAGE_1,
            trigger_tokens: Some(10_000_000 * ONE),
            discount_percent: 40,
            bonus_percent: 5,
        },
        StageThreshold {
            trigger_time: STAGE_2,
            trigger_tokens: Some(20_000_000 * ONE),
            discount_percent: 30,
            bonus_percent: 0,
        },
        StageThreshold {
            trigger_time: STAGE_3,
            trigger_tokens: Some(30_000_000 * ONE),
            discount_percent: 20,
            bonus_percent: 0,
        },
        StageThreshold {
            trigger_time: STAGE_4,
            trigger_tokens: None,
            discount_percent: 0,
            bonus_percent: 0,
        },
    ]
}

/// Deploys the payment asset, token ledger, vault, both time-locks and the
/// sale, hands the token owner role to the sale and initializes it.
pub fn setup_sale(env: &Env) -> SaleFixture<'_> {
    env.mock_all_auths();

    let owner = Address::generate(env);
    let payment_id = env
        .register_stellar_asset_contract_v2(owner.clone())
        .address();

    let token_id = env.register_contract(None, CappedToken);
    let token = CappedTokenClient::new(env, &token_id);
    token.initialize(
        &owner,
        &7u32,
        &String::from_str(env, "Staged Sale Token"),
        &String::from_str(env, "SST"),
        &TOTAL_SUPPLY_CAP,
    );

    let config = SaleConfig {
        token: token_id,
        payment_token: payment_id.clone(),
        vault: env.register_contract(None, RefundVault),
        start_time: START,
        end_time: END,
        base_rate: RATE,
        ico_token_cap: ICO_CAP,
        team_tokens: TEAM_TOKENS,
        bounty_tokens: BOUNTY_TOKENS,
        company_tokens: COMPANY_TOKENS,
        team_wallet: Address::generate(env),
        bounty_wallet: Address::generate(env),
        company_wallet: Address::generate(env),
        team_lock_period: TEAM_LOCK,
        company_lock_period: COMPANY_LOCK,
        team_timelock: env.register_contract(None, TokenTimelock),
        company_timelock: env.register_contract(None, TokenTimelock),
        beneficiary_wallet: Address::generate(env),
    };

    let sale_id = env.register_contract(None, TokenSaleContract);
    let sale = TokenSaleContractClient::new(env, &sale_id);
    token.transfer_ownership(&sale_id);
    sale.initialize(&owner, &config, &stage_table(env));

    SaleFixture {
        env,
        sale,
        sale_id,
        token,
        vault: RefundVaultClient::new(env, &config.vault),
        team_lock: TokenTimelockClient::new(env, &config.team_timelock),
        company_lock: TokenTimelockClient::new(env, &config.company_timelock),
        payment: TokenClient::new(env, &payment_id),
        payment_admin: StellarAssetClient::new(env, &payment_id),
        owner,
        config,
    }
}

impl SaleFixture<'_> {
    pub fn set_now(&self, now: u64) {
        self.env.ledger().set_timestamp(now);
    }

    /// A fresh contributor holding `balance` of the payment asset.
    pub fn contributor(&self, balance: i128) -> Address {
        let who = Address::generate(self.env);
        self.payment_admin.mint(&who, &balance);
        who
    }
}

/// Tokens `amount` buys at the given discount and bonus, rounded the way the
/// sale rounds.
pub fn priced(amount: i128, discount: i128, bonus: i128) -> i128 {
    let tokens = amount * RATE * 100 / (100 - discount);
    tokens + tokens * bonus / 100
}
