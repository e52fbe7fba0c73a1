use crate::allocation;
use crate::errors::Error;
use crate::events;
use crate::interfaces::{EscrowVaultClient, TimeLockClient, TokenLedgerClient};
use crate::schedule;
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env, Vec};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Staged capped token sale with refund vault and locked allocations"
);

pub const MAX_BATCH_SIZE: u32 = 100;

#[contract]
pub struct TokenSaleContract;

fn validate_config(env: &Env, config: &SaleConfig) -> Result<(), Error> {
    if config.start_time >= config.end_time {
        return Err(Error::InvalidTimeWindow);
    }
    if config.base_rate <= 0 || config.ico_token_cap <= 0 {
        return Err(Error::InvalidConfig);
    }
    if config.team_tokens < 0 || config.bounty_tokens < 0 || config.company_tokens < 0 {
        return Err(Error::InvalidConfig);
    }
    if config.team_timelock == config.company_timelock {
        return Err(Error::InvalidConfig);
    }
    let this = env.current_contract_address();
    if config.vault == this || config.token == this {
        return Err(Error::InvalidConfig);
    }
    Ok(())
}

/// The ledger must be fresh, owned by the sale and roomy enough for the ICO
/// cap plus every allocation minted at finalize.
fn validate_token(env: &Env, config: &SaleConfig) -> Result<(), Error> {
    let token = TokenLedgerClient::new(env, &config.token);
    if token.owner() != Some(env.current_contract_address()) {
        return Err(Error::InvalidConfig);
    }
    if token.minting_finished() || token.total_supply() != 0 {
        return Err(Error::InvalidConfig);
    }
    let needed = config
        .ico_token_cap
        .checked_add(config.team_tokens)
        .and_then(|n| n.checked_add(config.company_tokens))
        .and_then(|n| n.checked_add(config.bounty_tokens))
        .ok_or(Error::Overflow)?;
    if token.cap() < needed {
        return Err(Error::InvalidConfig);
    }
    Ok(())
}

fn require_owner_or_minter(env: &Env, caller: &Address) -> Result<(), Error> {
    if *caller == get_owner(env)? {
        return Ok(());
    }
    match get_minter(env) {
        Some(minter) if minter == *caller => Ok(()),
        _ => Err(Error::Unauthorized),
    }
}

/// Recomputes the stage from scratch and caches it.
fn refresh_stage(env: &Env, stages: &Vec<StageThreshold>, now: u64, tokens_minted: i128) -> u32 {
    let previous = get_current_stage(env);
    let stage = schedule::stage_for(stages.iter(), now, tokens_minted);
    if stage != previous {
        set_current_stage(env, stage);
        events::stage_changed(env, previous, stage);
    }
    stage
}

/// Arms a time-lock for `beneficiary` and mints the locked tokens into it.
fn lock_allocation(
    env: &Env,
    token: &TokenLedgerClient,
    timelock: &Address,
    beneficiary: &Address,
    release_time: u64,
    amount: i128,
) {
    TimeLockClient::new(env, timelock).lock(beneficiary, &release_time);
    if amount > 0 {
        token.mint(timelock, &amount);
    }
}

#[contractimpl]
impl TokenSaleContract {
    /// Stores the configuration and wires up the vault and both time-locks,
    /// which must be freshly deployed and not yet initialized. The token
    /// ledger's owner role must already belong to the sale.
    pub fn initialize(
        env: Env,
        owner: Address,
        config: SaleConfig,
        stages: Vec<StageThreshold>,
    ) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        validate_config(&env, &config)?;
        schedule::validate_stages(stages.iter(), config.start_time)?;
        validate_token(&env, &config)?;

        set_config(&env, &config);
        set_owner(&env, &owner);
        set_stages(&env, &stages);
        set_tokens_minted(&env, 0);
        set_total_raised(&env, 0);
        set_current_stage(&env, 0);

        let this = env.current_contract_address();
        EscrowVaultClient::new(&env, &config.vault).initialize(
            &this,
            &config.payment_token,
            &config.beneficiary_wallet,
        );
        TimeLockClient::new(&env, &config.team_timelock).initialize(&this, &config.token);
        TimeLockClient::new(&env, &config.company_timelock).initialize(&this, &config.token);

        events::initialized(
            &env,
            &owner,
            config.start_time,
            config.end_time,
            config.ico_token_cap,
        );
        Ok(())
    }

    /// Buy tokens with `amount` of the payment token.
    ///
    /// The purchase is priced at the stage in force when the call starts. If it
    /// would overrun the ICO cap only the remaining tokens are minted and only
    /// the matching share of `amount` is taken; the receipt reports the rest as
    /// refunded.
    pub fn contribute(
        env: Env,
        contributor: Address,
        amount: i128,
    ) -> Result<ContributionReceipt, Error> {
        contributor.require_auth();

        if amount <= 0 {
            return Err(Error::ZeroAmount);
        }
        let config = get_config(&env)?;
        if is_finalized(&env) {
            return Err(Error::AlreadyFinalized);
        }
        let now = get_ledger_timestamp(&env);
        if !schedule::in_window(now, config.start_time, config.end_time) {
            return Err(Error::OutOfWindow);
        }

        let stages = get_stages(&env)?;
        let tokens_minted = get_tokens_minted(&env);
        let stage_index = schedule::stage_for(stages.iter(), now, tokens_minted);
        let stage = stages.get(stage_index).ok_or(Error::InvalidStages)?;

        let requested =
            schedule::tokens_for(amount, config.base_rate, &stage).ok_or(Error::Overflow)?;
        if requested == 0 {
            return Err(Error::ZeroAmount);
        }
        let fill =
            allocation::fill_contribution(amount, requested, tokens_minted, config.ico_token_cap)?;

        let minted_after = tokens_minted + fill.tokens;
        let raised_after = get_total_raised(&env)
            .checked_add(fill.consumed)
            .ok_or(Error::Overflow)?;
        set_tokens_minted(&env, minted_after);
        set_total_raised(&env, raised_after);

        token::Client::new(&env, &config.payment_token).transfer(
            &contributor,
            &config.vault,
            &fill.consumed,
        );
        EscrowVaultClient::new(&env, &config.vault).deposit(&contributor, &fill.consumed);
        TokenLedgerClient::new(&env, &config.token).mint(&contributor, &fill.tokens);

        refresh_stage(&env, &stages, now, minted_after);

        events::contribution(&env, &contributor, fill.consumed, fill.tokens, stage_index);
        if fill.capped {
            log!(&env, "ICO cap reached by contribution", contributor, fill.refunded);
            events::cap_reached(
                &env,
                &contributor,
                fill.tokens,
                requested - fill.tokens,
                fill.refunded,
            );
        }

        Ok(ContributionReceipt {
            tokens: fill.tokens,
            consumed: fill.consumed,
            refunded: fill.refunded,
            stage: stage_index,
            capped: fill.capped,
        })
    }

    /// Issue tokens outside the funding path. Each entry is cut down to what
    /// is left under the ICO cap; entries past the cap mint nothing. Returns
    /// the tokens actually minted per entry.
    pub fn mint_tokens(
        env: Env,
        caller: Address,
        recipients: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<Vec<i128>, Error> {
        caller.require_auth();

        let config = get_config(&env)?;
        require_owner_or_minter(&env, &caller)?;
        if is_finalized(&env) {
            return Err(Error::AlreadyFinalized);
        }

        let count = recipients.len();
        if count == 0 || count != amounts.len() || count > MAX_BATCH_SIZE {
            return Err(Error::BatchSizeInvalid);
        }
        let this = env.current_contract_address();
        if recipients.iter().any(|r| r == this) {
            return Err(Error::InvalidRecipient);
        }
        if amounts.iter().any(|a| a <= 0) {
            return Err(Error::ZeroAmount);
        }

        let token = TokenLedgerClient::new(&env, &config.token);
        let mut tokens_minted = get_tokens_minted(&env);
        let mut issued = Vec::new(&env);

        for (recipient, amount) in recipients.iter().zip(amounts.iter()) {
            let tokens = allocation::fill_manual(amount, tokens_minted, config.ico_token_cap);
            if tokens > 0 {
                token.mint(&recipient, &tokens);
                tokens_minted += tokens;
                events::manual_mint(&env, &caller, &recipient, tokens);
            }
            if tokens < amount {
                log!(&env, "ICO cap reached by manual mint", recipient, amount - tokens);
                events::cap_reached(&env, &recipient, tokens, amount - tokens, 0);
            }
            issued.push_back(tokens);
        }

        set_tokens_minted(&env, tokens_minted);
        let stages = get_stages(&env)?;
        refresh_stage(&env, &stages, get_ledger_timestamp(&env), tokens_minted);

        Ok(issued)
    }

    pub fn set_token_minter(env: Env, minter: Address) -> Result<(), Error> {
        let owner = get_owner(&env)?;
        owner.require_auth();

        if minter == env.current_contract_address() {
            return Err(Error::InvalidMinter);
        }
        set_minter(&env, &minter);
        events::minter_set(&env, &minter);
        Ok(())
    }

    /// Seals the outcome. Success (ICO cap reached) forwards the raised funds,
    /// mints and locks the team and company allocations, pays the bounty and
    /// gives up the token owner role. Failure opens the vault for refunds.
    /// Returns whether the sale succeeded.
    pub fn finalize(env: Env) -> Result<bool, Error> {
        let owner = get_owner(&env)?;
        owner.require_auth();

        if is_finalized(&env) {
            return Err(Error::AlreadyFinalized);
        }
        let config = get_config(&env)?;
        let now = get_ledger_timestamp(&env);
        let tokens_minted = get_tokens_minted(&env);
        if !allocation::can_finalize(now, config.end_time, tokens_minted, config.ico_token_cap) {
            return Err(Error::TooEarly);
        }

        let success = allocation::goal_reached(tokens_minted, config.ico_token_cap);
        let vault = EscrowVaultClient::new(&env, &config.vault);

        if success {
            let team_release = now
                .checked_add(config.team_lock_period)
                .ok_or(Error::Overflow)?;
            let company_release = now
                .checked_add(config.company_lock_period)
                .ok_or(Error::Overflow)?;

            set_outcome(&env, SaleOutcome::Succeeded);
            vault.close();

            let token = TokenLedgerClient::new(&env, &config.token);
            lock_allocation(
                &env,
                &token,
                &config.team_timelock,
                &config.team_wallet,
                team_release,
                config.team_tokens,
            );
            lock_allocation(
                &env,
                &token,
                &config.company_timelock,
                &config.company_wallet,
                company_release,
                config.company_tokens,
            );
            if config.bounty_tokens > 0 {
                token.mint(&config.bounty_wallet, &config.bounty_tokens);
            }
            token.finish_minting();
            token.renounce_ownership();
        } else {
            set_outcome(&env, SaleOutcome::Failed);
            vault.enable_refunds();
        }

        log!(&env, "sale finalized", success, tokens_minted);
        events::finalized(&env, success, tokens_minted, now);
        Ok(success)
    }

    /// Pays a contributor back after a failed sale.
    pub fn claim_refund(env: Env, contributor: Address) -> Result<i128, Error> {
        let config = get_config(&env)?;
        if get_outcome(&env) != Some(SaleOutcome::Failed) {
            return Err(Error::NotRefunding);
        }

        let vault = EscrowVaultClient::new(&env, &config.vault);
        if vault.deposited_of(&contributor) <= 0 {
            return Err(Error::NothingToRefund);
        }
        let amount = vault.refund(&contributor);

        events::refund_claimed(&env, &contributor, amount);
        Ok(amount)
    }

    // View functions
    pub fn current_stage(env: Env) -> u32 {
        get_current_stage(&env)
    }

    /// Stage as of the current ledger time, without waiting for the next mint
    /// to refresh the cache.
    pub fn stage_at_now(env: Env) -> Result<u32, Error> {
        let stages = get_stages(&env)?;
        Ok(schedule::stage_for(
            stages.iter(),
            get_ledger_timestamp(&env),
            get_tokens_minted(&env),
        ))
    }

    pub fn tokens_minted(env: Env) -> i128 {
        get_tokens_minted(&env)
    }

    pub fn total_raised(env: Env) -> i128 {
        get_total_raised(&env)
    }

    pub fn is_finalized(env: Env) -> bool {
        is_finalized(&env)
    }

    pub fn outcome(env: Env) -> Option<SaleOutcome> {
        get_outcome(&env)
    }

    pub fn is_open(env: Env) -> Result<bool, Error> {
        let config = get_config(&env)?;
        Ok(!is_finalized(&env)
            && schedule::in_window(get_ledger_timestamp(&env), config.start_time, config.end_time)
            && get_tokens_minted(&env) < config.ico_token_cap)
    }

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        get_config(&env)
    }

    pub fn get_stages(env: Env) -> Result<Vec<StageThreshold>, Error> {
        get_stages(&env)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        get_owner(&env)
    }

    pub fn token_minter(env: Env) -> Option<Address> {
        get_minter(&env)
    }

    pub fn start_time(env: Env) -> Result<u64, Error> {
        get_config(&env).map(|c| c.start_time)
    }

    pub fn end_time(env: Env) -> Result<u64, Error> {
        get_config(&env).map(|c| c.end_time)
    }

    pub fn base_rate(env: Env) -> Result<i128, Error> {
        get_config(&env).map(|c| c.base_rate)
    }

    pub fn ico_token_cap(env: Env) -> Result<i128, Error> {
        get_config(&env).map(|c| c.ico_token_cap)
    }

    pub fn team_timelock(env: Env) -> Result<Address, Error> {
        get_config(&env).map(|c| c.team_timelock)
    }

    pub fn company_timelock(env: Env) -> Result<Address, Error> {
        get_config(&env).map(|c| c.company_timelock)
    }

    pub fn vault(env: Env) -> Result<Address, Error> {
        get_config(&env).map(|c| c.vault)
    }
}
