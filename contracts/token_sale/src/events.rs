use soroban_sdk::{symbol_short, Address, Env};

pub fn initialized(env: &Env, owner: &Address, start_time: u64, end_time: u64, ico_token_cap: i128) {
    env.events().publish(
        (symbol_short!("init"), owner.clone()),
        (start_time, end_time, ico_token_cap),
    );
}

pub fn contribution(env: &Env, contributor: &Address, consumed: i128, tokens: i128, stage: u32) {
    env.events().publish(
        (symbol_short!("contrib"), contributor.clone()),
        (consumed, tokens, stage),
    );
}

/// The ICO cap cut an issuance short. `unfilled` tokens were not minted and
/// `refunded` payment was left with the contributor. For manual mints
/// `refunded` is always zero: settling those is up to whoever sold them.
pub fn cap_reached(env: &Env, recipient: &Address, minted: i128, unfilled: i128, refunded: i128) {
    env.events().publish(
        (symbol_short!("mint_cap"), recipient.clone()),
        (minted, unfilled, refunded),
    );
}

pub fn manual_mint(env: &Env, caller: &Address, recipient: &Address, tokens: i128) {
    env.events().publish(
        (symbol_short!("manual"), caller.clone(), recipient.clone()),
        tokens,
    );
}

pub fn stage_changed(env: &Env, from: u32, to: u32) {
    env.events().publish((symbol_short!("stage"),), (from, to));
}

pub fn minter_set(env: &Env, minter: &Address) {
    env.events()
        .publish((symbol_short!("minter"),), minter.clone());
}

pub fn finalized(env: &Env, success: bool, tokens_minted: i128, at: u64) {
    env.events().publish(
        (symbol_short!("final"),),
        (success, tokens_minted, at),
    );
}

pub fn refund_claimed(env: &Env, contributor: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("refund"), contributor.clone()), amount);
}
