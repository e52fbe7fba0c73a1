//! ICO cap bookkeeping and finalize eligibility.

use crate::errors::Error;

/// Outcome of fitting a purchase under the ICO cap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CapFill {
    pub tokens: i128,
    pub consumed: i128,
    pub refunded: i128,
    pub capped: bool,
}

pub fn remaining(tokens_minted: i128, cap: i128) -> i128 {
    cap.saturating_sub(tokens_minted).max(0)
}

/// Fits a funded purchase of `requested` tokens for `amount` under the cap.
///
/// When the cap cuts the purchase short, the unfilled share of `amount` is
/// handed back pro rata. The refund rounds down, so the sale never takes less
/// than the tokens it issued are worth.
pub fn fill_contribution(
    amount: i128,
    requested: i128,
    tokens_minted: i128,
    cap: i128,
) -> Result<CapFill, Error> {
    let room = remaining(tokens_minted, cap);
    if room == 0 {
        return Err(Error::SaleCapReached);
    }
    if requested <= room {
        return Ok(CapFill {
            tokens: requested,
            consumed: amount,
            refunded: 0,
            capped: false,
        });
    }

    let unfilled = requested - room;
    let refunded = amount.checked_mul(unfilled).ok_or(Error::Overflow)? / requested;
    Ok(CapFill {
        tokens: room,
        consumed: amount - refunded,
        refunded,
        capped: true,
    })
}

/// Manual mints have no funds attached: they are simply truncated, possibly
/// to zero.
pub fn fill_manual(requested: i128, tokens_minted: i128, cap: i128) -> i128 {
    requested.min(remaining(tokens_minted, cap))
}

pub fn goal_reached(tokens_minted: i128, cap: i128) -> bool {
    tokens_minted >= cap
}

/// Finalize is allowed once the window closed, or earlier if the cap is hit.
pub fn can_finalize(now: u64, end_time: u64, tokens_minted: i128, cap: i128) -> bool {
    now >= end_time || goal_reached(tokens_minted, cap)
}
