//! Pricing schedule: which stage the sale is in and what a payment buys there.
//!
//! Everything here is a pure function of its arguments. The contract feeds in
//! the ledger timestamp and the running ICO mint total; tests feed in whatever
//! they like.

use crate::errors::Error;
use crate::types::StageThreshold;

pub const PERCENT: i128 = 100;
pub const MAX_STAGES: u32 = 16;

/// Index of the highest stage whose time or token trigger has fired.
/// Falls back to stage 0 when nothing has fired yet.
pub fn stage_for<I>(stages: I, now: u64, tokens_minted: i128) -> u32
where
    I: IntoIterator<Item = StageThreshold>,
{
    let mut current = 0;
    for (index, stage) in stages.into_iter().enumerate() {
        let time_reached = now >= stage.trigger_time;
        let tokens_reached = matches!(stage.trigger_tokens, Some(t) if tokens_minted >= t);
        if time_reached || tokens_reached {
            current = index as u32;
        }
    }
    current
}

/// Tokens bought by `amount` at `stage`.
///
/// The discount raises the effective rate to `rate * 100 / (100 - discount)`,
/// then the bonus adds `bonus`% of that. Both steps round down. `None` on
/// overflow.
pub fn tokens_for(amount: i128, base_rate: i128, stage: &StageThreshold) -> Option<i128> {
    let discounted = amount
        .checked_mul(base_rate)?
        .checked_mul(PERCENT)?
        .checked_div(PERCENT - stage.discount_percent as i128)?;
    let bonus = discounted.checked_mul(stage.bonus_percent as i128)? / PERCENT;
    discounted.checked_add(bonus)
}

/// Inclusive on both ends.
pub fn in_window(now: u64, start_time: u64, end_time: u64) -> bool {
    now >= start_time && now <= end_time
}

/// Checks a discount table before it is stored. Returns the stage count.
pub fn validate_stages<I>(stages: I, start_time: u64) -> Result<u32, Error>
where
    I: IntoIterator<Item = StageThreshold>,
{
    let mut count: u32 = 0;
    let mut last_time = start_time;
    let mut last_tokens: i128 = 0;

    for stage in stages {
        if count == 0 && stage.trigger_time != start_time {
            return Err(Error::InvalidStages);
        }
        if stage.trigger_time < last_time {
            return Err(Error::InvalidStages);
        }
        if let Some(tokens) = stage.trigger_tokens {
            if tokens <= 0 || tokens < last_tokens {
                return Err(Error::InvalidStages);
            }
            last_tokens = tokens;
        }
        if stage.discount_percent as i128 >= PERCENT {
            return Err(Error::InvalidDiscount);
        }
        last_time = stage.trigger_time;
        count += 1;
    }

    if count == 0 || count > MAX_STAGES {
        return Err(Error::InvalidStages);
    }
    Ok(count)
}

#[cfg(test)]
mod test {
    extern crate std;

    use super::*;
    use proptest::prelude::*;
    use std::vec;
    use std::vec::Vec;

    const START: u64 = 1_519_862_400;

    fn stage(
        trigger_time: u64,
        trigger_tokens: Option<i128>,
        discount: u32,
        bonus: u32,
    ) -> StageThreshold {
        StageThreshold {
            trigger_time,
            trigger_tokens,
            discount_percent: discount,
            bonus_percent: bonus,
        }
    }

    fn table() -> Vec<StageThreshold> {
        vec![
            stage(START, None, 47, 0),
            stage(START + 14_400, Some(10_000), 40, 5),
            stage(START + 2_692_800, Some(20_000), 30, 0),
            stage(START + 3_988_800, Some(30_000), 20, 0),
            stage(START + 5_356_800, None, 0, 0),
        ]
    }

    #[test]
    fn test_stage_zero_before_anything_fires() {
        assert_eq!(stage_for(table(), 0, 0), 0);
        assert_eq!(stage_for(table(), START, 0), 0);
    }

    #[test]
    fn test_time_alone_advances() {
        assert_eq!(stage_for(table(), START + 14_399, 0), 0);
        assert_eq!(stage_for(table(), START + 14_400, 0), 1);
        assert_eq!(stage_for(table(), START + 5_356_801, 0), 4);
    }

    #[test]
    fn test_tokens_alone_advance() {
        assert_eq!(stage_for(table(), 0, 9_999), 0);
        assert_eq!(stage_for(table(), 0, 10_000), 1);
        assert_eq!(stage_for(table(), 0, 29_999), 2);
    }

    #[test]
    fn test_jumps_several_stages_at_once() {
        assert_eq!(stage_for(table(), START + 14_400, 45_000), 3);
        // stage 4 has no token trigger, only time reaches it
        assert_eq!(stage_for(table(), START, i128::MAX), 3);
    }

    #[test]
    fn test_tokens_for_discount_only() {
        let s = stage(START, None, 47, 0);
        // 1 * 1000 * 100 / 53
        assert_eq!(tokens_for(1, 1_000, &s), Some(1_886));
        assert_eq!(tokens_for(10_000_000, 1_000, &s), Some(18_867_924_528));
    }

    #[test]
    fn test_tokens_for_discount_and_bonus() {
        let s = stage(START, None, 40, 5);
        let base = 10_000_000i128 * 1_000 * 100 / 60;
        assert_eq!(tokens_for(10_000_000, 1_000, &s), Some(base + base * 5 / 100));
    }

    #[test]
    fn test_tokens_for_plain_rate() {
        let s = stage(START, None, 0, 0);
        assert_eq!(tokens_for(7, 1_000, &s), Some(7_000));
    }

    #[test]
    fn test_tokens_for_overflow() {
        let s = stage(START, None, 0, 0);
        assert_eq!(tokens_for(i128::MAX, 2, &s), None);
    }

    #[test]
    fn test_window_is_inclusive() {
        assert!(!in_window(START - 1, START, START + 10));
        assert!(in_window(START, START, START + 10));
        assert!(in_window(START + 10, START, START + 10));
        assert!(!in_window(START + 11, START, START + 10));
    }

    #[test]
    fn test_validate_accepts_table() {
        assert_eq!(validate_stages(table(), START), Ok(5));
    }

    #[test]
    fn test_validate_rejects_full_discount() {
        let stages = vec![stage(START, None, 100, 0)];
        assert_eq!(validate_stages(stages, START), Err(Error::InvalidDiscount));
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let empty: Vec<StageThreshold> = Vec::new();
        assert_eq!(validate_stages(empty, START), Err(Error::InvalidStages));

        let late_first = vec![stage(START + 1, None, 10, 0)];
        assert_eq!(validate_stages(late_first, START), Err(Error::InvalidStages));

        let unordered = vec![
            stage(START, None, 10, 0),
            stage(START + 10, None, 5, 0),
            stage(START + 5, None, 0, 0),
        ];
        assert_eq!(validate_stages(unordered, START), Err(Error::InvalidStages));

        let shrinking_tokens = vec![
            stage(START, None, 10, 0),
            stage(START + 10, Some(500), 5, 0),
            stage(START + 20, Some(400), 0, 0),
        ];
        assert_eq!(validate_stages(shrinking_tokens, START), Err(Error::InvalidStages));

        let too_many: Vec<StageThreshold> = (0..=MAX_STAGES as u64)
            .map(|i| stage(START + i, None, 0, 0))
            .collect();
        assert_eq!(validate_stages(too_many, START), Err(Error::InvalidStages));
    }

    /// Random tables built from gaps between trigger times and token triggers,
    /// so most of them validate. The rest are discarded.
    fn any_table() -> impl Strategy<Value = Vec<StageThreshold>> {
        prop::collection::vec(
            (
                0u64..2_000_000,
                prop::option::of(0i128..20_000),
                0u32..100,
                0u32..50,
            ),
            1..=MAX_STAGES as usize,
        )
        .prop_map(|rows| {
            let mut time = START;
            let mut tokens = 0i128;
            rows.into_iter()
                .enumerate()
                .map(|(i, (gap, token_gap, discount, bonus))| {
                    if i > 0 {
                        time += gap;
                    }
                    let trigger = token_gap.map(|g| {
                        tokens += g;
                        tokens
                    });
                    stage(time, trigger, discount, bonus)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_any_valid_table_is_monotonic(
            stages in any_table(),
            now in 0u64..START + 40_000_000,
            later in 0u64..40_000_000,
            minted in 0i128..400_000,
            more in 0i128..400_000,
        ) {
            prop_assume!(validate_stages(stages.clone(), START).is_ok());

            let here = stage_for(stages.clone(), now, minted);
            prop_assert!(here < stages.len() as u32);
            prop_assert!(here <= stage_for(stages.clone(), now + later, minted));
            prop_assert!(here <= stage_for(stages.clone(), now, minted + more));
            prop_assert!(here <= stage_for(stages.clone(), now + later, minted + more));
            prop_assert_eq!(here, stage_for(stages, now, minted));
        }

        #[test]
        fn prop_stage_monotonic_in_time(now in 0u64..START + 10_000_000, later in 0u64..10_000_000, minted in 0i128..50_000) {
            prop_assert!(stage_for(table(), now, minted) <= stage_for(table(), now + later, minted));
        }

        #[test]
        fn prop_stage_monotonic_in_tokens(now in 0u64..START + 10_000_000, minted in 0i128..50_000, more in 0i128..50_000) {
            prop_assert!(stage_for(table(), now, minted) <= stage_for(table(), now, minted + more));
        }

        #[test]
        fn prop_stage_idempotent(now in any::<u64>(), minted in any::<i128>()) {
            prop_assert_eq!(stage_for(table(), now, minted), stage_for(table(), now, minted));
        }

        #[test]
        fn prop_discount_never_lowers_tokens(amount in 1i128..1_000_000_000_000, discount in 0u32..100, bonus in 0u32..100) {
            let plain = tokens_for(amount, 1_000, &stage(START, None, 0, 0)).unwrap();
            let priced = tokens_for(amount, 1_000, &stage(START, None, discount, bonus)).unwrap();
            prop_assert!(priced >= plain);
        }
    }
}
