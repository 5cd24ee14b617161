//! Pure reward-accrual arithmetic.
//!
//! Rewards accrue linearly at a fixed annual percentage rate over the portion
//! of `[deposited_at, now)` that overlaps the configured reward window.  The
//! accrual is a pure function of the position itself, with no global
//! accumulator, so the contract can recompute it at any point without
//! flushing state.

/// 365-day year, the divisor of the annual rate.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Reward owed to a position of `principal` deposited at `deposited_at`,
/// observed at `now`, for the reward window `[reward_start, reward_end)`.
///
/// The accrual interval is the overlap of `[deposited_at, now)` with the
/// reward window; an empty or inverted overlap yields zero.  The formula is
///
/// ```text
/// principal * rate_percent * elapsed / (100 * SECONDS_PER_YEAR)
/// ```
///
/// with the single integer division performed last to minimise truncation.
/// Returns `None` if the intermediate product overflows `i128`.
pub fn accrued(
    principal: i128,
    deposited_at: u64,
    now: u64,
    reward_start: u64,
    reward_end: u64,
    rate_percent: u32,
) -> Option<i128> {
    let from = deposited_at.max(reward_start);
    let to = now.min(reward_end);
    if to <= from {
        return Some(0);
    }
    let elapsed = to - from;

    principal
        .checked_mul(rate_percent as i128)?
        .checked_mul(elapsed as i128)
        .map(|product| product / (100 * SECONDS_PER_YEAR as i128))
}
