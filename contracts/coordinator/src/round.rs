//! Mapping between request deadlines and beacon rounds.

use cosmwasm_std::Uint64;

use crate::error::ContractError;

/// Maps `deadline` to `ceil((deadline - genesis) / period)`, the first round
/// whose slot `genesis + round * period` is at or after the deadline.
///
/// The deadline must lie in `[now + period, now + max_deadline_delta]` and not
/// before genesis. A deadline equal to genesis maps to round 0.
///
/// drand itself numbers round 1 at genesis and publishes round `r` at
/// `genesis + (r - 1) * period`, one period ahead of its slot here. The chosen
/// beacon can therefore be public up to one period before the deadline.
pub fn derive_round(
    deadline: u64,
    now: u64,
    genesis: u64,
    period: u64,
    max_deadline_delta: u64,
) -> Result<u64, ContractError> {
    if period == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "beacon period is zero".to_string(),
        });
    }
    if deadline < genesis {
        return Err(ContractError::DeadlineBeforeGenesis { deadline, genesis });
    }

    let earliest = now.saturating_add(period);
    if deadline < earliest {
        return Err(ContractError::DeadlineTooSoon { deadline, earliest });
    }
    let latest = now.saturating_add(max_deadline_delta);
    if deadline > latest {
        return Err(ContractError::DeadlineTooFar { deadline, latest });
    }

    Ok((deadline - genesis).div_ceil(period))
}

/// Slot time of `round`, `genesis + round * period`.
pub fn round_time(round: u64, genesis: u64, period: u64) -> Result<u64, ContractError> {
    let offset = Uint64::new(round).checked_mul(Uint64::new(period))?;
    Ok(offset.checked_add(Uint64::new(genesis))?.u64())
}
